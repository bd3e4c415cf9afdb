//! Database repository for teams.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::teams::{TeamCreateDBRequest, TeamDBResponse, TeamReplaceDBRequest},
};
use crate::types::{MemberId, TeamId, abbrev_uuid};
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing teams
#[derive(Debug, Clone)]
pub struct TeamFilter {
    pub skip: i64,
    pub limit: i64,
    /// Exact-match name filter
    pub name: Option<String>,
    /// Only teams this member belongs to
    pub member_id: Option<MemberId>,
}

impl TeamFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit,
            name: None,
            member_id: None,
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn with_member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }
}

pub struct Teams<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Teams<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// WHERE clause fragment shared by list and count. Placeholders appear
    /// in filter-field order: name, then member_id.
    fn where_clause(filter: &TeamFilter) -> String {
        let mut conditions = Vec::new();
        if filter.name.is_some() {
            conditions.push("teams.name = ?");
        }
        if filter.member_id.is_some() {
            conditions.push("members.id = ?");
        }
        if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        }
    }

    fn join_clause(filter: &TeamFilter) -> &'static str {
        if filter.member_id.is_some() {
            "JOIN members ON members.team_id = teams.id"
        } else {
            ""
        }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Teams<'c> {
    type CreateRequest = TeamCreateDBRequest;
    type ReplaceRequest = TeamReplaceDBRequest;
    type Response = TeamDBResponse;
    type Id = TeamId;
    type Filter = TeamFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let team = sqlx::query_as::<_, TeamDBResponse>(
            "INSERT INTO teams (id, name) VALUES (?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(team)
    }

    #[instrument(skip(self), fields(team_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let team = sqlx::query_as::<_, TeamDBResponse>("SELECT * FROM teams WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(team)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let sql = format!(
            "SELECT teams.* FROM teams {} {} ORDER BY teams.created_at, teams.id LIMIT ? OFFSET ?",
            Self::join_clause(filter),
            Self::where_clause(filter),
        );

        let mut query = sqlx::query_as::<_, TeamDBResponse>(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(member_id) = filter.member_id {
            query = query.bind(member_id);
        }

        let teams = query.bind(filter.limit).bind(filter.skip).fetch_all(&mut *self.db).await?;

        Ok(teams)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM teams {} {}",
            Self::join_clause(filter),
            Self::where_clause(filter),
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(name) = &filter.name {
            query = query.bind(name);
        }
        if let Some(member_id) = filter.member_id {
            query = query.bind(member_id);
        }

        Ok(query.fetch_one(&mut *self.db).await?)
    }

    #[instrument(skip(self, request), fields(team_id = %abbrev_uuid(&id)), err)]
    async fn replace(&mut self, id: Self::Id, request: &Self::ReplaceRequest) -> Result<Self::Response> {
        let team = sqlx::query_as::<_, TeamDBResponse>(
            "UPDATE teams SET name = ?, updated_at = datetime('now') WHERE id = ? RETURNING *",
        )
        .bind(&request.name)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(team)
    }

    #[instrument(skip(self), fields(team_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
