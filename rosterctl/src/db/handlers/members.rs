//! Database repository for members.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::members::{MemberCreateDBRequest, MemberDBResponse, MemberReplaceDBRequest},
};
use crate::types::{MemberId, TeamId, abbrev_uuid};
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing members
#[derive(Debug, Clone)]
pub struct MemberFilter {
    pub skip: i64,
    pub limit: i64,
    /// Only members of this team
    pub team_id: Option<TeamId>,
}

impl MemberFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit,
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

pub struct Members<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Members<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Members<'c> {
    type CreateRequest = MemberCreateDBRequest;
    type ReplaceRequest = MemberReplaceDBRequest;
    type Response = MemberDBResponse;
    type Id = MemberId;
    type Filter = MemberFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let member = sqlx::query_as::<_, MemberDBResponse>(
            "INSERT INTO members (id, name, team_id) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(request.team_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(member)
    }

    #[instrument(skip(self), fields(member_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let member = sqlx::query_as::<_, MemberDBResponse>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(member)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let members = match filter.team_id {
            Some(team_id) => {
                sqlx::query_as::<_, MemberDBResponse>(
                    "SELECT * FROM members WHERE team_id = ?
                     ORDER BY created_at, id
                     LIMIT ? OFFSET ?",
                )
                .bind(team_id)
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, MemberDBResponse>(
                    "SELECT * FROM members ORDER BY created_at, id LIMIT ? OFFSET ?",
                )
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
        };

        Ok(members)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let count = match filter.team_id {
            Some(team_id) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE team_id = ?")
                    .bind(team_id)
                    .fetch_one(&mut *self.db)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
                    .fetch_one(&mut *self.db)
                    .await?
            }
        };

        Ok(count)
    }

    #[instrument(skip(self, request), fields(member_id = %abbrev_uuid(&id)), err)]
    async fn replace(&mut self, id: Self::Id, request: &Self::ReplaceRequest) -> Result<Self::Response> {
        // Full replace: an absent team_id detaches the member
        let member = sqlx::query_as::<_, MemberDBResponse>(
            "UPDATE members SET name = ?, team_id = ?, updated_at = datetime('now')
             WHERE id = ?
             RETURNING *",
        )
        .bind(&request.name)
        .bind(request.team_id)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(member)
    }

    #[instrument(skip(self), fields(member_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
