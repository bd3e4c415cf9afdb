//! Team CRUD handlers.

use crate::AppState;
use crate::api::handlers::tagged_json;
use crate::api::models::pagination::{Paginated, Pager};
use crate::api::models::teams::{ListTeamsQuery, TeamResponse, TeamUpsert};
use crate::db::handlers::{Repository, Teams, teams::TeamFilter};
use crate::errors::{Error, Result};
use crate::etag;
use crate::types::TeamId;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};

#[utoipa::path(
    get,
    path = "/teams/",
    tag = "teams",
    summary = "List teams",
    params(ListTeamsQuery),
    responses(
        (status = 200, description = "Paginated teams", body = Paginated<TeamResponse>),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_teams(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListTeamsQuery>,
) -> Result<Json<Paginated<TeamResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teams::new(&mut conn);

    let mut filter = TeamFilter::new(0, state.config.per_page);
    if let Some(name) = query.name {
        filter = filter.with_name(name);
    }
    if let Some(member_id) = query.member_id {
        filter = filter.with_member(member_id);
    }

    let total = repo.count(&filter).await?;
    let pager = Pager::new(query.pagination.page(), state.config.per_page, total)?;
    filter.skip = pager.offset();

    let teams = repo.list(&filter).await?;
    let data = teams.into_iter().map(TeamResponse::from).collect();

    Ok(Json(Paginated::new(data, pager.envelope(uri.path()))))
}

#[utoipa::path(
    post,
    path = "/teams/",
    tag = "teams",
    summary = "Create a new team",
    request_body = TeamUpsert,
    responses(
        (status = 201, description = "Team created", body = TeamResponse),
        (status = 400, description = "Validation error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_team(State(state): State<AppState>, Json(body): Json<TeamUpsert>) -> Result<Response> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let team = {
        let mut repo = Teams::new(&mut tx);
        repo.create(&body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::CREATED, TeamResponse::from(team))
}

#[utoipa::path(
    get,
    path = "/teams/{id}",
    tag = "teams",
    summary = "Get a team by ID",
    params(("id" = String, Path, format = "uuid", description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 404, description = "Team not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_team(State(state): State<AppState>, Path(id): Path<TeamId>) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Teams::new(&mut conn);

    let team = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Team", id))?;

    tagged_json(StatusCode::OK, TeamResponse::from(team))
}

#[utoipa::path(
    put,
    path = "/teams/{id}",
    tag = "teams",
    summary = "Replace a team",
    params(("id" = String, Path, format = "uuid", description = "Team ID")),
    request_body = TeamUpsert,
    responses(
        (status = 200, description = "Team replaced", body = TeamResponse),
        (status = 404, description = "Team not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn replace_team(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    headers: HeaderMap,
    Json(body): Json<TeamUpsert>,
) -> Result<Response> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let replaced = {
        let mut repo = Teams::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Team", id))?;
        etag::check_if_match(&headers, &TeamResponse::from(current))?;

        repo.replace(id, &body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::OK, TeamResponse::from(replaced))
}

#[utoipa::path(
    delete,
    path = "/teams/{id}",
    tag = "teams",
    summary = "Delete a team",
    description = "Members of the deleted team are detached, not removed.",
    params(("id" = String, Path, format = "uuid", description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_team(State(state): State<AppState>, Path(id): Path<TeamId>, headers: HeaderMap) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut repo = Teams::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Team", id))?;
        etag::check_if_match(&headers, &TeamResponse::from(current))?;

        repo.delete(id).await?;
    }
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
