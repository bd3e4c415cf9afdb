//! Member CRUD handlers.

use crate::AppState;
use crate::api::handlers::tagged_json;
use crate::api::models::members::{ListMembersQuery, MemberResponse, MemberUpsert};
use crate::api::models::pagination::{Paginated, Pager};
use crate::db::handlers::{Members, Repository, members::MemberFilter};
use crate::errors::{Error, Result};
use crate::etag;
use crate::types::MemberId;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};

#[utoipa::path(
    get,
    path = "/members/",
    tag = "members",
    summary = "List members",
    params(ListMembersQuery),
    responses(
        (status = 200, description = "Paginated members", body = Paginated<MemberResponse>),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListMembersQuery>,
) -> Result<Json<Paginated<MemberResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    let mut filter = MemberFilter::new(0, state.config.per_page);
    if let Some(team_id) = query.team_id {
        filter = filter.with_team(team_id);
    }

    let total = repo.count(&filter).await?;
    let pager = Pager::new(query.pagination.page(), state.config.per_page, total)?;
    filter.skip = pager.offset();

    let members = repo.list(&filter).await?;
    let data = members.into_iter().map(MemberResponse::from).collect();

    Ok(Json(Paginated::new(data, pager.envelope(uri.path()))))
}

#[utoipa::path(
    post,
    path = "/members/",
    tag = "members",
    summary = "Create a new member",
    request_body = MemberUpsert,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Validation error or unknown team")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_member(State(state): State<AppState>, Json(body): Json<MemberUpsert>) -> Result<Response> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let member = {
        let mut repo = Members::new(&mut tx);
        repo.create(&body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::CREATED, MemberResponse::from(member))
}

#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    summary = "Get a member by ID",
    params(("id" = String, Path, format = "uuid", description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = MemberResponse),
        (status = 404, description = "Member not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_member(State(state): State<AppState>, Path(id): Path<MemberId>) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Members::new(&mut conn);

    let member = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Member", id))?;

    tagged_json(StatusCode::OK, MemberResponse::from(member))
}

#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    summary = "Replace a member",
    description = "Full replace: an omitted team_id detaches the member from its team.",
    params(("id" = String, Path, format = "uuid", description = "Member ID")),
    request_body = MemberUpsert,
    responses(
        (status = 200, description = "Member replaced", body = MemberResponse),
        (status = 404, description = "Member not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn replace_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
    headers: HeaderMap,
    Json(body): Json<MemberUpsert>,
) -> Result<Response> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let replaced = {
        let mut repo = Members::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Member", id))?;
        etag::check_if_match(&headers, &MemberResponse::from(current))?;

        repo.replace(id, &body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::OK, MemberResponse::from(replaced))
}

#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    summary = "Delete a member",
    params(("id" = String, Path, format = "uuid", description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<MemberId>, headers: HeaderMap) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut repo = Members::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Member", id))?;
        etag::check_if_match(&headers, &MemberResponse::from(current))?;

        repo.delete(id).await?;
    }
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
