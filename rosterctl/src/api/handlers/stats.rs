//! Aggregate statistics handlers.
//!
//! The ranked endpoints (`/top_earners/`, `/most_recent_hires/`) compute a
//! bounded intermediate set first (capped by `ranking_limit`, distinct from
//! the page size) and paginate over that subset, never the full table.

use crate::AppState;
use crate::api::models::ScalarResponse;
use crate::api::models::employees::EmployeeResponse;
use crate::api::models::pagination::{PageQuery, Paginated, Pager};
use crate::db::handlers::Employees;
use crate::db::models::employees::EmployeeDBResponse;
use crate::errors::{Error, Result};
use crate::types::is_valid_department;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
};

#[utoipa::path(
    get,
    path = "/average_salary/{department}",
    tag = "stats",
    summary = "Average salary over a department",
    description = "Arithmetic mean of salaries in the department; 0 when the department has no employees.",
    params(("department" = String, Path, description = "Department name")),
    responses(
        (status = 200, description = "Average salary", body = ScalarResponse),
        (status = 400, description = "Unknown department")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn average_salary(State(state): State<AppState>, Path(department): Path<String>) -> Result<Json<ScalarResponse>> {
    if !is_valid_department(&department) {
        return Err(Error::bad_request(format!("{department} is not a valid department")));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let data = repo.average_salary(&department).await?;

    Ok(Json(ScalarResponse { data }))
}

#[utoipa::path(
    get,
    path = "/top_earners/",
    tag = "stats",
    summary = "Top earners, highest salary first",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated top earners", body = Paginated<EmployeeResponse>),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn top_earners(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<EmployeeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let ranked = repo.top_by_salary(state.config.ranking_limit).await?;
    paginate_ranked(ranked, &query, &state, uri.path())
}

#[utoipa::path(
    get,
    path = "/most_recent_hires/",
    tag = "stats",
    summary = "Most recently hired employees, newest first",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated recent hires", body = Paginated<EmployeeResponse>),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn most_recent_hires(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<EmployeeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let ranked = repo.most_recent_hires(state.config.ranking_limit).await?;
    paginate_ranked(ranked, &query, &state, uri.path())
}

/// Paginate an already-ranked bounded set held in memory.
fn paginate_ranked(
    ranked: Vec<EmployeeDBResponse>,
    query: &PageQuery,
    state: &AppState,
    base_url: &str,
) -> Result<Json<Paginated<EmployeeResponse>>> {
    let pager = Pager::new(query.page(), state.config.per_page, ranked.len() as i64)?;
    let (start, end) = pager.window(ranked.len());

    let data = ranked[start..end].iter().cloned().map(EmployeeResponse::from).collect();

    Ok(Json(Paginated::new(data, pager.envelope(base_url))))
}
