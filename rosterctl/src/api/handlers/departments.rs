//! Department listing handlers.
//!
//! `GET /departments/` reflects what is actually stored (a SELECT DISTINCT
//! over employee rows); `GET /departments/{name}` validates the name against
//! the fixed enumeration before querying.

use crate::AppState;
use crate::api::models::employees::{DepartmentResponse, EmployeeResponse};
use crate::api::models::pagination::{PageQuery, Paginated, Pager};
use crate::db::handlers::{Employees, Repository, employees::EmployeeFilter};
use crate::errors::{Error, Result};
use crate::types::is_valid_department;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
};

#[utoipa::path(
    get,
    path = "/departments/",
    tag = "departments",
    summary = "List departments occurring in stored data",
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated department names", body = Paginated<DepartmentResponse>),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_departments(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<DepartmentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let total = repo.count_distinct_departments().await?;
    let pager = Pager::new(query.page(), state.config.per_page, total)?;

    let departments = repo.distinct_departments(pager.offset(), pager.per_page()).await?;
    let data = departments.into_iter().map(|name| DepartmentResponse { name }).collect();

    Ok(Json(Paginated::new(data, pager.envelope(uri.path()))))
}

#[utoipa::path(
    get,
    path = "/departments/{name}",
    tag = "departments",
    summary = "List employees in a department",
    params(
        ("name" = String, Path, description = "Department name (must belong to the fixed enumeration)"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Paginated employees", body = Paginated<EmployeeResponse>),
        (status = 400, description = "Unknown department"),
        (status = 404, description = "Page out of range")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn employees_in_department(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<EmployeeResponse>>> {
    if !is_valid_department(&name) {
        return Err(Error::bad_request(format!("{name} is not a valid department")));
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let mut filter = EmployeeFilter::new(0, state.config.per_page).with_department(name);
    let total = repo.count(&filter).await?;
    let pager = Pager::new(query.page(), state.config.per_page, total)?;
    filter.skip = pager.offset();

    let employees = repo.list(&filter).await?;
    let data = employees.into_iter().map(EmployeeResponse::from).collect();

    Ok(Json(Paginated::new(data, pager.envelope(uri.path()))))
}
