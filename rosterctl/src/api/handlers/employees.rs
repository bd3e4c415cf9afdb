//! Employee CRUD handlers.

use crate::AppState;
use crate::api::handlers::tagged_json;
use crate::api::models::employees::{EmployeeResponse, EmployeeUpsert, ListEmployeesQuery};
use crate::api::models::pagination::{Paginated, Pager};
use crate::db::handlers::{Employees, Repository, employees::EmployeeFilter};
use crate::errors::{Error, Result};
use crate::etag;
use crate::types::EmployeeId;
use axum::{
    Json,
    extract::{OriginalUri, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Response,
};

#[utoipa::path(
    get,
    path = "/employees/",
    tag = "employees",
    summary = "List employees",
    params(ListEmployeesQuery),
    responses(
        (status = 200, description = "Paginated employees", body = Paginated<EmployeeResponse>),
        (status = 404, description = "Page out of range"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_employees(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<Paginated<EmployeeResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let mut filter = EmployeeFilter::new(0, state.config.per_page);
    if let Some(department) = query.department {
        filter = filter.with_department(department);
    }

    let total = repo.count(&filter).await?;
    let pager = Pager::new(query.pagination.page(), state.config.per_page, total)?;
    filter.skip = pager.offset();

    let employees = repo.list(&filter).await?;
    let data = employees.into_iter().map(EmployeeResponse::from).collect();

    Ok(Json(Paginated::new(data, pager.envelope(uri.path()))))
}

#[utoipa::path(
    post,
    path = "/employees/",
    tag = "employees",
    summary = "Create a new employee",
    request_body = EmployeeUpsert,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_employee(State(state): State<AppState>, Json(body): Json<EmployeeUpsert>) -> Result<Response> {
    body.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let employee = {
        let mut repo = Employees::new(&mut tx);
        repo.create(&body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::CREATED, EmployeeResponse::from(employee))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    summary = "Get an employee by ID",
    params(("id" = String, Path, format = "uuid", description = "Employee ID")),
    responses(
        (status = 200, description = "Employee details", body = EmployeeResponse),
        (status = 404, description = "Employee not found")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_employee(State(state): State<AppState>, Path(id): Path<EmployeeId>) -> Result<Response> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Employees::new(&mut conn);

    let employee = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Employee", id))?;

    tagged_json(StatusCode::OK, EmployeeResponse::from(employee))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    summary = "Replace an employee",
    description = "Full replace: fields omitted from the body are cleared, not preserved.",
    params(("id" = String, Path, format = "uuid", description = "Employee ID")),
    request_body = EmployeeUpsert,
    responses(
        (status = 200, description = "Employee replaced", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn replace_employee(
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    headers: HeaderMap,
    Json(body): Json<EmployeeUpsert>,
) -> Result<Response> {
    body.validate()?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let replaced = {
        let mut repo = Employees::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Employee", id))?;
        etag::check_if_match(&headers, &EmployeeResponse::from(current))?;

        repo.replace(id, &body.into()).await?
    };
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    tagged_json(StatusCode::OK, EmployeeResponse::from(replaced))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    summary = "Delete an employee",
    params(("id" = String, Path, format = "uuid", description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 412, description = "Entity tag mismatch")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_employee(State(state): State<AppState>, Path(id): Path<EmployeeId>, headers: HeaderMap) -> Result<StatusCode> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    {
        let mut repo = Employees::new(&mut tx);

        let current = repo.get_by_id(id).await?.ok_or_else(|| Error::not_found("Employee", id))?;
        etag::check_if_match(&headers, &EmployeeResponse::from(current))?;

        repo.delete(id).await?;
    }
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}
