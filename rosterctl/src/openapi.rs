//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every annotated handler; the JSON document is
//! served at `/api-spec.json` and the Scalar UI at `/docs`.

use crate::api::handlers;
use crate::api::models::{
    ScalarResponse,
    employees::{DepartmentResponse, EmployeeResponse, EmployeeUpsert},
    members::{MemberResponse, MemberUpsert},
    pagination::{PageQuery, PaginationInfo},
    predictions::PredictSalaryRequest,
    teams::{TeamResponse, TeamUpsert},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster Manager API",
        description = "CRUD over employees, teams, and members, plus aggregate statistics and salary prediction"
    ),
    paths(
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::get_employee,
        handlers::employees::replace_employee,
        handlers::employees::delete_employee,
        handlers::departments::list_departments,
        handlers::departments::employees_in_department,
        handlers::stats::average_salary,
        handlers::stats::top_earners,
        handlers::stats::most_recent_hires,
        handlers::predictions::predict_salary,
        handlers::teams::list_teams,
        handlers::teams::create_team,
        handlers::teams::get_team,
        handlers::teams::replace_team,
        handlers::teams::delete_team,
        handlers::members::list_members,
        handlers::members::create_member,
        handlers::members::get_member,
        handlers::members::replace_member,
        handlers::members::delete_member,
    ),
    components(schemas(
        EmployeeUpsert,
        EmployeeResponse,
        DepartmentResponse,
        TeamUpsert,
        TeamResponse,
        MemberUpsert,
        MemberResponse,
        PredictSalaryRequest,
        ScalarResponse,
        PageQuery,
        PaginationInfo,
    )),
    tags(
        (name = "employees", description = "Operations on employees"),
        (name = "departments", description = "Department listings"),
        (name = "stats", description = "Aggregate statistics"),
        (name = "predictions", description = "Salary prediction"),
        (name = "teams", description = "Operations on teams"),
        (name = "members", description = "Operations on members"),
    )
)]
pub struct ApiDoc;
