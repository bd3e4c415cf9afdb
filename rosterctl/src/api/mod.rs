//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Employees** (`/employees/*`): Employee CRUD
//! - **Teams / Members** (`/teams/*`, `/members/*`): Team and member CRUD
//! - **Departments** (`/departments/*`): Distinct departments and rosters
//! - **Stats** (`/average_salary/*`, `/top_earners/`, `/most_recent_hires/`)
//! - **Predictions** (`/predict_salary/`): Salary estimation
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
