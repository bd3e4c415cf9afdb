//! API request/response models for employees and departments.

use super::pagination::PageQuery;
use crate::db::models::employees::{EmployeeCreateDBRequest, EmployeeDBResponse, EmployeeReplaceDBRequest};
use crate::errors::{Error, Result};
use crate::types::{EmployeeId, is_valid_department};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing employees
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListEmployeesQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PageQuery,

    /// Exact-match department filter
    pub department: Option<String>,
}

/// Request body for creating or replacing an employee.
///
/// PUT uses the same schema as POST, with full-replace semantics: omitted
/// `name`/`department` are cleared to null, an omitted `salary` resets to 0.
/// `hire_date` is always required.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmployeeUpsert {
    /// Employee display name
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    /// Department; must belong to the fixed enumeration when present
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    /// Non-negative salary; defaults to 0 when omitted
    #[serde(default)]
    #[schema(example = 90000.0, minimum = 0)]
    pub salary: f64,
    /// Hire timestamp; naive values are treated as UTC
    #[serde(deserialize_with = "super::flexible_timestamp::deserialize")]
    #[schema(value_type = String, example = "2020-01-01T00:00:00")]
    pub hire_date: DateTime<Utc>,
}

impl EmployeeUpsert {
    /// Boundary validation, run before any mutation is attempted.
    pub fn validate(&self) -> Result<()> {
        if let Some(department) = &self.department
            && !is_valid_department(department)
        {
            return Err(Error::bad_request(format!("{department} is not a valid department")));
        }
        if self.salary < 0.0 {
            return Err(Error::bad_request(format!("salary must be non-negative, got {}", self.salary)));
        }
        Ok(())
    }
}

impl From<EmployeeUpsert> for EmployeeCreateDBRequest {
    fn from(body: EmployeeUpsert) -> Self {
        Self {
            name: body.name,
            department: body.department,
            salary: body.salary,
            hire_date: body.hire_date,
        }
    }
}

impl From<EmployeeUpsert> for EmployeeReplaceDBRequest {
    fn from(body: EmployeeUpsert) -> Self {
        Self {
            name: body.name,
            department: body.department,
            salary: body.salary,
            hire_date: body.hire_date,
        }
    }
}

/// Employee details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeResponse {
    /// Unique identifier, server-generated and immutable
    #[schema(value_type = String, format = "uuid")]
    pub id: EmployeeId,
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
}

impl From<EmployeeDBResponse> for EmployeeResponse {
    fn from(db: EmployeeDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            department: db.department,
            salary: db.salary,
            hire_date: db.hire_date,
        }
    }
}

/// A department name occurring in stored data.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentResponse {
    #[schema(example = "Sales")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> serde_json::Result<EmployeeUpsert> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_salary_defaults_to_zero() {
        let upsert = body(r#"{"name": "A", "hire_date": "2020-01-01T00:00:00"}"#).unwrap();
        assert_eq!(upsert.salary, 0.0);
        assert!(upsert.validate().is_ok());
    }

    #[test]
    fn test_hire_date_is_required() {
        assert!(body(r#"{"name": "A", "salary": 10.0}"#).is_err());
    }

    #[test]
    fn test_unknown_department_rejected() {
        let upsert = body(r#"{"department": "Astrology", "hire_date": "2020-01-01T00:00:00"}"#).unwrap();
        assert!(matches!(upsert.validate().unwrap_err(), Error::BadRequest { .. }));
    }

    #[test]
    fn test_negative_salary_rejected() {
        let upsert = body(r#"{"salary": -1.0, "hire_date": "2020-01-01T00:00:00"}"#).unwrap();
        assert!(upsert.validate().is_err());
    }
}
