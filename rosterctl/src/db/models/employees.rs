//! Database models for employees.

use crate::types::EmployeeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An employee row as stored in the `employees` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeDBResponse {
    pub id: EmployeeId,
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert a new employee.
#[derive(Debug, Clone)]
pub struct EmployeeCreateDBRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
}

/// Full-replace payload. Absent `name`/`department` clear the columns;
/// `salary` and `hire_date` are always written.
#[derive(Debug, Clone)]
pub struct EmployeeReplaceDBRequest {
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: f64,
    pub hire_date: DateTime<Utc>,
}
