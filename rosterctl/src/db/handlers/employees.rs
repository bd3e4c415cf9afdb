//! Database repository for employees, including the aggregate queries.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::employees::{EmployeeCreateDBRequest, EmployeeDBResponse, EmployeeReplaceDBRequest},
};
use crate::types::{EmployeeId, abbrev_uuid};
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing employees
#[derive(Debug, Clone)]
pub struct EmployeeFilter {
    pub skip: i64,
    pub limit: i64,
    /// Exact-match department filter
    pub department: Option<String>,
}

impl EmployeeFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit,
            department: None,
        }
    }

    pub fn with_department(mut self, department: String) -> Self {
        self.department = Some(department);
        self
    }
}

pub struct Employees<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Employees<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    /// Department names that actually occur among stored employees,
    /// ordered alphabetically. This is live data, not the static
    /// enumeration used for write-path validation.
    #[instrument(skip(self), err)]
    pub async fn distinct_departments(&mut self, skip: i64, limit: i64) -> Result<Vec<String>> {
        let departments = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT department FROM employees
             WHERE department IS NOT NULL
             ORDER BY department
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(departments)
    }

    #[instrument(skip(self), err)]
    pub async fn count_distinct_departments(&mut self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT department) FROM employees WHERE department IS NOT NULL",
        )
        .fetch_one(&mut *self.db)
        .await?;

        Ok(count)
    }

    /// Arithmetic mean of `salary` over the department, with an explicit
    /// 0.0 sentinel when no rows match.
    #[instrument(skip(self), err)]
    pub async fn average_salary(&mut self, department: &str) -> Result<f64> {
        let avg = sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(salary) FROM employees WHERE department = ?")
            .bind(department)
            .fetch_one(&mut *self.db)
            .await?;

        Ok(avg.unwrap_or(0.0))
    }

    /// The `cap` highest-salary employees, descending. The bounded set is
    /// what gets paginated, never the full table.
    #[instrument(skip(self), err)]
    pub async fn top_by_salary(&mut self, cap: i64) -> Result<Vec<EmployeeDBResponse>> {
        let employees = sqlx::query_as::<_, EmployeeDBResponse>(
            "SELECT * FROM employees ORDER BY salary DESC LIMIT ?",
        )
        .bind(cap)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(employees)
    }

    /// The `cap` most recently hired employees, newest first.
    #[instrument(skip(self), err)]
    pub async fn most_recent_hires(&mut self, cap: i64) -> Result<Vec<EmployeeDBResponse>> {
        let employees = sqlx::query_as::<_, EmployeeDBResponse>(
            "SELECT * FROM employees ORDER BY hire_date DESC LIMIT ?",
        )
        .bind(cap)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(employees)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Employees<'c> {
    type CreateRequest = EmployeeCreateDBRequest;
    type ReplaceRequest = EmployeeReplaceDBRequest;
    type Response = EmployeeDBResponse;
    type Id = EmployeeId;
    type Filter = EmployeeFilter;

    #[instrument(skip(self, request), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let employee = sqlx::query_as::<_, EmployeeDBResponse>(
            "INSERT INTO employees (id, name, department, salary, hire_date)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.department)
        .bind(request.salary)
        .bind(request.hire_date)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(employee)
    }

    #[instrument(skip(self), fields(employee_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let employee = sqlx::query_as::<_, EmployeeDBResponse>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(employee)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let employees = match &filter.department {
            Some(department) => {
                sqlx::query_as::<_, EmployeeDBResponse>(
                    "SELECT * FROM employees WHERE department = ?
                     ORDER BY created_at, id
                     LIMIT ? OFFSET ?",
                )
                .bind(department)
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, EmployeeDBResponse>(
                    "SELECT * FROM employees ORDER BY created_at, id LIMIT ? OFFSET ?",
                )
                .bind(filter.limit)
                .bind(filter.skip)
                .fetch_all(&mut *self.db)
                .await?
            }
        };

        Ok(employees)
    }

    #[instrument(skip(self, filter), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let count = match &filter.department {
            Some(department) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE department = ?")
                    .bind(department)
                    .fetch_one(&mut *self.db)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
                    .fetch_one(&mut *self.db)
                    .await?
            }
        };

        Ok(count)
    }

    #[instrument(skip(self, request), fields(employee_id = %abbrev_uuid(&id)), err)]
    async fn replace(&mut self, id: Self::Id, request: &Self::ReplaceRequest) -> Result<Self::Response> {
        // Full replace: every column is written, absent optionals become NULL
        let employee = sqlx::query_as::<_, EmployeeDBResponse>(
            "UPDATE employees SET
                name = ?,
                department = ?,
                salary = ?,
                hire_date = ?,
                updated_at = datetime('now')
             WHERE id = ?
             RETURNING *",
        )
        .bind(&request.name)
        .bind(&request.department)
        .bind(request.salary)
        .bind(request.hire_date)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(employee)
    }

    #[instrument(skip(self), fields(employee_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
