//! Shared fixtures for integration tests.

use crate::estimator::{SalaryEstimator, TrainingSample, fit};
use crate::types::DEPARTMENTS;
use crate::{AppState, Config, build_router};
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Configuration used by integration tests: small page size and ranking
/// cap so pagination edges are easy to hit, and a model path that does not
/// exist (tests that need an estimator inject one directly).
pub fn create_test_config() -> Config {
    Config {
        per_page: 10,
        ranking_limit: 3,
        model_path: "/nonexistent/salary_model.json".into(),
        ..Config::default()
    }
}

/// Spin up a test server without a salary model.
pub fn create_test_server(pool: SqlitePool) -> TestServer {
    create_test_server_with(pool, create_test_config(), None)
}

/// Spin up a test server with a model fitted on simple synthetic data.
pub fn create_test_server_with_estimator(pool: SqlitePool) -> TestServer {
    let samples: Vec<TrainingSample> = DEPARTMENTS
        .iter()
        .enumerate()
        .flat_map(|(idx, dept)| {
            [2016, 2020, 2024].map(|year| TrainingSample {
                department: dept.to_string(),
                hire_date: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
                salary: 40_000.0 + 5_000.0 * idx as f64 + 500.0 * (year - 2015) as f64,
            })
        })
        .collect();
    let estimator = SalaryEstimator::from_model(fit(&samples).expect("synthetic fit should succeed"));

    create_test_server_with(pool, create_test_config(), Some(Arc::new(estimator)))
}

pub fn create_test_server_with(pool: SqlitePool, config: Config, estimator: Option<Arc<SalaryEstimator>>) -> TestServer {
    let state = AppState::builder().db(pool).config(config).maybe_estimator(estimator).build();
    TestServer::new(build_router(state)).expect("failed to start test server")
}

/// POST an employee and return the created entity.
pub async fn create_employee(server: &TestServer, name: &str, department: &str, salary: f64, hire_date: &str) -> Value {
    let response = server
        .post("/employees/")
        .json(&json!({
            "name": name,
            "department": department,
            "salary": salary,
            "hire_date": hire_date,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
