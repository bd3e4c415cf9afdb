//! # rosterctl: Roster Management API
//!
//! `rosterctl` is a small REST backend for managing a company roster. It
//! exposes CRUD over employees, teams, and members, a handful of read-only
//! aggregates (distinct departments, average salary by department, top
//! earners, most recent hires), and a salary-prediction endpoint backed by
//! an offline-trained linear regression artifact.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses SQLite (via SQLx) for persistence. Each request
//! is handled independently: handlers open their own connection or
//! transaction, go through the repository layer in [`db`], and serialize
//! results with the wire types in [`api::models`]. There is no shared
//! mutable state beyond the connection pool; the salary estimator is loaded
//! once at startup and shared read-only.
//!
//! Pagination is page-number based with a uniform `{data, pagination}`
//! envelope; ranked endpoints compute a bounded top-N subset first and
//! paginate over that. Single-entity responses carry entity tags, and
//! `PUT`/`DELETE` honor `If-Match` preconditions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use rosterctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = rosterctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     rosterctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod estimator;
pub mod etag;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use crate::estimator::SalaryEstimator;
use crate::openapi::ApiDoc;
use axum::{
    Json, Router,
    routing::{get, post},
};
use bon::Builder;
pub use config::Config;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument, warn};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{EmployeeId, MemberId, TeamId};

/// Application state shared across all request handlers.
///
/// # Fields
///
/// - `db`: SQLite connection pool
/// - `config`: Application configuration loaded from file/environment
/// - `estimator`: Loaded salary model, absent when the artifact could not
///   be read (prediction then returns 503 while CRUD keeps serving)
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
    pub estimator: Option<Arc<SalaryEstimator>>,
}

/// Get the rosterctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Open the connection pool and run migrations.
///
/// The database file is created if missing, and foreign key enforcement is
/// switched on for every connection (SQLite defaults it off).
pub async fn connect_database(config: &Config) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    migrator().run(&pool).await?;

    Ok(pool)
}

/// Build the application router with all endpoints and middleware.
///
/// Collection routes keep the original API's trailing slash
/// (`/employees/`, not `/employees`) for client compatibility.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Employees
        .route(
            "/employees/",
            get(api::handlers::employees::list_employees).post(api::handlers::employees::create_employee),
        )
        .route(
            "/employees/{id}",
            get(api::handlers::employees::get_employee)
                .put(api::handlers::employees::replace_employee)
                .delete(api::handlers::employees::delete_employee),
        )
        // Departments and aggregates
        .route("/departments/", get(api::handlers::departments::list_departments))
        .route("/departments/{name}", get(api::handlers::departments::employees_in_department))
        .route("/average_salary/{department}", get(api::handlers::stats::average_salary))
        .route("/top_earners/", get(api::handlers::stats::top_earners))
        .route("/most_recent_hires/", get(api::handlers::stats::most_recent_hires))
        // Salary prediction
        .route("/predict_salary/", post(api::handlers::predictions::predict_salary))
        // Teams
        .route(
            "/teams/",
            get(api::handlers::teams::list_teams).post(api::handlers::teams::create_team),
        )
        .route(
            "/teams/{id}",
            get(api::handlers::teams::get_team)
                .put(api::handlers::teams::replace_team)
                .delete(api::handlers::teams::delete_team),
        )
        // Members
        .route(
            "/members/",
            get(api::handlers::members::list_members).post(api::handlers::members::create_member),
        )
        .route(
            "/members/{id}",
            get(api::handlers::members::get_member)
                .put(api::handlers::members::replace_member)
                .delete(api::handlers::members::delete_member),
        )
        // OpenAPI
        .route("/api-spec.json", get(|| async { Json(ApiDoc::openapi()) }))
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// The assembled application: pool, router, and configuration.
///
/// Construction ([`Application::new`]) opens the database, runs migrations,
/// and loads the salary model artifact; [`Application::serve`] binds a TCP
/// listener and runs until the shutdown future resolves.
pub struct Application {
    router: Router,
    config: Config,
    pool: SqlitePool,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = connect_database(&config).await?;
        Self::with_pool(config, pool)
    }

    /// Build the application over an existing (already migrated) pool.
    /// Used by tests to inject per-test databases.
    pub fn with_pool(config: Config, pool: SqlitePool) -> anyhow::Result<Self> {
        // Artifact failures disable only the prediction endpoint
        let estimator = match SalaryEstimator::load(&config.model_path) {
            Ok(estimator) => Some(Arc::new(estimator)),
            Err(e) => {
                warn!("Salary prediction disabled: {e:#}");
                None
            }
        };

        let state = AppState::builder()
            .db(pool.clone())
            .config(config.clone())
            .maybe_estimator(estimator)
            .build();

        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Roster API listening on http://{}, docs at http://localhost:{}/docs",
            bind_addr, self.config.port
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
