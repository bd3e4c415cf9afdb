//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite.
//! It follows the repository pattern: handlers never touch SQL directly,
//! they go through a repository created from a transaction.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD and aggregate queries
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! Migrations live in `migrations/` and are run at startup via
//! [`crate::migrator`] (and automatically by `#[sqlx::test]`).

pub mod errors;
pub mod handlers;
pub mod models;
