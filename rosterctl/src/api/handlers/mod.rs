//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for:
//! - Request validation and deserialization
//! - Business logic execution via database repositories
//! - Response serialization
//!
//! # Handler Modules
//!
//! - [`employees`]: Employee CRUD operations
//! - [`teams`]: Team CRUD operations
//! - [`members`]: Member CRUD operations
//! - [`departments`]: Distinct department listing and per-department rosters
//! - [`stats`]: Average salary and bounded top-N rankings
//! - [`predictions`]: Salary prediction from the loaded model artifact
//!
//! # Error Handling
//!
//! Handlers return [`crate::errors::Error`] which automatically converts to
//! appropriate HTTP status codes.

pub mod departments;
pub mod employees;
pub mod members;
pub mod predictions;
pub mod stats;
pub mod teams;

use crate::errors::Result;
use crate::etag;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Serialize `body` as JSON with its entity tag in an `ETag` header.
pub(crate) fn tagged_json<T: Serialize>(status: StatusCode, body: T) -> Result<Response> {
    let tag = etag::entity_tag(&body)?;
    Ok((status, [(header::ETAG, tag)], Json(body)).into_response())
}
