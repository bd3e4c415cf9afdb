//! Entity tags for optimistic concurrency on single-entity endpoints.
//!
//! A tag is the base64url-encoded SHA-256 of the entity's serialized wire
//! representation, wrapped in quotes as a strong validator. `GET` responses
//! carry the tag in an `ETag` header; `PUT`/`DELETE` compare a supplied
//! `If-Match` header against the current tag and fail with 412 on mismatch.
//! A missing `If-Match` header is allowed (unconditional write).

use crate::errors::{Error, Result};
use axum::http::HeaderMap;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compute the entity tag for a serializable entity.
pub fn entity_tag<T: Serialize>(entity: &T) -> Result<String> {
    let bytes = serde_json::to_vec(entity).map_err(|e| Error::Internal {
        operation: format!("serialize entity for tagging: {e}"),
    })?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("\"{}\"", URL_SAFE_NO_PAD.encode(digest)))
}

/// Check an `If-Match` precondition against the current entity state.
///
/// No header means the request is unconditional and passes. `*` matches any
/// existing entity. Anything else must match the current tag exactly.
pub fn check_if_match<T: Serialize>(headers: &HeaderMap, current: &T) -> Result<()> {
    let Some(supplied) = headers.get(axum::http::header::IF_MATCH) else {
        return Ok(());
    };

    let supplied = supplied
        .to_str()
        .map_err(|_| Error::bad_request("If-Match header is not valid UTF-8"))?;

    if supplied.trim() == "*" {
        return Ok(());
    }

    let current_tag = entity_tag(current)?;
    // Clients may send a comma-separated list of tags
    let matches = supplied.split(',').map(str::trim).any(|tag| tag == current_tag);
    if matches { Ok(()) } else { Err(Error::PreconditionFailed) }
}
