//! Request/response data structures for API communication.
//!
//! The decode side (untrusted input into a validated struct) is kept apart
//! from the encode side (struct to wire): `*Upsert` types deserialize and
//! validate request bodies, `*Response` types serialize rows for the wire.

pub mod employees;
pub mod members;
pub mod pagination;
pub mod predictions;
pub mod teams;

use serde::Serialize;
use utoipa::ToSchema;

/// Bare scalar wrapped the way the aggregate endpoints expect:
/// `{"data": <float>}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScalarResponse {
    pub data: f64,
}

/// Serde helper accepting both RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD HH:MM:SS` values (treated as UTC).
/// The original API's clients send the naive form.
pub(crate) mod flexible_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&raw, format) {
                return Ok(naive.and_utc());
            }
        }

        Err(serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
