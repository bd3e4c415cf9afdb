//! Database models for teams.

use crate::types::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamDBResponse {
    pub id: TeamId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TeamCreateDBRequest {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct TeamReplaceDBRequest {
    pub name: String,
}
