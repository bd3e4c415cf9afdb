//! Database models for members.

use crate::types::{MemberId, TeamId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MemberDBResponse {
    pub id: MemberId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct MemberCreateDBRequest {
    pub name: String,
    pub team_id: Option<TeamId>,
}

/// Full-replace payload. An absent `team_id` detaches the member.
#[derive(Debug, Clone)]
pub struct MemberReplaceDBRequest {
    pub name: String,
    pub team_id: Option<TeamId>,
}
