//! API request/response models for teams.

use super::pagination::PageQuery;
use crate::db::models::teams::{TeamCreateDBRequest, TeamDBResponse, TeamReplaceDBRequest};
use crate::types::{MemberId, TeamId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing teams
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListTeamsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PageQuery,

    /// Exact-match name filter
    pub name: Option<String>,

    /// Only teams this member belongs to
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub member_id: Option<MemberId>,
}

/// Request body for creating or replacing a team.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamUpsert {
    #[schema(example = "Platform")]
    pub name: String,
}

impl From<TeamUpsert> for TeamCreateDBRequest {
    fn from(body: TeamUpsert) -> Self {
        Self { name: body.name }
    }
}

impl From<TeamUpsert> for TeamReplaceDBRequest {
    fn from(body: TeamUpsert) -> Self {
        Self { name: body.name }
    }
}

/// Team details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: TeamId,
    pub name: String,
}

impl From<TeamDBResponse> for TeamResponse {
    fn from(db: TeamDBResponse) -> Self {
        Self { id: db.id, name: db.name }
    }
}
