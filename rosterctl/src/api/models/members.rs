//! API request/response models for members.

use super::pagination::PageQuery;
use crate::db::models::members::{MemberCreateDBRequest, MemberDBResponse, MemberReplaceDBRequest};
use crate::types::{MemberId, TeamId};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for listing members
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListMembersQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: PageQuery,

    /// Only members of this team
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub team_id: Option<TeamId>,
}

/// Request body for creating or replacing a member.
///
/// PUT is a full replace: an omitted `team_id` detaches the member from
/// its team.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MemberUpsert {
    #[schema(example = "Grace Hopper")]
    pub name: String,
    /// Team this member belongs to, if any
    #[schema(value_type = Option<String>, format = "uuid")]
    pub team_id: Option<TeamId>,
}

impl From<MemberUpsert> for MemberCreateDBRequest {
    fn from(body: MemberUpsert) -> Self {
        Self {
            name: body.name,
            team_id: body.team_id,
        }
    }
}

impl From<MemberUpsert> for MemberReplaceDBRequest {
    fn from(body: MemberUpsert) -> Self {
        Self {
            name: body.name,
            team_id: body.team_id,
        }
    }
}

/// Member details returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MemberId,
    pub name: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub team_id: Option<TeamId>,
}

impl From<MemberDBResponse> for MemberResponse {
    fn from(db: MemberDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            team_id: db.team_id,
        }
    }
}
