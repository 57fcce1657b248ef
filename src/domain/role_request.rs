use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A request to change an identity's assigned roles.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoleRequest {
    pub id: Uuid,
    pub applicant_id: Uuid,
    pub state: RoleRequestState,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

/// Lifecycle state of a role request. The serde form matches the
/// `Display`/`FromStr` form, so a state read from a response can be fed
/// back into the `state` filter parameter unchanged.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleRequestState {
    Concept,
    InProgress,
    Executed,
    Disapproved,
}

impl Display for RoleRequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoleRequestState::Concept => "CONCEPT",
            RoleRequestState::InProgress => "IN_PROGRESS",
            RoleRequestState::Executed => "EXECUTED",
            RoleRequestState::Disapproved => "DISAPPROVED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RoleRequestState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONCEPT" => Ok(RoleRequestState::Concept),
            "IN_PROGRESS" => Ok(RoleRequestState::InProgress),
            "EXECUTED" => Ok(RoleRequestState::Executed),
            "DISAPPROVED" => Ok(RoleRequestState::Disapproved),
            other => Err(format!("unknown role request state: {other}")),
        }
    }
}

/// Create payload; new requests always start in the `Concept` state.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewRoleRequest {
    pub applicant_id: Uuid,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub state: RoleRequestState,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchRoleRequest {
    pub state: Option<RoleRequestState>,
    pub description: Option<String>,
}

impl PatchRoleRequest {
    pub fn apply(self, current: &RoleRequest) -> UpdateRoleRequest {
        UpdateRoleRequest {
            state: self.state.unwrap_or(current.state),
            description: self.description.or_else(|| current.description.clone()),
        }
    }
}
