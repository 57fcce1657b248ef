use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Bookkeeping record for a processed entity change. Services append one on
/// every mutation; operators inspect and prune them through the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EntityEvent {
    pub id: Uuid,
    pub event_type: EntityEventType,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub state: EntityEventState,
    pub result_message: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Serialized as its `Display` form so responses, filter parameters and the
/// stored column all carry the same string. Rows written by other tools keep
/// their literal value through [`EntityEventType::Other`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityEventType {
    Create,
    Update,
    Delete,
    PasswordChange,
    Other(String),
}

impl Serialize for EntityEventType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityEventType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(EntityEventType::from(String::deserialize(deserializer)?))
    }
}

/// Strict form used by the `eventType` filter parameter; unknown values are
/// rejected there instead of matching nothing.
impl std::str::FromStr for EntityEventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(EntityEventType::Create),
            "UPDATE" => Ok(EntityEventType::Update),
            "DELETE" => Ok(EntityEventType::Delete),
            "PASSWORD_CHANGE" => Ok(EntityEventType::PasswordChange),
            other => Err(format!("unknown entity event type: {other}")),
        }
    }
}

impl Display for EntityEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityEventType::Create => write!(f, "CREATE"),
            EntityEventType::Update => write!(f, "UPDATE"),
            EntityEventType::Delete => write!(f, "DELETE"),
            EntityEventType::PasswordChange => write!(f, "PASSWORD_CHANGE"),
            EntityEventType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for EntityEventType {
    fn from(s: &str) -> Self {
        match s {
            "CREATE" => EntityEventType::Create,
            "UPDATE" => EntityEventType::Update,
            "DELETE" => EntityEventType::Delete,
            "PASSWORD_CHANGE" => EntityEventType::PasswordChange,
            _ => EntityEventType::Other(s.to_string()),
        }
    }
}

impl From<String> for EntityEventType {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityEventState {
    Created,
    Executed,
    Failed,
}

impl Display for EntityEventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EntityEventState::Created => "CREATED",
            EntityEventState::Executed => "EXECUTED",
            EntityEventState::Failed => "FAILED",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EntityEventState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(EntityEventState::Created),
            "EXECUTED" => Ok(EntityEventState::Executed),
            "FAILED" => Ok(EntityEventState::Failed),
            other => Err(format!("unknown entity event state: {other}")),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewEntityEvent {
    pub event_type: EntityEventType,
    #[validate(length(min = 1, max = 255))]
    pub owner_type: String,
    pub owner_id: Uuid,
    pub state: EntityEventState,
    pub result_message: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateEntityEvent {
    pub state: EntityEventState,
    pub result_message: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchEntityEvent {
    pub state: Option<EntityEventState>,
    pub result_message: Option<String>,
}

impl PatchEntityEvent {
    pub fn apply(self, current: &EntityEvent) -> UpdateEntityEvent {
        UpdateEntityEvent {
            state: self.state.unwrap_or(current.state),
            result_message: self.result_message.or_else(|| current.result_message.clone()),
        }
    }
}
