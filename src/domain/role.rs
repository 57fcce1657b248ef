use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An assignable role.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub priority: i32,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewRole {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateRole {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub priority: i32,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchRole {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub disabled: Option<bool>,
    pub priority: Option<i32>,
}

impl PatchRole {
    pub fn apply(self, current: &Role) -> UpdateRole {
        UpdateRole {
            code: self.code.unwrap_or_else(|| current.code.clone()),
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.or_else(|| current.description.clone()),
            disabled: self.disabled.unwrap_or(current.disabled),
            priority: self.priority.unwrap_or(current.priority),
        }
    }
}
