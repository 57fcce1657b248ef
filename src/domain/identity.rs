use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// One addressable person in the identity store.
///
/// The password hash is deliberately kept out of this struct; it never
/// leaves the repository layer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

/// Create payload. An initial password is optional; when present it is
/// hashed by the service before it reaches the repository.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewIdentity {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub password: Option<String>,
}

/// Full-replace payload for PUT.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateIdentity {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// Partial-update payload for PATCH; absent fields keep their value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchIdentity {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: Option<bool>,
}

impl PatchIdentity {
    /// Merges the patch over the current state into a full update.
    pub fn apply(self, current: &Identity) -> UpdateIdentity {
        UpdateIdentity {
            username: self.username.unwrap_or_else(|| current.username.clone()),
            first_name: self.first_name.or_else(|| current.first_name.clone()),
            last_name: self.last_name.or_else(|| current.last_name.clone()),
            email: self.email.or_else(|| current.email.clone()),
            disabled: self.disabled.unwrap_or(current.disabled),
        }
    }
}

/// Body of the public password-change endpoint.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1))]
    pub old_password: String,
    #[validate(length(min = 1))]
    pub new_password: String,
}
