use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An automatic-role node: assigns a role by position in the tree.
///
/// Nodes are immutable after creation; recalculation happens by delete and
/// re-create, so update operations are rejected outright.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoleTreeNode {
    pub id: Uuid,
    pub role_id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewRoleTreeNode {
    pub role_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}
