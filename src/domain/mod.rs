//! Domain entities exchanged between repositories, services and routes.

use serde::Serialize;
use uuid::Uuid;

pub mod audit;
pub mod entity_event;
pub mod identity;
pub mod password_policy;
pub mod role;
pub mod role_request;
pub mod role_tree_node;
pub mod script;

/// Minimal projection returned by autocomplete endpoints.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResourceOption {
    pub id: Uuid,
    pub label: String,
}
