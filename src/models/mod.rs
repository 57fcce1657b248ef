//! Diesel row structs mirroring `schema.rs`, plus conversions into the
//! domain entities. Uuids are stored as text in SQLite, so conversions are
//! fallible.

use thiserror::Error;

/// Conversion failure for rows holding malformed uuids or enum values.
#[derive(Debug, Error)]
pub enum RowConversionError {
    #[error("invalid uuid: {0}")]
    Uuid(#[from] uuid::Error),
    #[error("{0}")]
    Value(String),
}

pub mod audit;
pub mod config;
pub mod entity_event;
pub mod identity;
pub mod password_policy;
pub mod role;
pub mod role_request;
pub mod role_tree_node;
pub mod script;
