//! Business services: every function checks the caller's authorities first,
//! then delegates to the repository. The authority gate runs before any data
//! access, so a denied caller cannot probe for resource existence.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup, check_any_authority};
use crate::domain::audit::{Modification, NewAuditEntry};
use crate::domain::entity_event::{EntityEventState, EntityEventType, NewEntityEvent};
use crate::repository::errors::RepositoryError;
use crate::repository::{AuditWriter, EntityEventWriter};

pub mod audit;
pub mod entity_event;
pub mod identity;
pub mod password_policy;
pub mod registry;
pub mod role;
pub mod role_request;
pub mod role_tree_node;
pub mod script;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("access denied")]
    Forbidden,

    #[error("{entity} not found ({identifier})")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    Validation(String),

    #[error("crypto failure: {0}")]
    Crypto(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Builds the standard not-found error for one resource instance.
pub(crate) fn not_found(entity: &'static str, id: Uuid) -> ServiceError {
    ServiceError::NotFound {
        entity,
        identifier: id.to_string(),
    }
}

/// Maps a repository `NotFound` onto the resource-aware service error.
pub(crate) fn map_not_found(err: RepositoryError, entity: &'static str, id: Uuid) -> ServiceError {
    match err {
        RepositoryError::NotFound => not_found(entity, id),
        other => ServiceError::Repository(other),
    }
}

/// OR-of-authorities gate; any single match grants access.
pub(crate) fn ensure_any(
    user: &AuthenticatedUser,
    group: ResourceGroup,
    permissions: &[BasePermission],
) -> ServiceResult<()> {
    if check_any_authority(&user.authorities, group, permissions) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}

/// Appends an audit entry for a mutation.
pub(crate) fn record_audit<R>(
    repo: &R,
    modifier: &str,
    entity_type: &'static str,
    entity_id: Uuid,
    modification: Modification,
) -> ServiceResult<()>
where
    R: AuditWriter + ?Sized,
{
    repo.create_audit_entry(&NewAuditEntry {
        entity_type: entity_type.to_string(),
        entity_id,
        modification,
        modifier: modifier.to_string(),
        modified_at: Utc::now().naive_utc(),
    })?;
    Ok(())
}

/// Appends the audit entry plus the matching entity event for a mutation.
pub(crate) fn record_change<R>(
    repo: &R,
    modifier: &str,
    entity_type: &'static str,
    entity_id: Uuid,
    modification: Modification,
) -> ServiceResult<()>
where
    R: AuditWriter + EntityEventWriter + ?Sized,
{
    record_audit(repo, modifier, entity_type, entity_id, modification)?;

    let event_type = match modification {
        Modification::Create => EntityEventType::Create,
        Modification::Update => EntityEventType::Update,
        Modification::Delete => EntityEventType::Delete,
    };
    repo.create_entity_event(&NewEntityEvent {
        event_type,
        owner_type: entity_type.to_string(),
        owner_id: entity_id,
        state: EntityEventState::Executed,
        result_message: None,
    })?;
    Ok(())
}
