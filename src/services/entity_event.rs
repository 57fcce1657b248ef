//! Entity event services.
//!
//! Mutations here record audit entries only; writing a matching entity event
//! for a change to the event table itself would be self-referential.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::entity_event::{
    EntityEvent, NewEntityEvent, PatchEntityEvent, UpdateEntityEvent,
};
use crate::repository::{AuditWriter, EntityEventFilter, EntityEventReader, EntityEventWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_audit,
};

const ENTITY: &str = "entity-event";
const GROUP: ResourceGroup = ResourceGroup::EntityEvent;

pub fn list_entity_events<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: EntityEventFilter,
) -> ServiceResult<(usize, Vec<EntityEvent>)>
where
    R: EntityEventReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_entity_events(filter).map_err(ServiceError::from)
}

pub fn autocomplete_entity_events<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: EntityEventFilter,
) -> ServiceResult<(usize, Vec<EntityEvent>)>
where
    R: EntityEventReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_entity_events(filter).map_err(ServiceError::from)
}

pub fn get_entity_event<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<EntityEvent>
where
    R: EntityEventReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_entity_event(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_entity_event<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_event: NewEntityEvent,
) -> ServiceResult<EntityEvent>
where
    R: EntityEventWriter + AuditWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    let event = repo.create_entity_event(&new_event)?;
    record_audit(repo, &user.username, ENTITY, event.id, Modification::Create)?;
    Ok(event)
}

pub fn update_entity_event<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdateEntityEvent,
) -> ServiceResult<EntityEvent>
where
    R: EntityEventWriter + AuditWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let event = repo
        .update_entity_event(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_audit(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(event)
}

pub fn patch_entity_event<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchEntityEvent,
) -> ServiceResult<EntityEvent>
where
    R: EntityEventReader + EntityEventWriter + AuditWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_entity_event(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    let event = repo
        .update_entity_event(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_audit(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(event)
}

pub fn delete_entity_event<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: EntityEventWriter + AuditWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_entity_event(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_audit(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

/// Deletes every event matching the filter, returning the count.
pub fn bulk_delete_entity_events<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: EntityEventFilter,
) -> ServiceResult<usize>
where
    R: EntityEventWriter + AuditWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;
    repo.delete_entity_events(filter).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn bulk_delete_requires_delete_authority() {
        let repo = MockRepository::new();
        let user = AuthenticatedUser::new(
            Uuid::new_v4(),
            "reader",
            vec!["ENTITYEVENT_READ".to_string()],
        );
        let result = bulk_delete_entity_events(&repo, &user, EntityEventFilter::new());
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn bulk_delete_reports_removed_count() {
        let mut repo = MockRepository::new();
        repo.expect_delete_entity_events().returning(|_| Ok(3));
        let user = AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        );
        let deleted = bulk_delete_entity_events(&repo, &user, EntityEventFilter::new()).unwrap();
        assert_eq!(deleted, 3);
    }
}
