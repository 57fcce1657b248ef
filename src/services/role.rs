//! Role services.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::role::{NewRole, PatchRole, Role, UpdateRole};
use crate::repository::{AuditWriter, EntityEventWriter, RoleFilter, RoleReader, RoleWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_change,
};

const ENTITY: &str = "role";
const GROUP: ResourceGroup = ResourceGroup::Role;

pub fn list_roles<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleFilter,
) -> ServiceResult<(usize, Vec<Role>)>
where
    R: RoleReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_roles(filter).map_err(ServiceError::from)
}

pub fn autocomplete_roles<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleFilter,
) -> ServiceResult<(usize, Vec<Role>)>
where
    R: RoleReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_roles(filter).map_err(ServiceError::from)
}

pub fn get_role<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<Role>
where
    R: RoleReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_role(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_role<R>(repo: &R, user: &AuthenticatedUser, new_role: NewRole) -> ServiceResult<Role>
where
    R: RoleWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    let role = repo.create_role(&new_role)?;
    record_change(repo, &user.username, ENTITY, role.id, Modification::Create)?;
    Ok(role)
}

pub fn update_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdateRole,
) -> ServiceResult<Role>
where
    R: RoleWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let role = repo
        .update_role(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(role)
}

pub fn patch_role<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchRole,
) -> ServiceResult<Role>
where
    R: RoleReader + RoleWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_role(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    let role = repo
        .update_role(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(role)
}

pub fn delete_role<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: RoleWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_role(id).map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}
