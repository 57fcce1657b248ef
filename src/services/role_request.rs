//! Role request services.
//!
//! Requests are created in the `Concept` state; `start_role_request`
//! executes a concept synchronously.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::role_request::{
    NewRoleRequest, PatchRoleRequest, RoleRequest, RoleRequestState, UpdateRoleRequest,
};
use crate::repository::{
    AuditWriter, EntityEventWriter, IdentityReader, RoleRequestFilter, RoleRequestReader,
    RoleRequestWriter,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_change,
};

const ENTITY: &str = "role-request";
const GROUP: ResourceGroup = ResourceGroup::RoleRequest;

pub fn list_role_requests<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleRequestFilter,
) -> ServiceResult<(usize, Vec<RoleRequest>)>
where
    R: RoleRequestReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_role_requests(filter).map_err(ServiceError::from)
}

pub fn autocomplete_role_requests<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleRequestFilter,
) -> ServiceResult<(usize, Vec<RoleRequest>)>
where
    R: RoleRequestReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_role_requests(filter).map_err(ServiceError::from)
}

pub fn get_role_request<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<RoleRequest>
where
    R: RoleRequestReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_role_request(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_role_request<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_request: NewRoleRequest,
) -> ServiceResult<RoleRequest>
where
    R: RoleRequestWriter + IdentityReader + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    // The applicant must resolve to an existing identity.
    repo.get_identity(new_request.applicant_id)?
        .ok_or_else(|| not_found("identity", new_request.applicant_id))?;

    let request = repo.create_role_request(&new_request)?;
    record_change(repo, &user.username, ENTITY, request.id, Modification::Create)?;
    Ok(request)
}

pub fn update_role_request<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdateRoleRequest,
) -> ServiceResult<RoleRequest>
where
    R: RoleRequestWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let request = repo
        .update_role_request(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(request)
}

pub fn patch_role_request<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchRoleRequest,
) -> ServiceResult<RoleRequest>
where
    R: RoleRequestReader + RoleRequestWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_role_request(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    let request = repo
        .update_role_request(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(request)
}

pub fn delete_role_request<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: RoleRequestWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_role_request(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

/// Executes a concept request synchronously.
pub fn start_role_request<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<RoleRequest>
where
    R: RoleRequestReader + RoleRequestWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_role_request(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    if current.state != RoleRequestState::Concept {
        return Err(ServiceError::MethodNotAllowed(
            "role request has already been started".to_string(),
        ));
    }

    let updates = UpdateRoleRequest {
        state: RoleRequestState::Executed,
        description: current.description.clone(),
    };
    let request = repo
        .update_role_request(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        )
    }

    fn request(state: RoleRequestState) -> RoleRequest {
        RoleRequest {
            id: Uuid::new_v4(),
            applicant_id: Uuid::new_v4(),
            state,
            description: None,
            created_at: Utc::now().naive_utc(),
            modified_at: None,
        }
    }

    #[test]
    fn starting_an_executed_request_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_get_role_request()
            .returning(|id| Ok(Some(RoleRequest { id, ..request(RoleRequestState::Executed) })));

        let result = start_role_request(&repo, &admin(), Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::MethodNotAllowed(_))));
    }

    #[test]
    fn create_fails_when_applicant_is_unknown() {
        let mut repo = MockRepository::new();
        repo.expect_get_identity().returning(|_| Ok(None));

        let new_request = NewRoleRequest {
            applicant_id: Uuid::new_v4(),
            description: None,
        };
        let result = create_role_request(&repo, &admin(), new_request);
        assert!(matches!(result, Err(ServiceError::NotFound { entity: "identity", .. })));
    }
}
