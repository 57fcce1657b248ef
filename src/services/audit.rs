//! Audit trail services. The trail is read-only through the API; entries are
//! appended internally by the other services.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::AuditEntry;
use crate::repository::{AuditFilter, AuditReader};
use crate::services::{ServiceError, ServiceResult, ensure_any, not_found};

const ENTITY: &str = "audit";
const GROUP: ResourceGroup = ResourceGroup::Audit;

pub fn list_audit_entries<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: AuditFilter,
) -> ServiceResult<(usize, Vec<AuditEntry>)>
where
    R: AuditReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_audit_entries(filter).map_err(ServiceError::from)
}

pub fn autocomplete_audit_entries<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: AuditFilter,
) -> ServiceResult<(usize, Vec<AuditEntry>)>
where
    R: AuditReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_audit_entries(filter).map_err(ServiceError::from)
}

pub fn get_audit_entry<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<AuditEntry>
where
    R: AuditReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_audit_entry(id)?.ok_or_else(|| not_found(ENTITY, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn listing_requires_read_authority() {
        let repo = MockRepository::new();
        let user = AuthenticatedUser::new(Uuid::new_v4(), "nobody", vec![]);
        let result = list_audit_entries(&repo, &user, AuditFilter::new());
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
