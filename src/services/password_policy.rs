//! Password policy services.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::password_policy::{
    NewPasswordPolicy, PasswordPolicy, PatchPasswordPolicy, UpdatePasswordPolicy,
};
use crate::repository::{
    AuditWriter, EntityEventWriter, PasswordPolicyFilter, PasswordPolicyReader,
    PasswordPolicyWriter,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_change,
};

const ENTITY: &str = "password-policy";
const GROUP: ResourceGroup = ResourceGroup::PasswordPolicy;

pub fn list_password_policies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: PasswordPolicyFilter,
) -> ServiceResult<(usize, Vec<PasswordPolicy>)>
where
    R: PasswordPolicyReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_password_policies(filter).map_err(ServiceError::from)
}

pub fn autocomplete_password_policies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: PasswordPolicyFilter,
) -> ServiceResult<(usize, Vec<PasswordPolicy>)>
where
    R: PasswordPolicyReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_password_policies(filter).map_err(ServiceError::from)
}

pub fn get_password_policy<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<PasswordPolicy>
where
    R: PasswordPolicyReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_password_policy(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_password_policy<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_policy: NewPasswordPolicy,
) -> ServiceResult<PasswordPolicy>
where
    R: PasswordPolicyWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    if new_policy.max_length > 0 && new_policy.max_length < new_policy.min_length {
        return Err(ServiceError::Validation(
            "maximum length must not be smaller than minimum length".to_string(),
        ));
    }

    let policy = repo.create_password_policy(&new_policy)?;
    record_change(repo, &user.username, ENTITY, policy.id, Modification::Create)?;
    Ok(policy)
}

pub fn update_password_policy<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdatePasswordPolicy,
) -> ServiceResult<PasswordPolicy>
where
    R: PasswordPolicyWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    if updates.max_length > 0 && updates.max_length < updates.min_length {
        return Err(ServiceError::Validation(
            "maximum length must not be smaller than minimum length".to_string(),
        ));
    }

    let policy = repo
        .update_password_policy(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(policy)
}

pub fn patch_password_policy<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchPasswordPolicy,
) -> ServiceResult<PasswordPolicy>
where
    R: PasswordPolicyReader + PasswordPolicyWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_password_policy(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    if updates.max_length > 0 && updates.max_length < updates.min_length {
        return Err(ServiceError::Validation(
            "maximum length must not be smaller than minimum length".to_string(),
        ));
    }
    let policy = repo
        .update_password_policy(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(policy)
}

pub fn delete_password_policy<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: PasswordPolicyWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_password_policy(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        )
    }

    #[test]
    fn rejects_inverted_length_bounds() {
        let repo = MockRepository::new();
        let new_policy = NewPasswordPolicy {
            code: "p".into(),
            name: "P".into(),
            min_length: 12,
            max_length: 8,
            min_upper_char: 0,
            min_lower_char: 0,
            min_number: 0,
            min_special_char: 0,
            default_policy: false,
            disabled: false,
        };
        let result = create_password_policy(&repo, &admin(), new_policy);
        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
