//! Identity services, including the public password-change flow.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::entity_event::{EntityEventState, EntityEventType, NewEntityEvent};
use crate::domain::identity::{Identity, NewIdentity, PasswordChange, PatchIdentity, UpdateIdentity};
use crate::repository::{
    AuditWriter, EntityEventWriter, IdentityFilter, IdentityReader, IdentityWriter,
    PasswordPolicyReader,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_audit, record_change,
};

const ENTITY: &str = "identity";
const GROUP: ResourceGroup = ResourceGroup::Identity;

pub fn list_identities<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: IdentityFilter,
) -> ServiceResult<(usize, Vec<Identity>)>
where
    R: IdentityReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_identities(filter).map_err(ServiceError::from)
}

pub fn autocomplete_identities<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: IdentityFilter,
) -> ServiceResult<(usize, Vec<Identity>)>
where
    R: IdentityReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_identities(filter).map_err(ServiceError::from)
}

pub fn get_identity<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<Identity>
where
    R: IdentityReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_identity(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_identity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_identity: NewIdentity,
) -> ServiceResult<Identity>
where
    R: IdentityWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    let password_hash = new_identity
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let identity = repo.create_identity(&new_identity, password_hash)?;
    record_change(repo, &user.username, ENTITY, identity.id, Modification::Create)?;
    Ok(identity)
}

pub fn update_identity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdateIdentity,
) -> ServiceResult<Identity>
where
    R: IdentityWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let identity = repo
        .update_identity(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(identity)
}

pub fn patch_identity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchIdentity,
) -> ServiceResult<Identity>
where
    R: IdentityReader + IdentityWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_identity(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    let identity = repo
        .update_identity(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(identity)
}

pub fn delete_identity<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: IdentityWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_identity(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

/// Enables or disables one identity.
pub fn set_identity_disabled<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    disabled: bool,
) -> ServiceResult<Identity>
where
    R: IdentityWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let identity = repo
        .set_identity_disabled(id, disabled)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(identity)
}

/// Public password change: verifies the old password and enforces the
/// default password policy. No authority gate; the caller proves knowledge
/// of the current password instead.
pub fn change_password<R>(repo: &R, id: Uuid, change: &PasswordChange) -> ServiceResult<()>
where
    R: IdentityReader + IdentityWriter + PasswordPolicyReader + AuditWriter + EntityEventWriter + ?Sized,
{
    let identity = repo.get_identity(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    if identity.disabled {
        return Err(ServiceError::Validation(
            "password change is not allowed for a disabled identity".to_string(),
        ));
    }

    let stored = repo
        .identity_password_hash(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?
        .ok_or_else(|| ServiceError::Validation("identity has no password set".to_string()))?;

    if !verify_password(&change.old_password, &stored)? {
        return Err(ServiceError::Validation(
            "old password does not match".to_string(),
        ));
    }

    if let Some(policy) = repo.get_default_password_policy()? {
        policy.check(&change.new_password).map_err(ServiceError::Validation)?;
    }

    let hash = hash_password(&change.new_password)?;
    repo.set_identity_password(id, &hash)?;

    record_audit(repo, &identity.username, ENTITY, id, Modification::Update)?;
    repo.create_entity_event(&NewEntityEvent {
        event_type: EntityEventType::PasswordChange,
        owner_type: ENTITY.to_string(),
        owner_id: id,
        state: EntityEventState::Executed,
        result_message: None,
    })?;
    Ok(())
}

/// Hash a plaintext password with Argon2id in PHC string format.
fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Crypto(format!("hashing failed: {e}")))
}

/// Verify a plaintext password against a stored Argon2id hash.
fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    let parsed = argon2::PasswordHash::new(hash)
        .map_err(|e| ServiceError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(ServiceError::Crypto(format!("verify error: {e}"))),
    }
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

    fn reader_only() -> AuthenticatedUser {
        AuthenticatedUser::new(Uuid::new_v4(), "reader", vec!["IDENTITY_READ".to_string()])
    }

    #[test]
    fn forbidden_before_repository_access() {
        // The mock has no expectations; a repository call would panic.
        let repo = MockRepository::new();
        let user = reader_only();
        let result = delete_identity(&repo, &user, Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn get_missing_identity_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_identity().returning(|_| Ok(None));
        let user = admin();
        let result = get_identity(&repo, &user, Uuid::new_v4());
        assert!(matches!(result, Err(ServiceError::NotFound { entity: "identity", .. })));
    }

    #[test]
    fn password_roundtrip() {
        let hash = hash_password("S3cret!pass").unwrap();
        assert!(verify_password("S3cret!pass", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }
}
