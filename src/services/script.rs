//! Script services. `script_file` serves the raw script body for download.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::script::{NewScript, PatchScript, Script, UpdateScript};
use crate::repository::{AuditWriter, EntityEventWriter, ScriptFilter, ScriptReader, ScriptWriter};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_change,
};

const ENTITY: &str = "script";
const GROUP: ResourceGroup = ResourceGroup::Script;

pub fn list_scripts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: ScriptFilter,
) -> ServiceResult<(usize, Vec<Script>)>
where
    R: ScriptReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_scripts(filter).map_err(ServiceError::from)
}

pub fn autocomplete_scripts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: ScriptFilter,
) -> ServiceResult<(usize, Vec<Script>)>
where
    R: ScriptReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_scripts(filter).map_err(ServiceError::from)
}

pub fn get_script<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<Script>
where
    R: ScriptReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_script(id)?.ok_or_else(|| not_found(ENTITY, id))
}

/// Raw script body plus a filename derived from the script code.
pub fn script_file<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<(String, String)>
where
    R: ScriptReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    let script = repo.get_script(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let filename = format!("{}.groovy", script.code);
    Ok((filename, script.script))
}

pub fn create_script<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_script: NewScript,
) -> ServiceResult<Script>
where
    R: ScriptWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    let script = repo.create_script(&new_script)?;
    record_change(repo, &user.username, ENTITY, script.id, Modification::Create)?;
    Ok(script)
}

pub fn update_script<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    updates: UpdateScript,
) -> ServiceResult<Script>
where
    R: ScriptWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let script = repo
        .update_script(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(script)
}

pub fn patch_script<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
    patch: PatchScript,
) -> ServiceResult<Script>
where
    R: ScriptReader + ScriptWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Update])?;

    let current = repo.get_script(id)?.ok_or_else(|| not_found(ENTITY, id))?;
    let updates = patch.apply(&current);
    let script = repo
        .update_script(id, &updates)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Update)?;
    Ok(script)
}

pub fn delete_script<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: ScriptWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_script(id).map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::script::ScriptCategory;
    use crate::repository::mock::MockRepository;

    #[test]
    fn file_name_follows_script_code() {
        let mut repo = MockRepository::new();
        repo.expect_get_script().returning(|id| {
            Ok(Some(Script {
                id,
                code: "sync-hr".into(),
                name: "HR sync".into(),
                category: ScriptCategory::System,
                script: "return true".into(),
                description: None,
                created_at: Utc::now().naive_utc(),
                modified_at: None,
            }))
        });

        let user = AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        );
        let (filename, body) = script_file(&repo, &user, Uuid::new_v4()).unwrap();
        assert_eq!(filename, "sync-hr.groovy");
        assert_eq!(body, "return true");
    }
}
