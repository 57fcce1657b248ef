//! Automatic-role (role tree node) services.
//!
//! Nodes are immutable: any update attempt is rejected with a
//! method-not-allowed error, mirroring the recalculation-by-recreate model.

use uuid::Uuid;

use crate::auth::{AuthenticatedUser, BasePermission, ResourceGroup};
use crate::domain::audit::Modification;
use crate::domain::role_tree_node::{NewRoleTreeNode, RoleTreeNode};
use crate::repository::{
    AuditWriter, EntityEventWriter, RoleReader, RoleTreeNodeFilter, RoleTreeNodeReader,
    RoleTreeNodeWriter,
};
use crate::services::{
    ServiceError, ServiceResult, ensure_any, map_not_found, not_found, record_change,
};

const ENTITY: &str = "role-tree-node";
const GROUP: ResourceGroup = ResourceGroup::RoleTreeNode;

pub fn list_role_tree_nodes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleTreeNodeFilter,
) -> ServiceResult<(usize, Vec<RoleTreeNode>)>
where
    R: RoleTreeNodeReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.list_role_tree_nodes(filter).map_err(ServiceError::from)
}

pub fn autocomplete_role_tree_nodes<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: RoleTreeNodeFilter,
) -> ServiceResult<(usize, Vec<RoleTreeNode>)>
where
    R: RoleTreeNodeReader + ?Sized,
{
    ensure_any(
        user,
        GROUP,
        &[BasePermission::Autocomplete, BasePermission::Read],
    )?;
    repo.list_role_tree_nodes(filter).map_err(ServiceError::from)
}

pub fn get_role_tree_node<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: Uuid,
) -> ServiceResult<RoleTreeNode>
where
    R: RoleTreeNodeReader + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    repo.get_role_tree_node(id)?.ok_or_else(|| not_found(ENTITY, id))
}

pub fn create_role_tree_node<R>(
    repo: &R,
    user: &AuthenticatedUser,
    new_node: NewRoleTreeNode,
) -> ServiceResult<RoleTreeNode>
where
    R: RoleTreeNodeReader + RoleTreeNodeWriter + RoleReader + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Create])?;

    // The referenced role must exist.
    repo.get_role(new_node.role_id)?
        .ok_or_else(|| not_found("role", new_node.role_id))?;

    // Re-posting an existing automatic role is an update in disguise.
    let (_, existing) =
        repo.list_role_tree_nodes(RoleTreeNodeFilter::new().role_id(new_node.role_id))?;
    if existing.iter().any(|node| node.name == new_node.name) {
        return Err(ServiceError::MethodNotAllowed(
            "Automatic role update is not supported".to_string(),
        ));
    }

    let node = repo.create_role_tree_node(&new_node)?;
    record_change(repo, &user.username, ENTITY, node.id, Modification::Create)?;
    Ok(node)
}

/// Automatic roles cannot be modified in place.
pub fn update_role_tree_node(user: &AuthenticatedUser) -> ServiceResult<RoleTreeNode> {
    ensure_any(user, GROUP, &[BasePermission::Update])?;
    Err(ServiceError::MethodNotAllowed(
        "Automatic role update is not supported".to_string(),
    ))
}

pub fn delete_role_tree_node<R>(repo: &R, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>
where
    R: RoleTreeNodeWriter + AuditWriter + EntityEventWriter + ?Sized,
{
    ensure_any(user, GROUP, &[BasePermission::Delete])?;

    repo.delete_role_tree_node(id)
        .map_err(|e| map_not_found(e, ENTITY, id))?;
    record_change(repo, &user.username, ENTITY, id, Modification::Delete)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    #[test]
    fn update_is_always_method_not_allowed() {
        let user = AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        );
        assert!(matches!(
            update_role_tree_node(&user),
            Err(ServiceError::MethodNotAllowed(_))
        ));
    }

    #[test]
    fn update_without_authority_is_forbidden() {
        // Access check still precedes the method-not-allowed rejection.
        let user = AuthenticatedUser::new(Uuid::new_v4(), "nobody", vec![]);
        assert!(matches!(
            update_role_tree_node(&user),
            Err(ServiceError::Forbidden)
        ));
    }

    #[test]
    fn reposting_an_existing_node_is_method_not_allowed() {
        use chrono::Utc;
        use crate::domain::role::Role;

        let role_id = Uuid::new_v4();
        let mut repo = MockRepository::new();
        repo.expect_get_role().returning(move |id| {
            Ok(Some(Role {
                id,
                code: "r".into(),
                name: "r".into(),
                description: None,
                disabled: false,
                priority: 0,
                created_at: Utc::now().naive_utc(),
                modified_at: None,
            }))
        });
        repo.expect_list_role_tree_nodes().returning(move |_| {
            Ok((
                1,
                vec![RoleTreeNode {
                    id: Uuid::new_v4(),
                    role_id,
                    name: "node".into(),
                    created_at: Utc::now().naive_utc(),
                }],
            ))
        });

        let user = AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![crate::auth::APP_ADMIN.to_string()],
        );
        let result = create_role_tree_node(
            &repo,
            &user,
            NewRoleTreeNode {
                role_id,
                name: "node".into(),
            },
        );
        assert!(matches!(result, Err(ServiceError::MethodNotAllowed(_))));
    }
}
