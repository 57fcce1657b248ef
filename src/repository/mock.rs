//! Mock repository implementations for isolating services in tests.

use mockall::mock;
use uuid::Uuid;

use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::entity_event::{EntityEvent, NewEntityEvent, UpdateEntityEvent};
use crate::domain::identity::{Identity, NewIdentity, UpdateIdentity};
use crate::domain::password_policy::{NewPasswordPolicy, PasswordPolicy, UpdatePasswordPolicy};
use crate::domain::role::{NewRole, Role, UpdateRole};
use crate::domain::role_request::{NewRoleRequest, RoleRequest, UpdateRoleRequest};
use crate::domain::role_tree_node::{NewRoleTreeNode, RoleTreeNode};
use crate::domain::script::{NewScript, Script, UpdateScript};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuditFilter, AuditReader, AuditWriter, EntityEventFilter, EntityEventReader,
    EntityEventWriter, IdentityFilter, IdentityReader, IdentityWriter, PasswordPolicyFilter,
    PasswordPolicyReader, PasswordPolicyWriter, RoleFilter, RoleReader, RoleRequestFilter,
    RoleRequestReader, RoleRequestWriter, RoleTreeNodeFilter, RoleTreeNodeReader,
    RoleTreeNodeWriter, RoleWriter, ScriptFilter, ScriptReader, ScriptWriter,
};

mock! {
    pub Repository {}

    impl IdentityReader for Repository {
        fn get_identity(&self, id: Uuid) -> RepositoryResult<Option<Identity>>;
        fn get_identity_by_username(&self, username: &str) -> RepositoryResult<Option<Identity>>;
        fn list_identities(&self, filter: IdentityFilter) -> RepositoryResult<(usize, Vec<Identity>)>;
        fn identity_password_hash(&self, id: Uuid) -> RepositoryResult<Option<String>>;
    }

    impl IdentityWriter for Repository {
        fn create_identity(
            &self,
            new_identity: &NewIdentity,
            password_hash: Option<String>,
        ) -> RepositoryResult<Identity>;
        fn update_identity(&self, id: Uuid, updates: &UpdateIdentity) -> RepositoryResult<Identity>;
        fn set_identity_disabled(&self, id: Uuid, disabled: bool) -> RepositoryResult<Identity>;
        fn set_identity_password(&self, id: Uuid, password_hash: &str) -> RepositoryResult<()>;
        fn delete_identity(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl RoleReader for Repository {
        fn get_role(&self, id: Uuid) -> RepositoryResult<Option<Role>>;
        fn list_roles(&self, filter: RoleFilter) -> RepositoryResult<(usize, Vec<Role>)>;
    }

    impl RoleWriter for Repository {
        fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
        fn update_role(&self, id: Uuid, updates: &UpdateRole) -> RepositoryResult<Role>;
        fn delete_role(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl RoleRequestReader for Repository {
        fn get_role_request(&self, id: Uuid) -> RepositoryResult<Option<RoleRequest>>;
        fn list_role_requests(
            &self,
            filter: RoleRequestFilter,
        ) -> RepositoryResult<(usize, Vec<RoleRequest>)>;
    }

    impl RoleRequestWriter for Repository {
        fn create_role_request(&self, new_request: &NewRoleRequest) -> RepositoryResult<RoleRequest>;
        fn update_role_request(
            &self,
            id: Uuid,
            updates: &UpdateRoleRequest,
        ) -> RepositoryResult<RoleRequest>;
        fn delete_role_request(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl RoleTreeNodeReader for Repository {
        fn get_role_tree_node(&self, id: Uuid) -> RepositoryResult<Option<RoleTreeNode>>;
        fn list_role_tree_nodes(
            &self,
            filter: RoleTreeNodeFilter,
        ) -> RepositoryResult<(usize, Vec<RoleTreeNode>)>;
    }

    impl RoleTreeNodeWriter for Repository {
        fn create_role_tree_node(&self, new_node: &NewRoleTreeNode) -> RepositoryResult<RoleTreeNode>;
        fn delete_role_tree_node(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl AuditReader for Repository {
        fn get_audit_entry(&self, id: Uuid) -> RepositoryResult<Option<AuditEntry>>;
        fn list_audit_entries(&self, filter: AuditFilter) -> RepositoryResult<(usize, Vec<AuditEntry>)>;
    }

    impl AuditWriter for Repository {
        fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry>;
    }

    impl PasswordPolicyReader for Repository {
        fn get_password_policy(&self, id: Uuid) -> RepositoryResult<Option<PasswordPolicy>>;
        fn get_default_password_policy(&self) -> RepositoryResult<Option<PasswordPolicy>>;
        fn list_password_policies(
            &self,
            filter: PasswordPolicyFilter,
        ) -> RepositoryResult<(usize, Vec<PasswordPolicy>)>;
    }

    impl PasswordPolicyWriter for Repository {
        fn create_password_policy(
            &self,
            new_policy: &NewPasswordPolicy,
        ) -> RepositoryResult<PasswordPolicy>;
        fn update_password_policy(
            &self,
            id: Uuid,
            updates: &UpdatePasswordPolicy,
        ) -> RepositoryResult<PasswordPolicy>;
        fn delete_password_policy(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl ScriptReader for Repository {
        fn get_script(&self, id: Uuid) -> RepositoryResult<Option<Script>>;
        fn list_scripts(&self, filter: ScriptFilter) -> RepositoryResult<(usize, Vec<Script>)>;
    }

    impl ScriptWriter for Repository {
        fn create_script(&self, new_script: &NewScript) -> RepositoryResult<Script>;
        fn update_script(&self, id: Uuid, updates: &UpdateScript) -> RepositoryResult<Script>;
        fn delete_script(&self, id: Uuid) -> RepositoryResult<()>;
    }

    impl EntityEventReader for Repository {
        fn get_entity_event(&self, id: Uuid) -> RepositoryResult<Option<EntityEvent>>;
        fn list_entity_events(
            &self,
            filter: EntityEventFilter,
        ) -> RepositoryResult<(usize, Vec<EntityEvent>)>;
    }

    impl EntityEventWriter for Repository {
        fn create_entity_event(&self, new_event: &NewEntityEvent) -> RepositoryResult<EntityEvent>;
        fn update_entity_event(
            &self,
            id: Uuid,
            updates: &UpdateEntityEvent,
        ) -> RepositoryResult<EntityEvent>;
        fn delete_entity_event(&self, id: Uuid) -> RepositoryResult<()>;
        fn delete_entity_events(&self, filter: EntityEventFilter) -> RepositoryResult<usize>;
    }
}
