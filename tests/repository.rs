use chrono::{Duration, Utc};
use uuid::Uuid;

use idm_api::domain::audit::{Modification, NewAuditEntry};
use idm_api::domain::entity_event::{
    EntityEventState, EntityEventType, NewEntityEvent, UpdateEntityEvent,
};
use idm_api::domain::identity::{NewIdentity, UpdateIdentity};
use idm_api::domain::password_policy::NewPasswordPolicy;
use idm_api::domain::role::{NewRole, UpdateRole};
use idm_api::domain::role_request::{NewRoleRequest, RoleRequestState, UpdateRoleRequest};
use idm_api::domain::role_tree_node::NewRoleTreeNode;
use idm_api::domain::script::{NewScript, ScriptCategory};
use idm_api::repository::errors::RepositoryError;
use idm_api::repository::{
    AuditFilter, AuditReader, AuditWriter, DieselRepository, EntityEventFilter, EntityEventReader,
    EntityEventWriter, IdentityFilter, IdentityReader, IdentityWriter, PasswordPolicyFilter,
    PasswordPolicyReader, PasswordPolicyWriter, RoleFilter, RoleReader, RoleRequestFilter,
    RoleRequestReader, RoleRequestWriter, RoleTreeNodeFilter, RoleTreeNodeReader,
    RoleTreeNodeWriter, RoleWriter, ScriptFilter, ScriptReader, ScriptWriter,
};

mod common;

fn new_identity(username: &str) -> NewIdentity {
    NewIdentity {
        username: username.to_string(),
        first_name: Some("Jan".to_string()),
        last_name: Some("Novak".to_string()),
        email: Some(format!("{username}@example.com")),
        password: None,
    }
}

#[test]
fn test_identity_repository_crud() {
    let test_db = common::TestDb::new("test_identity_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let created = repo.create_identity(&new_identity("jnovak"), None).unwrap();
    assert_eq!(created.username, "jnovak");
    assert!(!created.disabled);

    let fetched = repo.get_identity(created.id).unwrap().unwrap();
    assert_eq!(fetched, created);

    let by_username = repo.get_identity_by_username("jnovak").unwrap().unwrap();
    assert_eq!(by_username.id, created.id);
    assert!(repo.get_identity_by_username("nobody").unwrap().is_none());

    let updated = repo
        .update_identity(
            created.id,
            &UpdateIdentity {
                username: "jnovak".to_string(),
                first_name: Some("Jana".to_string()),
                last_name: Some("Novakova".to_string()),
                email: None,
                disabled: false,
            },
        )
        .unwrap();
    assert_eq!(updated.first_name.as_deref(), Some("Jana"));
    assert!(updated.email.is_none());
    assert!(updated.modified_at.is_some());

    let disabled = repo.set_identity_disabled(created.id, true).unwrap();
    assert!(disabled.disabled);

    repo.delete_identity(created.id).unwrap();
    assert!(repo.get_identity(created.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_identity(created.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_identity_filters_and_pagination() {
    let test_db = common::TestDb::new("test_identity_filters.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    for name in ["adamek", "benes", "cerny"] {
        repo.create_identity(&new_identity(name), None).unwrap();
    }
    let benes = repo.get_identity_by_username("benes").unwrap().unwrap();
    repo.set_identity_disabled(benes.id, true).unwrap();

    let (total, items) = repo
        .list_identities(IdentityFilter::new().text("ben"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].username, "benes");

    let (total, _) = repo
        .list_identities(IdentityFilter::new().disabled(false))
        .unwrap();
    assert_eq!(total, 2);

    let (total, items) = repo
        .list_identities(IdentityFilter::new().paginate(1, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(items.len(), 1);

    let future = Utc::now().naive_utc() + Duration::hours(1);
    let (total, items) = repo
        .list_identities(IdentityFilter::new().created_from(future))
        .unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn test_identity_password_storage() {
    let test_db = common::TestDb::new("test_identity_password.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let identity = repo
        .create_identity(&new_identity("pwd"), Some("$argon2id$stub".to_string()))
        .unwrap();
    assert_eq!(
        repo.identity_password_hash(identity.id).unwrap().as_deref(),
        Some("$argon2id$stub")
    );

    repo.set_identity_password(identity.id, "$argon2id$other")
        .unwrap();
    assert_eq!(
        repo.identity_password_hash(identity.id).unwrap().as_deref(),
        Some("$argon2id$other")
    );

    assert!(matches!(
        repo.identity_password_hash(Uuid::new_v4()),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_role_repository_crud() {
    let test_db = common::TestDb::new("test_role_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let role = repo
        .create_role(&NewRole {
            code: "hr-manager".to_string(),
            name: "HR manager".to_string(),
            description: None,
            disabled: false,
            priority: 5,
        })
        .unwrap();

    let updated = repo
        .update_role(
            role.id,
            &UpdateRole {
                code: "hr-manager".to_string(),
                name: "HR lead".to_string(),
                description: Some("leads HR".to_string()),
                disabled: true,
                priority: 7,
            },
        )
        .unwrap();
    assert_eq!(updated.name, "HR lead");
    assert!(updated.disabled);

    let (total, items) = repo.list_roles(RoleFilter::new().text("lead")).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, role.id);

    let (total, _) = repo.list_roles(RoleFilter::new().disabled(false)).unwrap();
    assert_eq!(total, 0);

    repo.delete_role(role.id).unwrap();
    assert!(repo.get_role(role.id).unwrap().is_none());
}

#[test]
fn test_role_request_repository_crud() {
    let test_db = common::TestDb::new("test_role_request_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let applicant = repo.create_identity(&new_identity("applicant"), None).unwrap();

    let request = repo
        .create_role_request(&NewRoleRequest {
            applicant_id: applicant.id,
            description: Some("please".to_string()),
        })
        .unwrap();
    assert_eq!(request.state, RoleRequestState::Concept);

    let executed = repo
        .update_role_request(
            request.id,
            &UpdateRoleRequest {
                state: RoleRequestState::Executed,
                description: request.description.clone(),
            },
        )
        .unwrap();
    assert_eq!(executed.state, RoleRequestState::Executed);

    let (total, _) = repo
        .list_role_requests(RoleRequestFilter::new().applicant_id(applicant.id))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_role_requests(RoleRequestFilter::new().state(RoleRequestState::Concept))
        .unwrap();
    assert_eq!(total, 0);

    repo.delete_role_request(request.id).unwrap();
    assert!(repo.get_role_request(request.id).unwrap().is_none());
}

#[test]
fn test_role_tree_node_repository() {
    let test_db = common::TestDb::new("test_role_tree_node_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let role = repo
        .create_role(&NewRole {
            code: "auto".to_string(),
            name: "Automatic".to_string(),
            description: None,
            disabled: false,
            priority: 0,
        })
        .unwrap();

    let node = repo
        .create_role_tree_node(&NewRoleTreeNode {
            role_id: role.id,
            name: "department-42".to_string(),
        })
        .unwrap();

    let (total, items) = repo
        .list_role_tree_nodes(RoleTreeNodeFilter::new().role_id(role.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, node.id);

    let (total, _) = repo
        .list_role_tree_nodes(RoleTreeNodeFilter::new().text("department"))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_role_tree_node(node.id).unwrap();
    assert!(repo.get_role_tree_node(node.id).unwrap().is_none());
}

#[test]
fn test_audit_repository_is_append_only() {
    let test_db = common::TestDb::new("test_audit_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let entity_id = Uuid::new_v4();
    let entry = repo
        .create_audit_entry(&NewAuditEntry {
            entity_type: "identity".to_string(),
            entity_id,
            modification: Modification::Create,
            modifier: "admin".to_string(),
            modified_at: Utc::now().naive_utc(),
        })
        .unwrap();

    let fetched = repo.get_audit_entry(entry.id).unwrap().unwrap();
    assert_eq!(fetched.modification, Modification::Create);

    let (total, _) = repo
        .list_audit_entries(AuditFilter::new().entity_type("identity").entity_id(entity_id))
        .unwrap();
    assert_eq!(total, 1);

    let (total, _) = repo
        .list_audit_entries(AuditFilter::new().modifier("someone-else"))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_password_policy_repository() {
    let test_db = common::TestDb::new("test_password_policy_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let policy = repo
        .create_password_policy(&NewPasswordPolicy {
            code: "default".to_string(),
            name: "Default".to_string(),
            min_length: 8,
            max_length: 64,
            min_upper_char: 1,
            min_lower_char: 1,
            min_number: 1,
            min_special_char: 0,
            default_policy: true,
            disabled: false,
        })
        .unwrap();

    let default = repo.get_default_password_policy().unwrap().unwrap();
    assert_eq!(default.id, policy.id);

    let (total, _) = repo
        .list_password_policies(PasswordPolicyFilter::new().default_policy(true))
        .unwrap();
    assert_eq!(total, 1);

    repo.delete_password_policy(policy.id).unwrap();
    assert!(repo.get_default_password_policy().unwrap().is_none());
}

#[test]
fn test_script_repository() {
    let test_db = common::TestDb::new("test_script_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let script = repo
        .create_script(&NewScript {
            code: "sync-hr".to_string(),
            name: "HR sync".to_string(),
            category: ScriptCategory::System,
            script: "return true".to_string(),
            description: None,
        })
        .unwrap();
    assert_eq!(script.category, ScriptCategory::System);

    let (total, items) = repo
        .list_scripts(ScriptFilter::new().category(ScriptCategory::System))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].script, "return true");

    let (total, _) = repo
        .list_scripts(ScriptFilter::new().code("other"))
        .unwrap();
    assert_eq!(total, 0);

    repo.delete_script(script.id).unwrap();
    assert!(repo.get_script(script.id).unwrap().is_none());
}

#[test]
fn test_entity_event_repository_bulk_delete() {
    let test_db = common::TestDb::new("test_entity_event_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let owner = Uuid::new_v4();
    for event_type in [EntityEventType::Create, EntityEventType::Update] {
        repo.create_entity_event(&NewEntityEvent {
            event_type,
            owner_type: "identity".to_string(),
            owner_id: owner,
            state: EntityEventState::Executed,
            result_message: None,
        })
        .unwrap();
    }
    let other = repo
        .create_entity_event(&NewEntityEvent {
            event_type: EntityEventType::Create,
            owner_type: "role".to_string(),
            owner_id: Uuid::new_v4(),
            state: EntityEventState::Executed,
            result_message: None,
        })
        .unwrap();

    let updated = repo
        .update_entity_event(
            other.id,
            &UpdateEntityEvent {
                state: EntityEventState::Failed,
                result_message: Some("boom".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.state, EntityEventState::Failed);

    let deleted = repo
        .delete_entity_events(EntityEventFilter::new().owner_id(owner))
        .unwrap();
    assert_eq!(deleted, 2);

    let (total, items) = repo.list_entity_events(EntityEventFilter::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].owner_type, "role");
}
