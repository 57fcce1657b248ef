//! Repository abstraction: typed filters, reader/writer traits and the
//! Diesel-backed implementation.
//!
//! Filters are criteria bags built once per request; every field is
//! optional and `None` means "no constraint".

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::db::{DbConnection, DbPool};
use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::domain::entity_event::{
    EntityEvent, EntityEventState, EntityEventType, NewEntityEvent, UpdateEntityEvent,
};
use crate::domain::identity::{Identity, NewIdentity, UpdateIdentity};
use crate::domain::password_policy::{NewPasswordPolicy, PasswordPolicy, UpdatePasswordPolicy};
use crate::domain::role::{NewRole, Role, UpdateRole};
use crate::domain::role_request::{NewRoleRequest, RoleRequest, RoleRequestState, UpdateRoleRequest};
use crate::domain::role_tree_node::{NewRoleTreeNode, RoleTreeNode};
use crate::domain::script::{NewScript, Script, ScriptCategory, UpdateScript};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod audit;
pub mod entity_event;
pub mod errors;
pub mod identity;
#[cfg(test)]
pub mod mock;
pub mod password_policy;
pub mod role;
pub mod role_request;
pub mod role_tree_node;
pub mod script;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page number.
    pub page: usize,
    pub per_page: usize,
}

macro_rules! paginate_method {
    () => {
        pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
            self.pagination = Some(Pagination { page, per_page });
            self
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdentityFilter {
    /// Matches username, email or last name.
    pub text: Option<String>,
    pub disabled: Option<bool>,
    pub created_from: Option<NaiveDateTime>,
    pub created_to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl IdentityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn created_from(mut self, from: NaiveDateTime) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: NaiveDateTime) -> Self {
        self.created_to = Some(to);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleFilter {
    /// Matches code or name.
    pub text: Option<String>,
    pub disabled: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl RoleFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRequestFilter {
    pub applicant_id: Option<Uuid>,
    pub state: Option<RoleRequestState>,
    pub created_from: Option<NaiveDateTime>,
    pub created_to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl RoleRequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applicant_id(mut self, id: Uuid) -> Self {
        self.applicant_id = Some(id);
        self
    }

    pub fn state(mut self, state: RoleRequestState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn created_from(mut self, from: NaiveDateTime) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: NaiveDateTime) -> Self {
        self.created_to = Some(to);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleTreeNodeFilter {
    pub text: Option<String>,
    pub role_id: Option<Uuid>,
    pub pagination: Option<Pagination>,
}

impl RoleTreeNodeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn role_id(mut self, id: Uuid) -> Self {
        self.role_id = Some(id);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub modifier: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl AuditFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn entity_id(mut self, id: Uuid) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifier = Some(modifier.into());
        self
    }

    pub fn from(mut self, from: NaiveDateTime) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: NaiveDateTime) -> Self {
        self.to = Some(to);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordPolicyFilter {
    /// Matches code or name.
    pub text: Option<String>,
    pub default_policy: Option<bool>,
    pub disabled: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl PasswordPolicyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn default_policy(mut self, default_policy: bool) -> Self {
        self.default_policy = Some(default_policy);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptFilter {
    /// Matches code or name.
    pub text: Option<String>,
    pub code: Option<String>,
    pub category: Option<ScriptCategory>,
    pub pagination: Option<Pagination>,
}

impl ScriptFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn category(mut self, category: ScriptCategory) -> Self {
        self.category = Some(category);
        self
    }

    paginate_method!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityEventFilter {
    pub event_type: Option<EntityEventType>,
    pub owner_type: Option<String>,
    pub owner_id: Option<Uuid>,
    pub state: Option<EntityEventState>,
    pub created_from: Option<NaiveDateTime>,
    pub created_to: Option<NaiveDateTime>,
    pub pagination: Option<Pagination>,
}

impl EntityEventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: EntityEventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn owner_type(mut self, owner_type: impl Into<String>) -> Self {
        self.owner_type = Some(owner_type.into());
        self
    }

    pub fn owner_id(mut self, id: Uuid) -> Self {
        self.owner_id = Some(id);
        self
    }

    pub fn state(mut self, state: EntityEventState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn created_from(mut self, from: NaiveDateTime) -> Self {
        self.created_from = Some(from);
        self
    }

    pub fn created_to(mut self, to: NaiveDateTime) -> Self {
        self.created_to = Some(to);
        self
    }

    paginate_method!();
}

pub trait IdentityReader {
    fn get_identity(&self, id: Uuid) -> RepositoryResult<Option<Identity>>;
    fn get_identity_by_username(&self, username: &str) -> RepositoryResult<Option<Identity>>;
    fn list_identities(&self, filter: IdentityFilter) -> RepositoryResult<(usize, Vec<Identity>)>;
    /// Stored password hash of an existing identity; `NotFound` when the
    /// identity itself is absent.
    fn identity_password_hash(&self, id: Uuid) -> RepositoryResult<Option<String>>;
}

pub trait IdentityWriter {
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

pub trait RoleReader {
    fn get_role(&self, id: Uuid) -> RepositoryResult<Option<Role>>;
    fn list_roles(&self, filter: RoleFilter) -> RepositoryResult<(usize, Vec<Role>)>;
}

pub trait RoleWriter {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role>;
    fn update_role(&self, id: Uuid, updates: &UpdateRole) -> RepositoryResult<Role>;
    fn delete_role(&self, id: Uuid) -> RepositoryResult<()>;
}

pub trait RoleRequestReader {
    fn get_role_request(&self, id: Uuid) -> RepositoryResult<Option<RoleRequest>>;
    fn list_role_requests(
        &self,
        filter: RoleRequestFilter,
    ) -> RepositoryResult<(usize, Vec<RoleRequest>)>;
}

pub trait RoleRequestWriter {
    fn create_role_request(&self, new_request: &NewRoleRequest) -> RepositoryResult<RoleRequest>;
    fn update_role_request(
        &self,
        id: Uuid,
        updates: &UpdateRoleRequest,
    ) -> RepositoryResult<RoleRequest>;
    fn delete_role_request(&self, id: Uuid) -> RepositoryResult<()>;
}

pub trait RoleTreeNodeReader {
    fn get_role_tree_node(&self, id: Uuid) -> RepositoryResult<Option<RoleTreeNode>>;
    fn list_role_tree_nodes(
        &self,
        filter: RoleTreeNodeFilter,
    ) -> RepositoryResult<(usize, Vec<RoleTreeNode>)>;
}

pub trait RoleTreeNodeWriter {
    fn create_role_tree_node(&self, new_node: &NewRoleTreeNode) -> RepositoryResult<RoleTreeNode>;
    fn delete_role_tree_node(&self, id: Uuid) -> RepositoryResult<()>;
}

pub trait AuditReader {
    fn get_audit_entry(&self, id: Uuid) -> RepositoryResult<Option<AuditEntry>>;
    fn list_audit_entries(&self, filter: AuditFilter) -> RepositoryResult<(usize, Vec<AuditEntry>)>;
}

pub trait AuditWriter {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry>;
}

pub trait PasswordPolicyReader {
    fn get_password_policy(&self, id: Uuid) -> RepositoryResult<Option<PasswordPolicy>>;
    fn get_default_password_policy(&self) -> RepositoryResult<Option<PasswordPolicy>>;
    fn list_password_policies(
        &self,
        filter: PasswordPolicyFilter,
    ) -> RepositoryResult<(usize, Vec<PasswordPolicy>)>;
}

pub trait PasswordPolicyWriter {
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

pub trait ScriptReader {
    fn get_script(&self, id: Uuid) -> RepositoryResult<Option<Script>>;
    fn list_scripts(&self, filter: ScriptFilter) -> RepositoryResult<(usize, Vec<Script>)>;
}

pub trait ScriptWriter {
    fn create_script(&self, new_script: &NewScript) -> RepositoryResult<Script>;
    fn update_script(&self, id: Uuid, updates: &UpdateScript) -> RepositoryResult<Script>;
    fn delete_script(&self, id: Uuid) -> RepositoryResult<()>;
}

pub trait EntityEventReader {
    fn get_entity_event(&self, id: Uuid) -> RepositoryResult<Option<EntityEvent>>;
    fn list_entity_events(
        &self,
        filter: EntityEventFilter,
    ) -> RepositoryResult<(usize, Vec<EntityEvent>)>;
}

pub trait EntityEventWriter {
    fn create_entity_event(&self, new_event: &NewEntityEvent) -> RepositoryResult<EntityEvent>;
    fn update_entity_event(
        &self,
        id: Uuid,
        updates: &UpdateEntityEvent,
    ) -> RepositoryResult<EntityEvent>;
    fn delete_entity_event(&self, id: Uuid) -> RepositoryResult<()>;
    /// Deletes every event matching the filter, returning the count.
    fn delete_entity_events(&self, filter: EntityEventFilter) -> RepositoryResult<usize>;
}

/// Diesel implementation of all repository traits, cloneable across workers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        crate::db::get_connection(&self.pool).map_err(RepositoryError::from)
    }
}

/// Applies pagination to an already-filtered boxed query, shared by the
/// per-resource implementations.
pub(crate) fn page_bounds(pagination: &Option<Pagination>) -> Option<(i64, i64)> {
    pagination.as_ref().map(|p| {
        let per_page = p.per_page.max(1) as i64;
        let offset = (p.page as i64) * per_page;
        (per_page, offset)
    })
}
