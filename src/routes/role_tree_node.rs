//! Automatic-role endpoint. Nodes cannot be updated in place, so PUT and
//! PATCH always answer with method-not-allowed once the caller is allowed
//! to ask at all.

use actix_web::Scope;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::role_tree_node::{NewRoleTreeNode, RoleTreeNode};
use crate::repository::{DieselRepository, RoleTreeNodeFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::role_tree_node as service;

pub struct RoleTreeNodes;

impl ReadRestResource for RoleTreeNodes {
    type Dto = RoleTreeNode;
    type Filter = RoleTreeNodeFilter;

    const GROUP: ResourceGroup = ResourceGroup::RoleTreeNode;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = RoleTreeNodeFilter::new();
        if let Some(text) = query.get("text") {
            filter = filter.text(text);
        }
        if let Some(role_id) = query.uuid("roleId")? {
            filter = filter.role_id(role_id);
        }
        let page = query.page_request()?;
        Ok(filter.paginate(page.page, page.size))
    }

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)> {
        service::list_role_tree_nodes(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_role_tree_nodes(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|n| ResourceOption {
                id: n.id,
                label: n.name,
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_role_tree_node(repo, user, id)
    }
}

impl WriteRestResource for RoleTreeNodes {
    type Create = NewRoleTreeNode;
    type Replace = NewRoleTreeNode;
    type Patch = serde_json::Value;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_role_tree_node(repo, user, body)
    }

    fn replace(
        _repo: &DieselRepository,
        user: &AuthenticatedUser,
        _id: Uuid,
        _body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_role_tree_node(user)
    }

    fn patch(
        _repo: &DieselRepository,
        user: &AuthenticatedUser,
        _id: Uuid,
        _body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::update_role_tree_node(user)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_role_tree_node(repo, user, id)
    }
}

pub fn scope() -> Scope {
    crud_routes::<RoleTreeNodes>("/role-tree-nodes")
}
