//! Role endpoint.

use actix_web::Scope;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::role::{NewRole, PatchRole, Role, UpdateRole};
use crate::repository::{DieselRepository, RoleFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::role as service;

pub struct Roles;

impl ReadRestResource for Roles {
    type Dto = Role;
    type Filter = RoleFilter;

    const GROUP: ResourceGroup = ResourceGroup::Role;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = RoleFilter::new();
        if let Some(text) = query.get("text") {
            filter = filter.text(text);
        }
        if let Some(disabled) = query.boolean("disabled")? {
            filter = filter.disabled(disabled);
        }
        let page = query.page_request()?;
        Ok(filter.paginate(page.page, page.size))
    }

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)> {
        service::list_roles(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_roles(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|r| ResourceOption {
                id: r.id,
                label: r.name,
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_role(repo, user, id)
    }
}

impl WriteRestResource for Roles {
    type Create = NewRole;
    type Replace = UpdateRole;
    type Patch = PatchRole;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_role(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_role(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_role(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_role(repo, user, id)
    }
}

pub fn scope() -> Scope {
    crud_routes::<Roles>("/roles")
}
