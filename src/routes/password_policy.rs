//! Password policy endpoint.

use actix_web::Scope;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::password_policy::{
    NewPasswordPolicy, PasswordPolicy, PatchPasswordPolicy, UpdatePasswordPolicy,
};
use crate::repository::{DieselRepository, PasswordPolicyFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::password_policy as service;

pub struct PasswordPolicies;

impl ReadRestResource for PasswordPolicies {
    type Dto = PasswordPolicy;
    type Filter = PasswordPolicyFilter;

    const GROUP: ResourceGroup = ResourceGroup::PasswordPolicy;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = PasswordPolicyFilter::new();
        if let Some(text) = query.get("text") {
            filter = filter.text(text);
        }
        if let Some(default_policy) = query.boolean("defaultPolicy")? {
            filter = filter.default_policy(default_policy);
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
        service::list_password_policies(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_password_policies(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|p| ResourceOption {
                id: p.id,
                label: p.name,
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_password_policy(repo, user, id)
    }
}

impl WriteRestResource for PasswordPolicies {
    type Create = NewPasswordPolicy;
    type Replace = UpdatePasswordPolicy;
    type Patch = PatchPasswordPolicy;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_password_policy(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_password_policy(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_password_policy(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_password_policy(repo, user, id)
    }
}

pub fn scope() -> Scope {
    crud_routes::<PasswordPolicies>("/password-policies")
}
