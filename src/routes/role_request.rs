//! Role request endpoint, including the synchronous start action.
//!
//! The `applicant` query parameter takes a username and is resolved to an
//! identity id before the filter is built; an unknown username is a
//! not-found error, not an empty page.

use actix_web::{HttpResponse, Scope, web};
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::role_request::{
    NewRoleRequest, PatchRoleRequest, RoleRequest, RoleRequestState, UpdateRoleRequest,
};
use crate::repository::{DieselRepository, IdentityReader, RoleRequestFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::role_request as service;

pub struct RoleRequests;

impl ReadRestResource for RoleRequests {
    type Dto = RoleRequest;
    type Filter = RoleRequestFilter;

    const GROUP: ResourceGroup = ResourceGroup::RoleRequest;

    fn to_filter(repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = RoleRequestFilter::new();
        if let Some(username) = query.get("applicant") {
            let identity = repo
                .get_identity_by_username(username)
                .map_err(|e| ApiError::Internal(e.to_string()))?
                .ok_or_else(|| ApiError::NotFound {
                    entity: "identity".to_string(),
                    identifier: username.to_string(),
                })?;
            filter = filter.applicant_id(identity.id);
        } else if let Some(id) = query.uuid("ownerId")? {
            filter = filter.applicant_id(id);
        }
        if let Some(state) = query.parse::<RoleRequestState>("state")? {
            filter = filter.state(state);
        }
        if let Some(from) = query.datetime("createdFrom")? {
            filter = filter.created_from(from);
        }
        if let Some(till) = query.datetime("createdTill")? {
            filter = filter.created_to(till);
        }
        let page = query.page_request()?;
        Ok(filter.paginate(page.page, page.size))
    }

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)> {
        service::list_role_requests(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_role_requests(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|r| ResourceOption {
                id: r.id,
                label: format!("{} ({})", r.id, r.state),
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_role_request(repo, user, id)
    }
}

impl WriteRestResource for RoleRequests {
    type Create = NewRoleRequest;
    type Replace = UpdateRoleRequest;
    type Patch = PatchRoleRequest;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_role_request(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_role_request(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_role_request(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_role_request(repo, user, id)
    }
}

async fn start(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let request = service::start_role_request(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(request))
}

pub fn scope() -> Scope {
    crud_routes::<RoleRequests>("/role-requests").route("/{id}/start", web::put().to(start))
}
