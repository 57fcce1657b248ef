//! Identity endpoint, including the enable/disable toggles.

use actix_web::{HttpResponse, Scope, web};
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::identity::{Identity, NewIdentity, PatchIdentity, UpdateIdentity};
use crate::repository::{DieselRepository, IdentityFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::identity as service;

pub struct Identities;

impl ReadRestResource for Identities {
    type Dto = Identity;
    type Filter = IdentityFilter;

    const GROUP: ResourceGroup = ResourceGroup::Identity;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = IdentityFilter::new();
        if let Some(text) = query.get("text") {
            filter = filter.text(text);
        }
        if let Some(disabled) = query.boolean("disabled")? {
            filter = filter.disabled(disabled);
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
        service::list_identities(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_identities(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|i| ResourceOption {
                id: i.id,
                label: i.username,
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_identity(repo, user, id)
    }
}

impl WriteRestResource for Identities {
    type Create = NewIdentity;
    type Replace = UpdateIdentity;
    type Patch = PatchIdentity;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_identity(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_identity(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_identity(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_identity(repo, user, id)
    }
}

async fn enable(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let identity = service::set_identity_disabled(repo.get_ref(), &user, id.into_inner(), false)?;
    Ok(HttpResponse::Ok().json(identity))
}

async fn disable(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let identity = service::set_identity_disabled(repo.get_ref(), &user, id.into_inner(), true)?;
    Ok(HttpResponse::Ok().json(identity))
}

pub fn scope() -> Scope {
    crud_routes::<Identities>("/identities")
        .route("/{id}/enable", web::patch().to(enable))
        .route("/{id}/disable", web::patch().to(disable))
}
