//! Entity event endpoint, including the filtered bulk delete.

use actix_web::{HttpResponse, Scope, web};
use serde_json::json;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::entity_event::{
    EntityEvent, EntityEventState, EntityEventType, NewEntityEvent, PatchEntityEvent,
    UpdateEntityEvent,
};
use crate::repository::{DieselRepository, EntityEventFilter, IdentityReader};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::entity_event as service;

pub struct EntityEvents;

impl ReadRestResource for EntityEvents {
    type Dto = EntityEvent;
    type Filter = EntityEventFilter;

    const GROUP: ResourceGroup = ResourceGroup::EntityEvent;

    fn to_filter(repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = EntityEventFilter::new();
        if let Some(event_type) = query.parse::<EntityEventType>("eventType")? {
            filter = filter.event_type(event_type);
        }
        if let Some(owner_type) = query.get("ownerType") {
            filter = filter.owner_type(owner_type);
        }
        // An ownerId that is not a uuid is treated as an identity username.
        if let Some(raw) = query.get("ownerId") {
            let owner_id = match Uuid::parse_str(raw) {
                Ok(id) => id,
                Err(_) => repo
                    .get_identity_by_username(raw)
                    .map_err(|e| ApiError::Internal(e.to_string()))?
                    .ok_or_else(|| ApiError::NotFound {
                        entity: "identity".to_string(),
                        identifier: raw.to_string(),
                    })?
                    .id,
            };
            filter = filter.owner_id(owner_id);
        }
        if let Some(state) = query.parse::<EntityEventState>("states")? {
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
        service::list_entity_events(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_entity_events(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|e| ResourceOption {
                id: e.id,
                label: format!("{} {}", e.event_type, e.owner_type),
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_entity_event(repo, user, id)
    }
}

impl WriteRestResource for EntityEvents {
    type Create = NewEntityEvent;
    type Replace = UpdateEntityEvent;
    type Patch = PatchEntityEvent;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_entity_event(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_entity_event(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_entity_event(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_entity_event(repo, user, id)
    }
}

/// Deletes every event matching the same filter the listing accepts.
async fn bulk_delete(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: QueryParams,
) -> Result<HttpResponse, ApiError> {
    let filter = EntityEvents::to_filter(&repo, &query)?;
    let deleted = service::bulk_delete_entity_events(repo.get_ref(), &user, filter)?;
    Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}

pub fn scope() -> Scope {
    crud_routes::<EntityEvents>("/entity-events")
        .route("/action/bulk/delete", web::delete().to(bulk_delete))
}
