//! Audit trail endpoint. Read-only: only the listing and get routes are
//! registered.

use actix_web::Scope;
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::audit::AuditEntry;
use crate::repository::{AuditFilter, DieselRepository};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, read_routes};
use crate::services::ServiceResult;
use crate::services::audit as service;

pub struct Audits;

impl ReadRestResource for Audits {
    type Dto = AuditEntry;
    type Filter = AuditFilter;

    const GROUP: ResourceGroup = ResourceGroup::Audit;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = AuditFilter::new();
        if let Some(entity_type) = query.get("entityType") {
            filter = filter.entity_type(entity_type);
        }
        if let Some(entity_id) = query.uuid("entityId")? {
            filter = filter.entity_id(entity_id);
        }
        if let Some(modifier) = query.get("modifier") {
            filter = filter.modifier(modifier);
        }
        if let Some(from) = query.datetime("from")? {
            filter = filter.from(from);
        }
        if let Some(till) = query.datetime("till")? {
            filter = filter.to(till);
        }
        let page = query.page_request()?;
        Ok(filter.paginate(page.page, page.size))
    }

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)> {
        service::list_audit_entries(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_audit_entries(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|e| ResourceOption {
                id: e.id,
                label: format!("{} {} by {}", e.modification, e.entity_type, e.modifier),
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_audit_entry(repo, user, id)
    }
}

pub fn scope() -> Scope {
    read_routes::<Audits>("/audits")
}
