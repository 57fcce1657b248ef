//! Generic REST controller.
//!
//! Every resource endpoint shares one verb table: paged listing (plus the
//! `/search/default` and `/search/quick` aliases), autocomplete, get by id,
//! create, replace, partial update, delete and the per-instance permission
//! probe. A resource plugs in by implementing [`ReadRestResource`] and,
//! when it is writable, [`WriteRestResource`]; the handlers and route
//! tables below are reused as-is.

use actix_web::{HttpResponse, Scope, web};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{AuthenticatedUser, ResourceGroup, effective_permissions};
use crate::domain::ResourceOption;
use crate::pagination::PageEnvelope;
use crate::repository::DieselRepository;
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::services::ServiceResult;

/// Read side of a resource endpoint.
pub trait ReadRestResource: 'static {
    type Dto: Serialize;
    type Filter;

    const GROUP: ResourceGroup;

    /// Builds the repository filter from the query string. Unknown
    /// parameters are ignored; malformed values fail with `BAD_VALUE`.
    fn to_filter(repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError>;

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)>;

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)>;

    fn get(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid)
    -> ServiceResult<Self::Dto>;
}

/// Write side of a resource endpoint.
pub trait WriteRestResource: ReadRestResource {
    type Create: DeserializeOwned + Validate + 'static;
    type Replace: DeserializeOwned + Validate + 'static;
    type Patch: DeserializeOwned + 'static;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto>;

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto>;

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto>;

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()>;
}

pub async fn list<R: ReadRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: QueryParams,
) -> Result<HttpResponse, ApiError> {
    let page = query.page_request()?;
    let filter = R::to_filter(&repo, &query)?;
    let (total, items) = R::list(&repo, &user, filter)?;
    Ok(HttpResponse::Ok().json(PageEnvelope::new(items, page.page, page.size, total)))
}

pub async fn autocomplete<R: ReadRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    query: QueryParams,
) -> Result<HttpResponse, ApiError> {
    let page = query.page_request()?;
    let filter = R::to_filter(&repo, &query)?;
    let (total, items) = R::autocomplete(&repo, &user, filter)?;
    Ok(HttpResponse::Ok().json(PageEnvelope::new(items, page.page, page.size, total)))
}

pub async fn get_one<R: ReadRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let dto = R::get(&repo, &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(dto))
}

/// Base permissions the caller holds on one existing instance.
pub async fn permissions<R: ReadRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    R::get(&repo, &user, id.into_inner())?;
    Ok(HttpResponse::Ok().json(effective_permissions(&user.authorities, R::GROUP)))
}

pub async fn create<R: WriteRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    body: web::Json<R::Create>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;
    let dto = R::create(&repo, &user, body)?;
    Ok(HttpResponse::Created().json(dto))
}

pub async fn replace<R: WriteRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    body: web::Json<R::Replace>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate()?;
    let dto = R::replace(&repo, &user, id.into_inner(), body)?;
    Ok(HttpResponse::Ok().json(dto))
}

pub async fn patch<R: WriteRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
    body: web::Json<R::Patch>,
) -> Result<HttpResponse, ApiError> {
    let dto = R::patch(&repo, &user, id.into_inner(), body.into_inner())?;
    Ok(HttpResponse::Ok().json(dto))
}

pub async fn delete_one<R: WriteRestResource>(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    R::delete(&repo, &user, id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route table of a read-only resource. Literal segments are registered
/// before the `{id}` matcher.
pub fn read_routes<R: ReadRestResource>(path: &str) -> Scope {
    web::scope(path)
        .route("/search/default", web::get().to(list::<R>))
        .route("/search/quick", web::get().to(list::<R>))
        .route("/search/autocomplete", web::get().to(autocomplete::<R>))
        .route("", web::get().to(list::<R>))
        .route("/{id}/permissions", web::get().to(permissions::<R>))
        .route("/{id}", web::get().to(get_one::<R>))
}

/// Route table of a fully writable resource.
pub fn crud_routes<R: WriteRestResource>(path: &str) -> Scope {
    read_routes::<R>(path)
        .route("", web::post().to(create::<R>))
        .route("/{id}", web::put().to(replace::<R>))
        .route("/{id}", web::patch().to(patch::<R>))
        .route("/{id}", web::delete().to(delete_one::<R>))
}
