//! Module introspection routes: filter-builder registry, endpoint
//! documentation and the environment dump.

use actix_web::{HttpResponse, Scope, web};

use crate::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::pagination::PageEnvelope;
use crate::registry::EndpointRegistry;
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::services::registry as service;

async fn filter_builders(
    registry: web::Data<EndpointRegistry>,
    user: AuthenticatedUser,
    query: QueryParams,
) -> Result<HttpResponse, ApiError> {
    let page = query.page_request()?;
    let (total, items) = service::list_filter_builders(
        &registry,
        &user,
        query.get("text"),
        page.page,
        page.size,
    )?;
    Ok(HttpResponse::Ok().json(PageEnvelope::new(items, page.page, page.size, total)))
}

async fn resource_doc(
    registry: web::Data<EndpointRegistry>,
    user: AuthenticatedUser,
    name: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let doc = service::get_resource_doc(&registry, &user, &name)?;
    Ok(HttpResponse::Ok().json(doc))
}

async fn environment(
    config: web::Data<ServerConfig>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let dump = service::environment(&config, &user)?;
    Ok(HttpResponse::Ok().json(dump))
}

pub fn scope() -> Scope {
    web::scope("")
        .route("/filter-builders", web::get().to(filter_builders))
        .route("/doc/{resource}/search", web::get().to(resource_doc))
        .route("/environment", web::get().to(environment))
}
