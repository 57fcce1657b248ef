use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::registry::EndpointRegistry;
use crate::repository::DieselRepository;
use crate::routes::api_scope;
use crate::routes::error::ApiError;

pub mod auth;
pub mod db;
pub mod domain;
pub mod models;
pub mod pagination;
pub mod registry;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let registry = EndpointRegistry::build();

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .service(api_scope())
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Malformed JSON bodies answer with the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(format!("invalid body: {err}")).into())
}

/// Non-UUID path segments answer with the standard error envelope.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ApiError::BadValue {
            parameter: "id".to_string(),
            value: err.to_string(),
        }
        .into()
    })
}
