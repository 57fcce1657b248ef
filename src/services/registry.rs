//! Module registry services: filter-builder listing, per-resource
//! documentation and the environment dump.

use serde_json::{Value, json};

use crate::auth::{APP_ADMIN, AuthenticatedUser, BasePermission, ResourceGroup};
use crate::models::config::ServerConfig;
use crate::registry::{EndpointRegistry, FilterBuilderDescriptor, ResourceDoc};
use crate::services::{ServiceError, ServiceResult, ensure_any};

const GROUP: ResourceGroup = ResourceGroup::Module;

/// Filter builders whose name or entity type contains `text`, paged.
pub fn list_filter_builders(
    registry: &EndpointRegistry,
    user: &AuthenticatedUser,
    text: Option<&str>,
    page: usize,
    size: usize,
) -> ServiceResult<(usize, Vec<FilterBuilderDescriptor>)> {
    ensure_any(user, GROUP, &[BasePermission::Read])?;

    let needle = text.map(str::to_lowercase);
    let matching: Vec<_> = registry
        .filter_builders()
        .iter()
        .filter(|b| match &needle {
            Some(n) => {
                b.name.to_lowercase().contains(n) || b.entity_type.to_lowercase().contains(n)
            }
            None => true,
        })
        .cloned()
        .collect();

    let total = matching.len();
    let per_page = size.max(1);
    let items = matching
        .into_iter()
        .skip(page * per_page)
        .take(per_page)
        .collect();
    Ok((total, items))
}

pub fn get_resource_doc<'r>(
    registry: &'r EndpointRegistry,
    user: &AuthenticatedUser,
    name: &str,
) -> ServiceResult<&'r ResourceDoc> {
    ensure_any(user, GROUP, &[BasePermission::Read])?;
    registry.resource(name).ok_or(ServiceError::NotFound {
        entity: "resource",
        identifier: name.to_string(),
    })
}

/// Masked configuration dump; the token secret is never disclosed.
pub fn environment(config: &ServerConfig, user: &AuthenticatedUser) -> ServiceResult<Value> {
    if !user.authorities.iter().any(|a| a == APP_ADMIN) {
        return Err(ServiceError::Forbidden);
    }
    Ok(json!({
        "address": config.address,
        "port": config.port,
        "database_url": config.database_url,
        "secret": "********",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn module_reader() -> AuthenticatedUser {
        AuthenticatedUser::new(Uuid::new_v4(), "reader", vec!["MODULE_READ".to_string()])
    }

    #[test]
    fn text_filter_narrows_builders() {
        let registry = EndpointRegistry::build();
        let (total, items) =
            list_filter_builders(&registry, &module_reader(), Some("role"), 0, 20).unwrap();
        assert!(total >= 2);
        assert!(items.iter().all(|b| b.entity_type.contains("role")));
    }

    #[test]
    fn paging_bounds_the_listing() {
        let registry = EndpointRegistry::build();
        let (total, items) = list_filter_builders(&registry, &module_reader(), None, 0, 3).unwrap();
        assert_eq!(total, 8);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn environment_requires_admin() {
        let config = ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "idm.db".to_string(),
            secret: "topsecret".to_string(),
        };
        let result = environment(&config, &module_reader());
        assert!(matches!(result, Err(ServiceError::Forbidden)));

        let admin = AuthenticatedUser::new(
            Uuid::new_v4(),
            "admin",
            vec![APP_ADMIN.to_string()],
        );
        let dump = environment(&config, &admin).unwrap();
        assert_eq!(dump["secret"], "********");
    }
}
