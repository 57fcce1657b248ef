//! Static endpoint registry: filter-builder descriptors and per-resource
//! route documentation. Built once at startup and shared as app data.

use serde::Serialize;

/// One registered filter builder. Builders are compiled in; the registry
/// only describes them.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FilterBuilderDescriptor {
    pub name: String,
    pub entity_type: String,
    pub enabled: bool,
}

/// One documented route of a resource endpoint.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RouteDoc {
    pub method: &'static str,
    pub path: String,
}

/// Self-description of one resource endpoint: its routes and the query
/// parameters its filter understands.
#[derive(Clone, Debug, Serialize)]
pub struct ResourceDoc {
    pub name: String,
    pub routes: Vec<RouteDoc>,
    pub filter_fields: Vec<&'static str>,
}

#[derive(Clone, Debug)]
pub struct EndpointRegistry {
    filter_builders: Vec<FilterBuilderDescriptor>,
    resources: Vec<ResourceDoc>,
}

fn crud_routes(name: &str) -> Vec<RouteDoc> {
    let base = format!("/{name}");
    vec![
        RouteDoc { method: "GET", path: base.clone() },
        RouteDoc { method: "GET", path: format!("{base}/search/default") },
        RouteDoc { method: "GET", path: format!("{base}/search/quick") },
        RouteDoc { method: "GET", path: format!("{base}/search/autocomplete") },
        RouteDoc { method: "POST", path: base.clone() },
        RouteDoc { method: "GET", path: format!("{base}/{{id}}") },
        RouteDoc { method: "PUT", path: format!("{base}/{{id}}") },
        RouteDoc { method: "PATCH", path: format!("{base}/{{id}}") },
        RouteDoc { method: "DELETE", path: format!("{base}/{{id}}") },
        RouteDoc { method: "GET", path: format!("{base}/{{id}}/permissions") },
    ]
}

fn read_routes(name: &str) -> Vec<RouteDoc> {
    let base = format!("/{name}");
    vec![
        RouteDoc { method: "GET", path: base.clone() },
        RouteDoc { method: "GET", path: format!("{base}/search/default") },
        RouteDoc { method: "GET", path: format!("{base}/search/quick") },
        RouteDoc { method: "GET", path: format!("{base}/search/autocomplete") },
        RouteDoc { method: "GET", path: format!("{base}/{{id}}") },
        RouteDoc { method: "GET", path: format!("{base}/{{id}}/permissions") },
    ]
}

fn descriptor(entity_type: &str) -> FilterBuilderDescriptor {
    FilterBuilderDescriptor {
        name: format!("{entity_type}-filter"),
        entity_type: entity_type.to_string(),
        enabled: true,
    }
}

impl EndpointRegistry {
    /// Builds the registry for every resource the server exposes.
    pub fn build() -> Self {
        let filter_builders = [
            "identity",
            "role",
            "role-request",
            "role-tree-node",
            "audit",
            "password-policy",
            "script",
            "entity-event",
        ]
        .iter()
        .map(|entity| descriptor(entity))
        .collect();

        let mut resources = Vec::new();

        let mut identities = ResourceDoc {
            name: "identities".to_string(),
            routes: crud_routes("identities"),
            filter_fields: vec!["text", "disabled", "createdFrom", "createdTill", "page", "size"],
        };
        identities.routes.push(RouteDoc {
            method: "PATCH",
            path: "/identities/{id}/enable".to_string(),
        });
        identities.routes.push(RouteDoc {
            method: "PATCH",
            path: "/identities/{id}/disable".to_string(),
        });
        resources.push(identities);

        resources.push(ResourceDoc {
            name: "roles".to_string(),
            routes: crud_routes("roles"),
            filter_fields: vec!["text", "disabled", "page", "size"],
        });

        let mut role_requests = ResourceDoc {
            name: "role-requests".to_string(),
            routes: crud_routes("role-requests"),
            filter_fields: vec![
                "applicant", "ownerId", "state", "createdFrom", "createdTill", "page", "size",
            ],
        };
        role_requests.routes.push(RouteDoc {
            method: "PUT",
            path: "/role-requests/{id}/start".to_string(),
        });
        resources.push(role_requests);

        resources.push(ResourceDoc {
            name: "role-tree-nodes".to_string(),
            routes: crud_routes("role-tree-nodes"),
            filter_fields: vec!["text", "roleId", "page", "size"],
        });

        resources.push(ResourceDoc {
            name: "audits".to_string(),
            routes: read_routes("audits"),
            filter_fields: vec![
                "entityType", "entityId", "modifier", "from", "till", "page", "size",
            ],
        });

        resources.push(ResourceDoc {
            name: "password-policies".to_string(),
            routes: crud_routes("password-policies"),
            filter_fields: vec!["text", "defaultPolicy", "disabled", "page", "size"],
        });

        let mut scripts = ResourceDoc {
            name: "scripts".to_string(),
            routes: crud_routes("scripts"),
            filter_fields: vec!["text", "code", "category", "page", "size"],
        };
        scripts.routes.push(RouteDoc {
            method: "GET",
            path: "/scripts/{id}/file".to_string(),
        });
        resources.push(scripts);

        let mut entity_events = ResourceDoc {
            name: "entity-events".to_string(),
            routes: crud_routes("entity-events"),
            filter_fields: vec![
                "eventType", "ownerType", "ownerId", "states", "createdFrom", "createdTill",
                "page", "size",
            ],
        };
        entity_events.routes.push(RouteDoc {
            method: "DELETE",
            path: "/entity-events/action/bulk/delete".to_string(),
        });
        resources.push(entity_events);

        Self {
            filter_builders,
            resources,
        }
    }

    pub fn filter_builders(&self) -> &[FilterBuilderDescriptor] {
        &self.filter_builders
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDoc> {
        self.resources.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_resource() {
        let registry = EndpointRegistry::build();
        assert_eq!(registry.filter_builders().len(), 8);
        for name in [
            "identities",
            "roles",
            "role-requests",
            "role-tree-nodes",
            "audits",
            "password-policies",
            "scripts",
            "entity-events",
        ] {
            assert!(registry.resource(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn audit_endpoint_is_read_only() {
        let registry = EndpointRegistry::build();
        let doc = registry.resource("audits").unwrap();
        assert!(doc.routes.iter().all(|r| r.method == "GET"));
    }

    #[test]
    fn unknown_resource_is_absent() {
        let registry = EndpointRegistry::build();
        assert!(registry.resource("widgets").is_none());
    }
}
