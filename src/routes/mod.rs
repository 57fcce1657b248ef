//! HTTP layer: the generic REST controller, per-resource route tables and
//! the shared error and query-string plumbing.

use actix_web::Scope;
use actix_web::web;

pub mod audit;
pub mod entity_event;
pub mod error;
pub mod identity;
pub mod password_policy;
pub mod public;
pub mod query;
pub mod resource;
pub mod role;
pub mod role_request;
pub mod role_tree_node;
pub mod script;
pub mod system;

/// Full API surface mounted under `/api/v1`. The public scope registers
/// before the bare system scope so it is not shadowed.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(identity::scope())
        .service(role::scope())
        .service(role_request::scope())
        .service(role_tree_node::scope())
        .service(audit::scope())
        .service(password_policy::scope())
        .service(script::scope())
        .service(entity_event::scope())
        .service(public::scope())
        .service(system::scope())
}
