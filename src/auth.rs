//! Bearer-token authentication and the authority model.
//!
//! Every protected route extracts an [`AuthenticatedUser`] from the
//! `Authorization: Bearer` header. Authorities are plain strings of the form
//! `GROUP_PERMISSION` (e.g. `IDENTITY_READ`); [`APP_ADMIN`] matches
//! everything. Services check authorities before touching the repository, so
//! a denied caller never learns whether the target resource exists.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::config::ServerConfig;
use crate::routes::error::ApiError;

/// Wildcard authority granting every permission.
pub const APP_ADMIN: &str = "APP_ADMIN";

/// Authority group of a resource type, i.e. the prefix of its authorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceGroup {
    Identity,
    Role,
    RoleRequest,
    RoleTreeNode,
    Audit,
    PasswordPolicy,
    Script,
    EntityEvent,
    Module,
}

impl ResourceGroup {
    pub const fn prefix(self) -> &'static str {
        match self {
            ResourceGroup::Identity => "IDENTITY",
            ResourceGroup::Role => "ROLE",
            ResourceGroup::RoleRequest => "ROLEREQUEST",
            ResourceGroup::RoleTreeNode => "ROLETREENODE",
            ResourceGroup::Audit => "AUDIT",
            ResourceGroup::PasswordPolicy => "PASSWORDPOLICY",
            ResourceGroup::Script => "SCRIPT",
            ResourceGroup::EntityEvent => "ENTITYEVENT",
            ResourceGroup::Module => "MODULE",
        }
    }

    /// Full authority string for a base permission, e.g. `IDENTITY_READ`.
    pub fn authority(self, permission: BasePermission) -> String {
        format!("{}_{}", self.prefix(), permission.as_str())
    }
}

/// Base permissions recognised for every resource group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasePermission {
    Read,
    Create,
    Update,
    Delete,
    Autocomplete,
}

impl BasePermission {
    pub const ALL: [BasePermission; 5] = [
        BasePermission::Read,
        BasePermission::Create,
        BasePermission::Update,
        BasePermission::Delete,
        BasePermission::Autocomplete,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            BasePermission::Read => "READ",
            BasePermission::Create => "CREATE",
            BasePermission::Update => "UPDATE",
            BasePermission::Delete => "DELETE",
            BasePermission::Autocomplete => "AUTOCOMPLETE",
        }
    }
}

/// Checks whether the authority set grants the given permission.
pub fn check_authority(
    authorities: &[String],
    group: ResourceGroup,
    permission: BasePermission,
) -> bool {
    let required = group.authority(permission);
    authorities
        .iter()
        .any(|a| a == APP_ADMIN || *a == required)
}

/// OR-of-authorities check: any single match grants access.
pub fn check_any_authority(
    authorities: &[String],
    group: ResourceGroup,
    permissions: &[BasePermission],
) -> bool {
    permissions
        .iter()
        .any(|p| check_authority(authorities, group, *p))
}

/// Base permissions the authority set holds within one resource group.
pub fn effective_permissions(authorities: &[String], group: ResourceGroup) -> Vec<&'static str> {
    BasePermission::ALL
        .iter()
        .filter(|p| check_authority(authorities, group, **p))
        .map(|p| p.as_str())
        .collect()
}

/// JWT claims carried by the bearer token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    id: Uuid,
    authorities: Vec<String>,
    exp: i64,
}

/// The caller identity decoded from the bearer token.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
    pub authorities: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new(id: Uuid, username: impl Into<String>, authorities: Vec<String>) -> Self {
        Self {
            id,
            username: username.into(),
            authorities,
        }
    }

    fn from_http_request(req: &HttpRequest) -> Result<Self, ApiError> {
        let config = req
            .app_data::<web::Data<ServerConfig>>()
            .ok_or_else(|| ApiError::Internal("server config is not wired".to_string()))?;

        let header = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized)?;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| ApiError::Unauthorized)?;

        Ok(Self {
            id: data.claims.id,
            username: data.claims.sub,
            authorities: data.claims.authorities,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}

/// Issues a signed bearer token for the given user, valid for `ttl_secs`.
pub fn issue_token(
    user: &AuthenticatedUser,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user.username.clone(),
        id: user.id,
        authorities: user.authorities.clone(),
        exp: Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorities(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_authority_matches() {
        let held = authorities(&["IDENTITY_READ"]);
        assert!(check_authority(
            &held,
            ResourceGroup::Identity,
            BasePermission::Read
        ));
        assert!(!check_authority(
            &held,
            ResourceGroup::Identity,
            BasePermission::Update
        ));
        assert!(!check_authority(
            &held,
            ResourceGroup::Role,
            BasePermission::Read
        ));
    }

    #[test]
    fn admin_matches_everything() {
        let held = authorities(&[APP_ADMIN]);
        for permission in BasePermission::ALL {
            assert!(check_authority(&held, ResourceGroup::Script, permission));
        }
    }

    #[test]
    fn any_authority_is_an_or() {
        let held = authorities(&["ROLE_AUTOCOMPLETE"]);
        assert!(check_any_authority(
            &held,
            ResourceGroup::Role,
            &[BasePermission::Autocomplete, BasePermission::Read]
        ));
        assert!(!check_any_authority(
            &held,
            ResourceGroup::Role,
            &[BasePermission::Read]
        ));
    }

    #[test]
    fn issued_token_round_trips_through_the_extractor() {
        let config = ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "unused".to_string(),
            secret: "s3cret".to_string(),
        };
        let user = AuthenticatedUser::new(Uuid::new_v4(), "alice", authorities(&["IDENTITY_READ"]));
        let token = issue_token(&user, &config.secret, 60).unwrap();

        let req = actix_web::test::TestRequest::default()
            .app_data(web::Data::new(config))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_http_request();
        let decoded = AuthenticatedUser::from_http_request(&req).unwrap();
        assert_eq!(decoded.id, user.id);
        assert_eq!(decoded.username, "alice");
        assert_eq!(decoded.authorities, user.authorities);
    }

    #[test]
    fn effective_permissions_filters_by_group() {
        let held = authorities(&["IDENTITY_READ", "IDENTITY_UPDATE", "ROLE_DELETE"]);
        assert_eq!(
            effective_permissions(&held, ResourceGroup::Identity),
            vec!["READ", "UPDATE"]
        );
    }
}
