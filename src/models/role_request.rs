//! Diesel models for role requests.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::role_request::{RoleRequest as DomainRoleRequest, RoleRequestState};

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::role_requests)]
pub struct RoleRequest {
    pub id: String,
    pub applicant_id: String,
    pub state: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::role_requests)]
pub struct NewRoleRequest {
    pub id: String,
    pub applicant_id: String,
    pub state: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::role_requests)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateRoleRequest {
    pub state: String,
    pub description: Option<String>,
    pub modified_at: Option<NaiveDateTime>,
}

use crate::models::RowConversionError;

impl TryFrom<RoleRequest> for DomainRoleRequest {
    type Error = RowConversionError;

    fn try_from(row: RoleRequest) -> Result<Self, Self::Error> {
        Ok(DomainRoleRequest {
            id: Uuid::parse_str(&row.id)?,
            applicant_id: Uuid::parse_str(&row.applicant_id)?,
            state: row.state.parse::<RoleRequestState>().map_err(RowConversionError::Value)?,
            description: row.description,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}
