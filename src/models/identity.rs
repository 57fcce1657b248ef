//! Diesel models for identities.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::identity::Identity as DomainIdentity;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::identities)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub password_hash: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::identities)]
pub struct NewIdentity {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub password_hash: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::identities)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateIdentity {
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub disabled: bool,
    pub modified_at: Option<NaiveDateTime>,
}

impl TryFrom<Identity> for DomainIdentity {
    type Error = uuid::Error;

    fn try_from(row: Identity) -> Result<Self, Self::Error> {
        Ok(DomainIdentity {
            id: Uuid::parse_str(&row.id)?,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            disabled: row.disabled,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}
