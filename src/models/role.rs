//! Diesel models for roles.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::role::Role as DomainRole;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::roles)]
pub struct Role {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub priority: i32,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::roles)]
pub struct NewRole {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub priority: i32,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::roles)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateRole {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub disabled: bool,
    pub priority: i32,
    pub modified_at: Option<NaiveDateTime>,
}

impl TryFrom<Role> for DomainRole {
    type Error = uuid::Error;

    fn try_from(row: Role) -> Result<Self, Self::Error> {
        Ok(DomainRole {
            id: Uuid::parse_str(&row.id)?,
            code: row.code,
            name: row.name,
            description: row.description,
            disabled: row.disabled,
            priority: row.priority,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}
