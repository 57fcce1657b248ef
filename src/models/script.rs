//! Diesel models for stored scripts.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::script::Script as DomainScript;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::scripts)]
pub struct Script {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub script: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::scripts)]
pub struct NewScript {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: String,
    pub script: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::scripts)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateScript {
    pub code: String,
    pub name: String,
    pub category: String,
    pub script: String,
    pub description: Option<String>,
    pub modified_at: Option<NaiveDateTime>,
}

impl TryFrom<Script> for DomainScript {
    type Error = uuid::Error;

    fn try_from(row: Script) -> Result<Self, Self::Error> {
        Ok(DomainScript {
            id: Uuid::parse_str(&row.id)?,
            code: row.code,
            name: row.name,
            category: row.category.into(),
            script: row.script,
            description: row.description,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}
