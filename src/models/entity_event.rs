//! Diesel models for entity events.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entity_event::{EntityEvent as DomainEntityEvent, EntityEventState};
use crate::models::RowConversionError;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::entity_events)]
pub struct EntityEvent {
    pub id: String,
    pub event_type: String,
    pub owner_type: String,
    pub owner_id: String,
    pub state: String,
    pub result_message: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::entity_events)]
pub struct NewEntityEvent {
    pub id: String,
    pub event_type: String,
    pub owner_type: String,
    pub owner_id: String,
    pub state: String,
    pub result_message: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::entity_events)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateEntityEvent {
    pub state: String,
    pub result_message: Option<String>,
}

impl TryFrom<EntityEvent> for DomainEntityEvent {
    type Error = RowConversionError;

    fn try_from(row: EntityEvent) -> Result<Self, Self::Error> {
        Ok(DomainEntityEvent {
            id: Uuid::parse_str(&row.id)?,
            event_type: row.event_type.into(),
            owner_type: row.owner_type,
            owner_id: Uuid::parse_str(&row.owner_id)?,
            state: row
                .state
                .parse::<EntityEventState>()
                .map_err(RowConversionError::Value)?,
            result_message: row.result_message,
            created_at: row.created_at,
        })
    }
}
