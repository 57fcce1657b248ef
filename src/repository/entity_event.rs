//! Repository implementation for entity events.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::entity_event::{EntityEvent, NewEntityEvent, UpdateEntityEvent};
use crate::models::entity_event::{
    EntityEvent as DbEntityEvent, NewEntityEvent as DbNewEntityEvent,
    UpdateEntityEvent as DbUpdateEntityEvent,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EntityEventFilter, EntityEventReader, EntityEventWriter, page_bounds,
};
use crate::schema::entity_events;

fn filtered(filter: &EntityEventFilter) -> entity_events::BoxedQuery<'static, Sqlite> {
    let mut query = entity_events::table.into_boxed();

    if let Some(event_type) = &filter.event_type {
        query = query.filter(entity_events::event_type.eq(event_type.to_string()));
    }
    if let Some(owner_type) = &filter.owner_type {
        query = query.filter(entity_events::owner_type.eq(owner_type.clone()));
    }
    if let Some(owner_id) = filter.owner_id {
        query = query.filter(entity_events::owner_id.eq(owner_id.to_string()));
    }
    if let Some(state) = filter.state {
        query = query.filter(entity_events::state.eq(state.to_string()));
    }
    if let Some(from) = filter.created_from {
        query = query.filter(entity_events::created_at.ge(from));
    }
    if let Some(to) = filter.created_to {
        query = query.filter(entity_events::created_at.le(to));
    }

    query
}

impl EntityEventReader for DieselRepository {
    fn get_entity_event(&self, id: Uuid) -> RepositoryResult<Option<EntityEvent>> {
        let mut conn = self.conn()?;
        let row = entity_events::table
            .find(id.to_string())
            .first::<DbEntityEvent>(&mut conn)
            .optional()?;

        row.map(EntityEvent::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_entity_events(
        &self,
        filter: EntityEventFilter,
    ) -> RepositoryResult<(usize, Vec<EntityEvent>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(entity_events::created_at.desc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbEntityEvent>(&mut conn)?
            .into_iter()
            .map(EntityEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl EntityEventWriter for DieselRepository {
    fn create_entity_event(&self, new_event: &NewEntityEvent) -> RepositoryResult<EntityEvent> {
        let mut conn = self.conn()?;

        let db_new = DbNewEntityEvent {
            id: Uuid::new_v4().to_string(),
            event_type: new_event.event_type.to_string(),
            owner_type: new_event.owner_type.clone(),
            owner_id: new_event.owner_id.to_string(),
            state: new_event.state.to_string(),
            result_message: new_event.result_message.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(entity_events::table)
            .values(&db_new)
            .get_result::<DbEntityEvent>(&mut conn)?;

        Ok(EntityEvent::try_from(row)?)
    }

    fn update_entity_event(
        &self,
        id: Uuid,
        updates: &UpdateEntityEvent,
    ) -> RepositoryResult<EntityEvent> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateEntityEvent {
            state: updates.state.to_string(),
            result_message: updates.result_message.clone(),
        };

        let row = diesel::update(entity_events::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbEntityEvent>(&mut conn)?;

        Ok(EntityEvent::try_from(row)?)
    }

    fn delete_entity_event(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(entity_events::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_entity_events(&self, filter: EntityEventFilter) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        // Two statements; acceptable for a maintenance endpoint.
        let ids = filtered(&filter)
            .select(entity_events::id)
            .load::<String>(&mut conn)?;

        let affected =
            diesel::delete(entity_events::table.filter(entity_events::id.eq_any(ids)))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
