//! Repository implementation for stored scripts.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::script::{NewScript, Script, UpdateScript};
use crate::models::script::{
    NewScript as DbNewScript, Script as DbScript, UpdateScript as DbUpdateScript,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ScriptFilter, ScriptReader, ScriptWriter, page_bounds};
use crate::schema::scripts;

fn filtered(filter: &ScriptFilter) -> scripts::BoxedQuery<'static, Sqlite> {
    let mut query = scripts::table.into_boxed();

    if let Some(text) = &filter.text {
        let pattern = format!("%{text}%");
        query = query.filter(
            scripts::code
                .like(pattern.clone())
                .or(scripts::name.like(pattern)),
        );
    }
    if let Some(code) = &filter.code {
        query = query.filter(scripts::code.eq(code.clone()));
    }
    if let Some(category) = &filter.category {
        query = query.filter(scripts::category.eq(category.to_string()));
    }

    query
}

impl ScriptReader for DieselRepository {
    fn get_script(&self, id: Uuid) -> RepositoryResult<Option<Script>> {
        let mut conn = self.conn()?;
        let row = scripts::table
            .find(id.to_string())
            .first::<DbScript>(&mut conn)
            .optional()?;

        row.map(Script::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_scripts(&self, filter: ScriptFilter) -> RepositoryResult<(usize, Vec<Script>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(scripts::code.asc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbScript>(&mut conn)?
            .into_iter()
            .map(Script::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl ScriptWriter for DieselRepository {
    fn create_script(&self, new_script: &NewScript) -> RepositoryResult<Script> {
        let mut conn = self.conn()?;

        let db_new = DbNewScript {
            id: Uuid::new_v4().to_string(),
            code: new_script.code.clone(),
            name: new_script.name.clone(),
            category: new_script.category.to_string(),
            script: new_script.script.clone(),
            description: new_script.description.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(scripts::table)
            .values(&db_new)
            .get_result::<DbScript>(&mut conn)?;

        Ok(Script::try_from(row)?)
    }

    fn update_script(&self, id: Uuid, updates: &UpdateScript) -> RepositoryResult<Script> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateScript {
            code: updates.code.clone(),
            name: updates.name.clone(),
            category: updates.category.to_string(),
            script: updates.script.clone(),
            description: updates.description.clone(),
            modified_at: Some(Utc::now().naive_utc()),
        };

        let row = diesel::update(scripts::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbScript>(&mut conn)?;

        Ok(Script::try_from(row)?)
    }

    fn delete_script(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(scripts::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
