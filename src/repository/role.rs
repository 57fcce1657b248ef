//! Repository implementation for roles.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::role::{NewRole, Role, UpdateRole};
use crate::models::role::{Role as DbRole, NewRole as DbNewRole, UpdateRole as DbUpdateRole};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RoleFilter, RoleReader, RoleWriter, page_bounds};
use crate::schema::roles;

fn filtered(filter: &RoleFilter) -> roles::BoxedQuery<'static, Sqlite> {
    let mut query = roles::table.into_boxed();

    if let Some(text) = &filter.text {
        let pattern = format!("%{text}%");
        query = query.filter(
            roles::code
                .like(pattern.clone())
                .or(roles::name.like(pattern)),
        );
    }
    if let Some(disabled) = filter.disabled {
        query = query.filter(roles::disabled.eq(disabled));
    }

    query
}

impl RoleReader for DieselRepository {
    fn get_role(&self, id: Uuid) -> RepositoryResult<Option<Role>> {
        let mut conn = self.conn()?;
        let row = roles::table
            .find(id.to_string())
            .first::<DbRole>(&mut conn)
            .optional()?;

        row.map(Role::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_roles(&self, filter: RoleFilter) -> RepositoryResult<(usize, Vec<Role>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(roles::code.asc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbRole>(&mut conn)?
            .into_iter()
            .map(Role::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl RoleWriter for DieselRepository {
    fn create_role(&self, new_role: &NewRole) -> RepositoryResult<Role> {
        let mut conn = self.conn()?;

        let db_new = DbNewRole {
            id: Uuid::new_v4().to_string(),
            code: new_role.code.clone(),
            name: new_role.name.clone(),
            description: new_role.description.clone(),
            disabled: new_role.disabled,
            priority: new_role.priority,
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(roles::table)
            .values(&db_new)
            .get_result::<DbRole>(&mut conn)?;

        Ok(Role::try_from(row)?)
    }

    fn update_role(&self, id: Uuid, updates: &UpdateRole) -> RepositoryResult<Role> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateRole {
            code: updates.code.clone(),
            name: updates.name.clone(),
            description: updates.description.clone(),
            disabled: updates.disabled,
            priority: updates.priority,
            modified_at: Some(Utc::now().naive_utc()),
        };

        let row = diesel::update(roles::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbRole>(&mut conn)?;

        Ok(Role::try_from(row)?)
    }

    fn delete_role(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(roles::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
