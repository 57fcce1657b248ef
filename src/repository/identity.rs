//! Repository implementation for identities.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::identity::{Identity, NewIdentity, UpdateIdentity};
use crate::models::identity::{
    Identity as DbIdentity, NewIdentity as DbNewIdentity, UpdateIdentity as DbUpdateIdentity,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, IdentityFilter, IdentityReader, IdentityWriter, page_bounds};
use crate::schema::identities;

fn filtered(filter: &IdentityFilter) -> identities::BoxedQuery<'static, Sqlite> {
    let mut query = identities::table.into_boxed();

    if let Some(text) = &filter.text {
        let pattern = format!("%{text}%");
        query = query.filter(
            identities::username
                .like(pattern.clone())
                .nullable()
                .or(identities::email.like(pattern.clone()))
                .or(identities::last_name.like(pattern)),
        );
    }
    if let Some(disabled) = filter.disabled {
        query = query.filter(identities::disabled.eq(disabled));
    }
    if let Some(from) = filter.created_from {
        query = query.filter(identities::created_at.ge(from));
    }
    if let Some(to) = filter.created_to {
        query = query.filter(identities::created_at.le(to));
    }

    query
}

impl IdentityReader for DieselRepository {
    fn get_identity(&self, id: Uuid) -> RepositoryResult<Option<Identity>> {
        let mut conn = self.conn()?;
        let row = identities::table
            .find(id.to_string())
            .first::<DbIdentity>(&mut conn)
            .optional()?;

        row.map(Identity::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_identity_by_username(&self, username: &str) -> RepositoryResult<Option<Identity>> {
        let mut conn = self.conn()?;
        let row = identities::table
            .filter(identities::username.eq(username))
            .first::<DbIdentity>(&mut conn)
            .optional()?;

        row.map(Identity::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_identities(&self, filter: IdentityFilter) -> RepositoryResult<(usize, Vec<Identity>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(identities::username.asc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbIdentity>(&mut conn)?
            .into_iter()
            .map(Identity::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }

    fn identity_password_hash(&self, id: Uuid) -> RepositoryResult<Option<String>> {
        let mut conn = self.conn()?;
        let hash = identities::table
            .find(id.to_string())
            .select(identities::password_hash)
            .first::<Option<String>>(&mut conn)
            .optional()?;

        match hash {
            Some(hash) => Ok(hash),
            None => Err(RepositoryError::NotFound),
        }
    }
}

impl IdentityWriter for DieselRepository {
    fn create_identity(
        &self,
        new_identity: &NewIdentity,
        password_hash: Option<String>,
    ) -> RepositoryResult<Identity> {
        let mut conn = self.conn()?;

        let db_new = DbNewIdentity {
            id: Uuid::new_v4().to_string(),
            username: new_identity.username.clone(),
            first_name: new_identity.first_name.clone(),
            last_name: new_identity.last_name.clone(),
            email: new_identity.email.clone(),
            disabled: false,
            password_hash,
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(identities::table)
            .values(&db_new)
            .get_result::<DbIdentity>(&mut conn)?;

        Ok(Identity::try_from(row)?)
    }

    fn update_identity(&self, id: Uuid, updates: &UpdateIdentity) -> RepositoryResult<Identity> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateIdentity {
            username: updates.username.clone(),
            first_name: updates.first_name.clone(),
            last_name: updates.last_name.clone(),
            email: updates.email.clone(),
            disabled: updates.disabled,
            modified_at: Some(Utc::now().naive_utc()),
        };

        let row = diesel::update(identities::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbIdentity>(&mut conn)?;

        Ok(Identity::try_from(row)?)
    }

    fn set_identity_disabled(&self, id: Uuid, disabled: bool) -> RepositoryResult<Identity> {
        let mut conn = self.conn()?;

        let row = diesel::update(identities::table.find(id.to_string()))
            .set((
                identities::disabled.eq(disabled),
                identities::modified_at.eq(Some(Utc::now().naive_utc())),
            ))
            .get_result::<DbIdentity>(&mut conn)?;

        Ok(Identity::try_from(row)?)
    }

    fn set_identity_password(&self, id: Uuid, password_hash: &str) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::update(identities::table.find(id.to_string()))
            .set((
                identities::password_hash.eq(Some(password_hash.to_string())),
                identities::modified_at.eq(Some(Utc::now().naive_utc())),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn delete_identity(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(identities::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
