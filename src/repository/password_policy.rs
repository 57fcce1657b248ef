//! Repository implementation for password policies.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::password_policy::{NewPasswordPolicy, PasswordPolicy, UpdatePasswordPolicy};
use crate::models::password_policy::{
    NewPasswordPolicy as DbNewPasswordPolicy, PasswordPolicy as DbPasswordPolicy,
    UpdatePasswordPolicy as DbUpdatePasswordPolicy,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, PasswordPolicyFilter, PasswordPolicyReader, PasswordPolicyWriter,
    page_bounds,
};
use crate::schema::password_policies;

fn filtered(filter: &PasswordPolicyFilter) -> password_policies::BoxedQuery<'static, Sqlite> {
    let mut query = password_policies::table.into_boxed();

    if let Some(text) = &filter.text {
        let pattern = format!("%{text}%");
        query = query.filter(
            password_policies::code
                .like(pattern.clone())
                .or(password_policies::name.like(pattern)),
        );
    }
    if let Some(default_policy) = filter.default_policy {
        query = query.filter(password_policies::default_policy.eq(default_policy));
    }
    if let Some(disabled) = filter.disabled {
        query = query.filter(password_policies::disabled.eq(disabled));
    }

    query
}

impl PasswordPolicyReader for DieselRepository {
    fn get_password_policy(&self, id: Uuid) -> RepositoryResult<Option<PasswordPolicy>> {
        let mut conn = self.conn()?;
        let row = password_policies::table
            .find(id.to_string())
            .first::<DbPasswordPolicy>(&mut conn)
            .optional()?;

        row.map(PasswordPolicy::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_default_password_policy(&self) -> RepositoryResult<Option<PasswordPolicy>> {
        let mut conn = self.conn()?;
        let row = password_policies::table
            .filter(password_policies::default_policy.eq(true))
            .filter(password_policies::disabled.eq(false))
            .first::<DbPasswordPolicy>(&mut conn)
            .optional()?;

        row.map(PasswordPolicy::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_password_policies(
        &self,
        filter: PasswordPolicyFilter,
    ) -> RepositoryResult<(usize, Vec<PasswordPolicy>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(password_policies::code.asc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbPasswordPolicy>(&mut conn)?
            .into_iter()
            .map(PasswordPolicy::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl PasswordPolicyWriter for DieselRepository {
    fn create_password_policy(
        &self,
        new_policy: &NewPasswordPolicy,
    ) -> RepositoryResult<PasswordPolicy> {
        let mut conn = self.conn()?;

        let db_new = DbNewPasswordPolicy {
            id: Uuid::new_v4().to_string(),
            code: new_policy.code.clone(),
            name: new_policy.name.clone(),
            min_length: new_policy.min_length,
            max_length: new_policy.max_length,
            min_upper_char: new_policy.min_upper_char,
            min_lower_char: new_policy.min_lower_char,
            min_number: new_policy.min_number,
            min_special_char: new_policy.min_special_char,
            default_policy: new_policy.default_policy,
            disabled: new_policy.disabled,
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(password_policies::table)
            .values(&db_new)
            .get_result::<DbPasswordPolicy>(&mut conn)?;

        Ok(PasswordPolicy::try_from(row)?)
    }

    fn update_password_policy(
        &self,
        id: Uuid,
        updates: &UpdatePasswordPolicy,
    ) -> RepositoryResult<PasswordPolicy> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdatePasswordPolicy {
            code: updates.code.clone(),
            name: updates.name.clone(),
            min_length: updates.min_length,
            max_length: updates.max_length,
            min_upper_char: updates.min_upper_char,
            min_lower_char: updates.min_lower_char,
            min_number: updates.min_number,
            min_special_char: updates.min_special_char,
            default_policy: updates.default_policy,
            disabled: updates.disabled,
        };

        let row = diesel::update(password_policies::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbPasswordPolicy>(&mut conn)?;

        Ok(PasswordPolicy::try_from(row)?)
    }

    fn delete_password_policy(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(password_policies::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
