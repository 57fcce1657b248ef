//! Diesel models for password policies.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::password_policy::PasswordPolicy as DomainPasswordPolicy;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::password_policies)]
pub struct PasswordPolicy {
    pub id: String,
    pub code: String,
    pub name: String,
    pub min_length: i32,
    pub max_length: i32,
    pub min_upper_char: i32,
    pub min_lower_char: i32,
    pub min_number: i32,
    pub min_special_char: i32,
    pub default_policy: bool,
    pub disabled: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::password_policies)]
pub struct NewPasswordPolicy {
    pub id: String,
    pub code: String,
    pub name: String,
    pub min_length: i32,
    pub max_length: i32,
    pub min_upper_char: i32,
    pub min_lower_char: i32,
    pub min_number: i32,
    pub min_special_char: i32,
    pub default_policy: bool,
    pub disabled: bool,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::password_policies)]
pub struct UpdatePasswordPolicy {
    pub code: String,
    pub name: String,
    pub min_length: i32,
    pub max_length: i32,
    pub min_upper_char: i32,
    pub min_lower_char: i32,
    pub min_number: i32,
    pub min_special_char: i32,
    pub default_policy: bool,
    pub disabled: bool,
}

impl TryFrom<PasswordPolicy> for DomainPasswordPolicy {
    type Error = uuid::Error;

    fn try_from(row: PasswordPolicy) -> Result<Self, Self::Error> {
        Ok(DomainPasswordPolicy {
            id: Uuid::parse_str(&row.id)?,
            code: row.code,
            name: row.name,
            min_length: row.min_length,
            max_length: row.max_length,
            min_upper_char: row.min_upper_char,
            min_lower_char: row.min_lower_char,
            min_number: row.min_number,
            min_special_char: row.min_special_char,
            default_policy: row.default_policy,
            disabled: row.disabled,
            created_at: row.created_at,
        })
    }
}
