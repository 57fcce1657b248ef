//! Diesel models for the audit trail.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::audit::{AuditEntry as DomainAuditEntry, Modification, NewAuditEntry as DomainNewAuditEntry};
use crate::models::RowConversionError;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct AuditEntry {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub modification: String,
    pub modifier: String,
    pub modified_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_log)]
pub struct NewAuditEntry {
    pub id: String,
    pub entity_type: String,
    pub entity_id: String,
    pub modification: String,
    pub modifier: String,
    pub modified_at: NaiveDateTime,
}

impl TryFrom<AuditEntry> for DomainAuditEntry {
    type Error = RowConversionError;

    fn try_from(row: AuditEntry) -> Result<Self, Self::Error> {
        Ok(DomainAuditEntry {
            id: Uuid::parse_str(&row.id)?,
            entity_type: row.entity_type,
            entity_id: Uuid::parse_str(&row.entity_id)?,
            modification: row
                .modification
                .parse::<Modification>()
                .map_err(RowConversionError::Value)?,
            modifier: row.modifier,
            modified_at: row.modified_at,
        })
    }
}

impl From<&DomainNewAuditEntry> for NewAuditEntry {
    fn from(entry: &DomainNewAuditEntry) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_type: entry.entity_type.clone(),
            entity_id: entry.entity_id.to_string(),
            modification: entry.modification.to_string(),
            modifier: entry.modifier.clone(),
            modified_at: entry.modified_at,
        }
    }
}
