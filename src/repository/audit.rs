//! Repository implementation for the audit trail. Entries are append-only.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::audit::{AuditEntry, NewAuditEntry};
use crate::models::audit::{AuditEntry as DbAuditEntry, NewAuditEntry as DbNewAuditEntry};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AuditFilter, AuditReader, AuditWriter, DieselRepository, page_bounds};
use crate::schema::audit_log;

fn filtered(filter: &AuditFilter) -> audit_log::BoxedQuery<'static, Sqlite> {
    let mut query = audit_log::table.into_boxed();

    if let Some(entity_type) = &filter.entity_type {
        query = query.filter(audit_log::entity_type.eq(entity_type.clone()));
    }
    if let Some(entity_id) = filter.entity_id {
        query = query.filter(audit_log::entity_id.eq(entity_id.to_string()));
    }
    if let Some(modifier) = &filter.modifier {
        query = query.filter(audit_log::modifier.eq(modifier.clone()));
    }
    if let Some(from) = filter.from {
        query = query.filter(audit_log::modified_at.ge(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(audit_log::modified_at.le(to));
    }

    query
}

impl AuditReader for DieselRepository {
    fn get_audit_entry(&self, id: Uuid) -> RepositoryResult<Option<AuditEntry>> {
        let mut conn = self.conn()?;
        let row = audit_log::table
            .find(id.to_string())
            .first::<DbAuditEntry>(&mut conn)
            .optional()?;

        row.map(AuditEntry::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_audit_entries(
        &self,
        filter: AuditFilter,
    ) -> RepositoryResult<(usize, Vec<AuditEntry>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(audit_log::modified_at.desc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbAuditEntry>(&mut conn)?
            .into_iter()
            .map(AuditEntry::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl AuditWriter for DieselRepository {
    fn create_audit_entry(&self, entry: &NewAuditEntry) -> RepositoryResult<AuditEntry> {
        let mut conn = self.conn()?;

        let db_new: DbNewAuditEntry = entry.into();

        let row = diesel::insert_into(audit_log::table)
            .values(&db_new)
            .get_result::<DbAuditEntry>(&mut conn)?;

        Ok(AuditEntry::try_from(row)?)
    }
}
