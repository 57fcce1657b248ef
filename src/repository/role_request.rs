//! Repository implementation for role requests.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::role_request::{
    NewRoleRequest, RoleRequest, RoleRequestState, UpdateRoleRequest,
};
use crate::models::role_request::{
    NewRoleRequest as DbNewRoleRequest, RoleRequest as DbRoleRequest,
    UpdateRoleRequest as DbUpdateRoleRequest,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, RoleRequestFilter, RoleRequestReader, RoleRequestWriter, page_bounds,
};
use crate::schema::role_requests;

fn filtered(filter: &RoleRequestFilter) -> role_requests::BoxedQuery<'static, Sqlite> {
    let mut query = role_requests::table.into_boxed();

    if let Some(applicant_id) = filter.applicant_id {
        query = query.filter(role_requests::applicant_id.eq(applicant_id.to_string()));
    }
    if let Some(state) = filter.state {
        query = query.filter(role_requests::state.eq(state.to_string()));
    }
    if let Some(from) = filter.created_from {
        query = query.filter(role_requests::created_at.ge(from));
    }
    if let Some(to) = filter.created_to {
        query = query.filter(role_requests::created_at.le(to));
    }

    query
}

impl RoleRequestReader for DieselRepository {
    fn get_role_request(&self, id: Uuid) -> RepositoryResult<Option<RoleRequest>> {
        let mut conn = self.conn()?;
        let row = role_requests::table
            .find(id.to_string())
            .first::<DbRoleRequest>(&mut conn)
            .optional()?;

        row.map(RoleRequest::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_role_requests(
        &self,
        filter: RoleRequestFilter,
    ) -> RepositoryResult<(usize, Vec<RoleRequest>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(role_requests::created_at.desc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbRoleRequest>(&mut conn)?
            .into_iter()
            .map(RoleRequest::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl RoleRequestWriter for DieselRepository {
    fn create_role_request(&self, new_request: &NewRoleRequest) -> RepositoryResult<RoleRequest> {
        let mut conn = self.conn()?;

        let db_new = DbNewRoleRequest {
            id: Uuid::new_v4().to_string(),
            applicant_id: new_request.applicant_id.to_string(),
            state: RoleRequestState::Concept.to_string(),
            description: new_request.description.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(role_requests::table)
            .values(&db_new)
            .get_result::<DbRoleRequest>(&mut conn)?;

        Ok(RoleRequest::try_from(row)?)
    }

    fn update_role_request(
        &self,
        id: Uuid,
        updates: &UpdateRoleRequest,
    ) -> RepositoryResult<RoleRequest> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateRoleRequest {
            state: updates.state.to_string(),
            description: updates.description.clone(),
            modified_at: Some(Utc::now().naive_utc()),
        };

        let row = diesel::update(role_requests::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbRoleRequest>(&mut conn)?;

        Ok(RoleRequest::try_from(row)?)
    }

    fn delete_role_request(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(role_requests::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
