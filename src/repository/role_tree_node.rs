//! Repository implementation for role tree nodes.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::domain::role_tree_node::{NewRoleTreeNode, RoleTreeNode};
use crate::models::role_tree_node::{
    NewRoleTreeNode as DbNewRoleTreeNode, RoleTreeNode as DbRoleTreeNode,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, RoleTreeNodeFilter, RoleTreeNodeReader, RoleTreeNodeWriter, page_bounds,
};
use crate::schema::role_tree_nodes;

fn filtered(filter: &RoleTreeNodeFilter) -> role_tree_nodes::BoxedQuery<'static, Sqlite> {
    let mut query = role_tree_nodes::table.into_boxed();

    if let Some(text) = &filter.text {
        let pattern = format!("%{text}%");
        query = query.filter(role_tree_nodes::name.like(pattern));
    }
    if let Some(role_id) = filter.role_id {
        query = query.filter(role_tree_nodes::role_id.eq(role_id.to_string()));
    }

    query
}

impl RoleTreeNodeReader for DieselRepository {
    fn get_role_tree_node(&self, id: Uuid) -> RepositoryResult<Option<RoleTreeNode>> {
        let mut conn = self.conn()?;
        let row = role_tree_nodes::table
            .find(id.to_string())
            .first::<DbRoleTreeNode>(&mut conn)
            .optional()?;

        row.map(RoleTreeNode::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_role_tree_nodes(
        &self,
        filter: RoleTreeNodeFilter,
    ) -> RepositoryResult<(usize, Vec<RoleTreeNode>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&filter).count().get_result(&mut conn)?;

        let mut query = filtered(&filter).order(role_tree_nodes::name.asc());
        if let Some((limit, offset)) = page_bounds(&filter.pagination) {
            query = query.limit(limit).offset(offset);
        }

        let items = query
            .load::<DbRoleTreeNode>(&mut conn)?
            .into_iter()
            .map(RoleTreeNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((total as usize, items))
    }
}

impl RoleTreeNodeWriter for DieselRepository {
    fn create_role_tree_node(&self, new_node: &NewRoleTreeNode) -> RepositoryResult<RoleTreeNode> {
        let mut conn = self.conn()?;

        let db_new = DbNewRoleTreeNode {
            id: Uuid::new_v4().to_string(),
            role_id: new_node.role_id.to_string(),
            name: new_node.name.clone(),
            created_at: Utc::now().naive_utc(),
        };

        let row = diesel::insert_into(role_tree_nodes::table)
            .values(&db_new)
            .get_result::<DbRoleTreeNode>(&mut conn)?;

        Ok(RoleTreeNode::try_from(row)?)
    }

    fn delete_role_tree_node(&self, id: Uuid) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected =
            diesel::delete(role_tree_nodes::table.find(id.to_string())).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
