//! Diesel models for role tree nodes.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::role_tree_node::RoleTreeNode as DomainRoleTreeNode;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = crate::schema::role_tree_nodes)]
pub struct RoleTreeNode {
    pub id: String,
    pub role_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::role_tree_nodes)]
pub struct NewRoleTreeNode {
    pub id: String,
    pub role_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<RoleTreeNode> for DomainRoleTreeNode {
    type Error = uuid::Error;

    fn try_from(row: RoleTreeNode) -> Result<Self, Self::Error> {
        Ok(DomainRoleTreeNode {
            id: Uuid::parse_str(&row.id)?,
            role_id: Uuid::parse_str(&row.role_id)?,
            name: row.name,
            created_at: row.created_at,
        })
    }
}
