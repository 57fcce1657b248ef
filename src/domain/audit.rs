use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One immutable audit-trail record. Audit entries are written by the
/// services on every mutation and are read-only through the API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub modification: Modification,
    pub modifier: String,
    pub modified_at: NaiveDateTime,
}

/// Kind of change recorded by an audit entry.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Modification {
    Create,
    Update,
    Delete,
}

impl Display for Modification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Modification::Create => "CREATE",
            Modification::Update => "UPDATE",
            Modification::Delete => "DELETE",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Modification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Modification::Create),
            "UPDATE" => Ok(Modification::Update),
            "DELETE" => Ok(Modification::Delete),
            other => Err(format!("unknown modification: {other}")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewAuditEntry {
    pub entity_type: String,
    pub entity_id: Uuid,
    pub modification: Modification,
    pub modifier: String,
    pub modified_at: NaiveDateTime,
}
