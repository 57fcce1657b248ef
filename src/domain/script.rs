use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored server-side script.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Script {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub category: ScriptCategory,
    pub script: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub modified_at: Option<NaiveDateTime>,
}

/// Serialized as its `Display` form so responses, the `category` filter
/// parameter and the stored column all carry the same string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptCategory {
    Default,
    Transform,
    System,
    Other(String),
}

impl Serialize for ScriptCategory {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScriptCategory {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(ScriptCategory::from(String::deserialize(deserializer)?))
    }
}

/// Strict form used by the `category` filter parameter.
impl std::str::FromStr for ScriptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEFAULT" => Ok(ScriptCategory::Default),
            "TRANSFORM" => Ok(ScriptCategory::Transform),
            "SYSTEM" => Ok(ScriptCategory::System),
            other => Err(format!("unknown script category: {other}")),
        }
    }
}

impl Display for ScriptCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptCategory::Default => write!(f, "DEFAULT"),
            ScriptCategory::Transform => write!(f, "TRANSFORM"),
            ScriptCategory::System => write!(f, "SYSTEM"),
            ScriptCategory::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ScriptCategory {
    fn from(s: &str) -> Self {
        match s {
            "DEFAULT" => ScriptCategory::Default,
            "TRANSFORM" => ScriptCategory::Transform,
            "SYSTEM" => ScriptCategory::System,
            _ => ScriptCategory::Other(s.to_string()),
        }
    }
}

impl From<String> for ScriptCategory {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct NewScript {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category: ScriptCategory,
    pub script: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct UpdateScript {
    #[validate(length(min = 1, max = 255))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub category: ScriptCategory,
    pub script: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatchScript {
    pub code: Option<String>,
    pub name: Option<String>,
    pub category: Option<ScriptCategory>,
    pub script: Option<String>,
    pub description: Option<String>,
}

impl PatchScript {
    pub fn apply(self, current: &Script) -> UpdateScript {
        UpdateScript {
            code: self.code.unwrap_or_else(|| current.code.clone()),
            name: self.name.unwrap_or_else(|| current.name.clone()),
            category: self.category.unwrap_or_else(|| current.category.clone()),
            script: self.script.unwrap_or_else(|| current.script.clone()),
            description: self.description.or_else(|| current.description.clone()),
        }
    }
}
