use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Client and project tags are two independent relations rather than one
// tagged union: a task may carry zero, one, or both at the same time.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientTag {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectTag {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}
