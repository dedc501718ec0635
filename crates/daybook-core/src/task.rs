use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single loggable unit of work, scoped to one calendar date.
///
/// `completed_at` is non-null exactly when `completed` is true; the
/// logbook normalizes every mutation to keep that so.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,

    pub content: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub client_tag_id: Option<Uuid>,

    #[serde(default)]
    pub project_tag_id: Option<Uuid>,

    pub entry: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl Task {
    pub fn new(content: String, date: NaiveDate, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            date,
            time: None,
            completed: false,
            completed_at: None,
            client_tag_id: None,
            project_tag_id: None,
            entry: now,
            modified: now,
        }
    }

    pub fn completion_consistent(&self) -> bool {
        self.completed == self.completed_at.is_some()
    }
}
