use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, bail};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::datastore::DataStore;
use crate::tags::{ClientTag, ProjectTag};
use crate::task::Task;

#[derive(Debug, Clone)]
pub struct NewTask {
    pub content: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub client_tag_id: Option<Uuid>,
    pub project_tag_id: Option<Uuid>,
}

impl NewTask {
    pub fn for_date(content: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            content: content.into(),
            date,
            time: None,
            client_tag_id: None,
            project_tag_id: None,
        }
    }
}

/// Partial update. Outer `None` leaves a field alone; for nullable
/// fields the inner `None` clears it.
#[derive(Debug, Clone, Default)]
pub struct TaskChange {
    pub content: Option<String>,
    pub time: Option<Option<String>>,
    pub client_tag_id: Option<Option<Uuid>>,
    pub project_tag_id: Option<Option<Uuid>>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Clone)]
pub struct DayTasks {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

/// The task store behind the daily log view. All mutations load the
/// full task file, rewrite it atomically, and hand back the resulting
/// record; callers re-fetch rather than patching local copies.
#[derive(Debug)]
pub struct Logbook {
    store: DataStore,
}

impl Logbook {
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            store: DataStore::open(data_dir)?,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn tasks_for_date(&self, date: NaiveDate) -> anyhow::Result<Vec<Task>> {
        let tasks = self.store.load_tasks()?;
        Ok(tasks.into_iter().filter(|task| task.date == date).collect())
    }

    #[tracing::instrument(skip(self, new), fields(date = %new.date))]
    pub fn add(&self, new: NewTask, now: DateTime<Utc>) -> anyhow::Result<Task> {
        if new.content.trim().is_empty() {
            bail!("task content is empty");
        }

        let mut task = Task::new(new.content, new.date, now);
        task.time = new.time;
        task.client_tag_id = new.client_tag_id;
        task.project_tag_id = new.project_tag_id;

        let mut tasks = self.store.load_tasks()?;
        tasks.push(task.clone());
        self.store.save_tasks(&tasks)?;

        debug!(id = %task.id, "added task");
        Ok(task)
    }

    #[tracing::instrument(skip(self, change), fields(id = %id))]
    pub fn change(&self, id: Uuid, change: TaskChange, now: DateTime<Utc>) -> anyhow::Result<Task> {
        let mut tasks = self.store.load_tasks()?;

        let updated = {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| anyhow!("task not found: {id}"))?;

            apply_change(task, change, now);
            task.modified = now;
            task.clone()
        };

        self.store.save_tasks(&tasks)?;
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        let mut tasks = self.store.load_tasks()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);

        if tasks.len() == before {
            bail!("task not found: {id}");
        }

        self.store.save_tasks(&tasks)?;
        Ok(())
    }

    /// Every logged day except `exclude`, most recent first.
    #[tracing::instrument(skip(self))]
    pub fn history(&self, exclude: NaiveDate) -> anyhow::Result<Vec<DayTasks>> {
        let tasks = self.store.load_tasks()?;

        let mut by_date: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
        for task in tasks {
            if task.date == exclude {
                continue;
            }
            by_date.entry(task.date).or_default().push(task);
        }

        Ok(by_date
            .into_iter()
            .rev()
            .map(|(date, tasks)| DayTasks { date, tasks })
            .collect())
    }

    #[tracing::instrument(skip(self))]
    pub fn clients(&self) -> anyhow::Result<Vec<ClientTag>> {
        self.store.load_clients()
    }

    #[tracing::instrument(skip(self))]
    pub fn projects(&self) -> anyhow::Result<Vec<ProjectTag>> {
        self.store.load_projects()
    }
}

/// The single place the completion invariant is normalized: after this
/// returns, `completed_at` is non-null exactly when `completed` is true,
/// no matter what combination the caller sent.
fn apply_change(task: &mut Task, change: TaskChange, now: DateTime<Utc>) {
    if let Some(content) = change.content {
        task.content = content;
    }
    if let Some(time) = change.time {
        task.time = time;
    }
    if let Some(client_tag_id) = change.client_tag_id {
        task.client_tag_id = client_tag_id;
    }
    if let Some(project_tag_id) = change.project_tag_id {
        task.project_tag_id = project_tag_id;
    }

    match (change.completed, change.completed_at) {
        (Some(true), at) => {
            task.completed = true;
            task.completed_at = at.flatten().or(task.completed_at).or(Some(now));
        }
        (Some(false), _) => {
            task.completed = false;
            task.completed_at = None;
        }
        (None, Some(at)) => {
            // a bare timestamp cannot flip the flag; it may only adjust
            // an already-completed task
            if task.completed && let Some(at) = at {
                task.completed_at = Some(at);
            }
        }
        (None, None) => {}
    }

    debug!(id = %task.id, completed = task.completed, "task change applied");
}

#[cfg(test)]
mod change_tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn sample_task() -> Task {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        Task::new("Write report".to_string(), date, now())
    }

    #[test]
    fn completing_stamps_now_when_no_timestamp_given() {
        let mut task = sample_task();
        apply_change(
            &mut task,
            TaskChange {
                completed: Some(true),
                ..TaskChange::default()
            },
            now(),
        );

        assert!(task.completed);
        assert_eq!(task.completed_at, Some(now()));
        assert!(task.completion_consistent());
    }

    #[test]
    fn completing_twice_matches_completing_once() {
        let mut task = sample_task();
        let change = TaskChange {
            completed: Some(true),
            completed_at: Some(Some(now())),
            ..TaskChange::default()
        };

        apply_change(&mut task, change.clone(), now());
        let after_first = task.clone();
        apply_change(&mut task, change, now());

        assert_eq!(task, after_first);
    }

    #[test]
    fn uncompleting_clears_timestamp_even_if_caller_sends_one() {
        let mut task = sample_task();
        apply_change(
            &mut task,
            TaskChange {
                completed: Some(true),
                ..TaskChange::default()
            },
            now(),
        );

        apply_change(
            &mut task,
            TaskChange {
                completed: Some(false),
                completed_at: Some(Some(now())),
                ..TaskChange::default()
            },
            now(),
        );

        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
        assert!(task.completion_consistent());
    }

    #[test]
    fn uncompleting_twice_matches_uncompleting_once() {
        let mut task = sample_task();
        let uncomplete = TaskChange {
            completed: Some(false),
            ..TaskChange::default()
        };

        apply_change(&mut task, uncomplete.clone(), now());
        let after_first = task.clone();
        apply_change(&mut task, uncomplete, now());

        assert_eq!(task, after_first);
    }

    #[test]
    fn bare_timestamp_cannot_complete_an_incomplete_task() {
        let mut task = sample_task();
        apply_change(
            &mut task,
            TaskChange {
                completed_at: Some(Some(now())),
                ..TaskChange::default()
            },
            now(),
        );

        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn inner_none_clears_nullable_fields() {
        let mut task = sample_task();
        task.time = Some("09:30".to_string());
        task.client_tag_id = Some(Uuid::new_v4());

        apply_change(
            &mut task,
            TaskChange {
                time: Some(None),
                client_tag_id: Some(None),
                ..TaskChange::default()
            },
            now(),
        );

        assert_eq!(task.time, None);
        assert_eq!(task.client_tag_id, None);
    }

    #[test]
    fn absent_fields_are_left_alone() {
        let mut task = sample_task();
        task.time = Some("09:30".to_string());
        let project = Uuid::new_v4();
        task.project_tag_id = Some(project);

        apply_change(
            &mut task,
            TaskChange {
                content: Some("Write the report".to_string()),
                ..TaskChange::default()
            },
            now(),
        );

        assert_eq!(task.content, "Write the report");
        assert_eq!(task.time.as_deref(), Some("09:30"));
        assert_eq!(task.project_tag_id, Some(project));
    }
}
