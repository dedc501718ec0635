use std::collections::BTreeMap;

use anyhow::Context;
use chrono::Utc;
use daybook_core::config::resolve_data_dir;
use daybook_core::datetime::{format_instant, format_iso_date, long_date_label, parse_instant,
    parse_iso_date};
use daybook_core::logbook::{Logbook, NewTask, TaskChange};
use daybook_core::task::Task;
use daybook_shared::{HistoryArgs, HistoryDayDto, TagDto, TaskCreate, TaskDto, TaskPatch,
    TaskUpdateArgs, TasksForDateArgs};
use parking_lot::Mutex;
use tracing::instrument;
use uuid::Uuid;

pub struct AppState {
    log: Mutex<Logbook>,
}

impl AppState {
    pub fn new() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir()?;
        let log = Logbook::open(&data_dir)
            .with_context(|| format!("failed to open logbook at {}", data_dir.display()))?;
        Ok(Self { log: Mutex::new(log) })
    }

    #[instrument(skip(self))]
    pub fn tasks_for_date(&self, args: TasksForDateArgs) -> anyhow::Result<Vec<TaskDto>> {
        let date = parse_iso_date(&args.date)?;
        let log = self.log.lock();
        let tasks = log.tasks_for_date(date)?;
        let (clients, projects) = tag_maps(&log)?;

        Ok(tasks
            .into_iter()
            .map(|task| task_to_dto(task, &clients, &projects))
            .collect())
    }

    #[instrument(skip(self), fields(date = %create.date, content_len = create.content.len()))]
    pub fn add(&self, create: TaskCreate) -> anyhow::Result<TaskDto> {
        let now = Utc::now();
        let new = NewTask {
            content: create.content,
            date: parse_iso_date(&create.date)?,
            time: create.time,
            client_tag_id: create.client_tag_id,
            project_tag_id: create.project_tag_id,
        };

        let log = self.log.lock();
        let task = log.add(new, now)?;
        let (clients, projects) = tag_maps(&log)?;
        Ok(task_to_dto(task, &clients, &projects))
    }

    #[instrument(skip(self), fields(id = %args.id))]
    pub fn update(&self, args: TaskUpdateArgs) -> anyhow::Result<TaskDto> {
        let now = Utc::now();
        let change = patch_to_change(args.patch)?;

        let log = self.log.lock();
        let task = log.change(args.id, change, now)?;
        let (clients, projects) = tag_maps(&log)?;
        Ok(task_to_dto(task, &clients, &projects))
    }

    #[instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.log.lock().delete(id)
    }

    #[instrument(skip(self))]
    pub fn history(&self, args: HistoryArgs) -> anyhow::Result<Vec<HistoryDayDto>> {
        let exclude = parse_iso_date(&args.exclude_date)?;
        let log = self.log.lock();
        let days = log.history(exclude)?;
        let (clients, projects) = tag_maps(&log)?;

        Ok(days
            .into_iter()
            .map(|day| HistoryDayDto {
                date: format_iso_date(day.date),
                label: long_date_label(day.date),
                tasks: day
                    .tasks
                    .into_iter()
                    .map(|task| task_to_dto(task, &clients, &projects))
                    .collect(),
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub fn client_tags(&self) -> anyhow::Result<Vec<TagDto>> {
        Ok(self
            .log
            .lock()
            .clients()?
            .into_iter()
            .map(|tag| TagDto {
                id: tag.id,
                name: tag.name,
                color: tag.color,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub fn project_tags(&self) -> anyhow::Result<Vec<TagDto>> {
        Ok(self
            .log
            .lock()
            .projects()?
            .into_iter()
            .map(|tag| TagDto {
                id: tag.id,
                name: tag.name,
                color: tag.color,
            })
            .collect())
    }
}

type TagMap = BTreeMap<Uuid, TagDto>;

fn tag_maps(log: &Logbook) -> anyhow::Result<(TagMap, TagMap)> {
    let clients = log
        .clients()?
        .into_iter()
        .map(|tag| {
            (
                tag.id,
                TagDto {
                    id: tag.id,
                    name: tag.name,
                    color: tag.color,
                },
            )
        })
        .collect();
    let projects = log
        .projects()?
        .into_iter()
        .map(|tag| {
            (
                tag.id,
                TagDto {
                    id: tag.id,
                    name: tag.name,
                    color: tag.color,
                },
            )
        })
        .collect();
    Ok((clients, projects))
}

fn task_to_dto(task: Task, clients: &TagMap, projects: &TagMap) -> TaskDto {
    let client_tag = task
        .client_tag_id
        .and_then(|id| clients.get(&id).cloned());
    let project_tag = task
        .project_tag_id
        .and_then(|id| projects.get(&id).cloned());

    TaskDto {
        id: task.id,
        content: task.content,
        date: format_iso_date(task.date),
        time: task.time,
        completed: task.completed,
        completed_at: task.completed_at.map(format_instant),
        client_tag_id: task.client_tag_id,
        project_tag_id: task.project_tag_id,
        client_tag,
        project_tag,
        client_key: task.id.to_string(),
        created: Some(format_instant(task.entry)),
        modified: Some(format_instant(task.modified)),
    }
}

fn patch_to_change(patch: TaskPatch) -> anyhow::Result<TaskChange> {
    let completed_at = match patch.completed_at {
        Some(Some(raw)) => Some(Some(parse_instant(&raw)?)),
        Some(None) => Some(None),
        None => None,
    };

    Ok(TaskChange {
        content: patch.content,
        time: patch.time,
        client_tag_id: patch.client_tag_id,
        project_tag_id: patch.project_tag_id,
        completed: patch.completed,
        completed_at,
    })
}
