use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::tags::{ClientTag, ProjectTag};
use crate::task::Task;

#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub tasks_path: PathBuf,
    pub clients_path: PathBuf,
    pub projects_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join("tasks.data");
        let clients_path = data_dir.join("clients.data");
        let projects_path = data_dir.join("projects.data");

        if !tasks_path.exists() {
            fs::write(&tasks_path, "")?;
        }
        if !clients_path.exists() {
            fs::write(&clients_path, "")?;
        }
        if !projects_path.exists() {
            fs::write(&projects_path, "")?;
        }

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            clients = %clients_path.display(),
            projects = %projects_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            tasks_path,
            clients_path,
            projects_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Vec<Task>> {
        load_jsonl(&self.tasks_path).context("failed to load tasks.data")
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.tasks_path, tasks).context("failed to save tasks.data")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_clients(&self) -> anyhow::Result<Vec<ClientTag>> {
        load_jsonl(&self.clients_path).context("failed to load clients.data")
    }

    #[tracing::instrument(skip(self, clients))]
    pub fn save_clients(&self, clients: &[ClientTag]) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.clients_path, clients).context("failed to save clients.data")
    }

    #[tracing::instrument(skip(self))]
    pub fn load_projects(&self) -> anyhow::Result<Vec<ProjectTag>> {
        load_jsonl(&self.projects_path).context("failed to load projects.data")
    }

    #[tracing::instrument(skip(self, projects))]
    pub fn save_projects(&self, projects: &[ProjectTag]) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.projects_path, projects).context("failed to save projects.data")
    }
}

#[tracing::instrument(skip(path))]
fn load_jsonl<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    debug!(file = %path.display(), "loading jsonl");
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: T = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(record);
    }

    debug!(count = out.len(), "loaded records from jsonl");
    Ok(out)
}

#[tracing::instrument(skip(path, records))]
fn save_jsonl_atomic<T: Serialize>(path: &Path, records: &[T]) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = records.len(), "saving jsonl atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    for record in records {
        let serialized = serde_json::to_string(record)?;
        writeln!(temp, "{serialized}")?;
    }
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
