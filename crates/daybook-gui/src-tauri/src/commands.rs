use daybook_shared::{
    HistoryArgs, HistoryDayDto, TagDto, TaskCreate, TaskDto, TaskIdArg, TaskUpdateArgs,
    TasksForDateArgs, UiLogArgs,
};
use tauri::State;
use tracing::{error, info, instrument};

use crate::state::AppState;

fn err_to_string(err: anyhow::Error) -> String {
    err.to_string()
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, date = %args.date))]
pub async fn tasks_for_date(
    state: State<'_, AppState>,
    args: TasksForDateArgs,
    request_id: Option<String>,
) -> Result<Vec<TaskDto>, String> {
    let result = state.tasks_for_date(args);
    if let Err(err) = result.as_ref() {
        error!(request_id = ?request_id, error = %err, "tasks_for_date command failed");
    }
    result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, date = %args.date, content_len = args.content.len()))]
pub async fn task_add(
    state: State<'_, AppState>,
    args: TaskCreate,
    request_id: Option<String>,
) -> Result<TaskDto, String> {
    let result = state.add(args);
    if let Err(err) = result.as_ref() {
        error!(request_id = ?request_id, error = %err, "task_add command failed");
    }
    result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_update(
    state: State<'_, AppState>,
    args: TaskUpdateArgs,
    request_id: Option<String>,
) -> Result<TaskDto, String> {
    let result = state.update(args);
    if let Err(err) = result.as_ref() {
        error!(request_id = ?request_id, error = %err, "task_update command failed");
    }
    result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, id = %args.id))]
pub async fn task_delete(
    state: State<'_, AppState>,
    args: TaskIdArg,
    request_id: Option<String>,
) -> Result<(), String> {
    let result = state.delete(args.id);
    if let Err(err) = result.as_ref() {
        error!(request_id = ?request_id, error = %err, "task_delete command failed");
    }
    result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id, exclude = %args.exclude_date))]
pub async fn history_days(
    state: State<'_, AppState>,
    args: HistoryArgs,
    request_id: Option<String>,
) -> Result<Vec<HistoryDayDto>, String> {
    let result = state.history(args);
    if let Err(err) = result.as_ref() {
        error!(request_id = ?request_id, error = %err, "history_days command failed");
    }
    result.map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn client_tags_list(
    state: State<'_, AppState>,
    request_id: Option<String>,
) -> Result<Vec<TagDto>, String> {
    state.client_tags().map_err(err_to_string)
}

#[tauri::command]
#[instrument(skip(state), fields(request_id = ?request_id))]
pub async fn project_tags_list(
    state: State<'_, AppState>,
    request_id: Option<String>,
) -> Result<Vec<TagDto>, String> {
    state.project_tags().map_err(err_to_string)
}

#[tauri::command]
#[instrument(fields(request_id = ?request_id, event = %args.event))]
pub async fn ui_log(args: UiLogArgs, request_id: Option<String>) -> Result<(), String> {
    info!(request_id = ?request_id, event = %args.event, detail = %args.detail, "ui interaction");
    Ok(())
}
