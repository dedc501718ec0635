use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use daybook_shared::{
  TagDto, TaskCreate, TaskDto, TaskIdArg, TaskPatch, TaskUpdateArgs, TasksForDateArgs, UiLogArgs,
};
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, function_component, html, use_effect_with, use_memo, use_state};

use crate::api::invoke_tauri;
use crate::app::toast::Notifier;
use crate::components::{CompletedTaskList, DatePicker, HistoryTimeline, TaskList};

const TOAST_TASK_ADDED: &str = "Task added successfully";
const TOAST_TASK_ADD_FAILED: &str = "Failed to add task";
const TOAST_TASK_COMPLETED: &str = "Task completed";
const TOAST_TASK_COMPLETE_FAILED: &str = "Failed to complete task";
const TOAST_TASK_REOPENED: &str = "Task moved back to todo";
const TOAST_TASK_REOPEN_FAILED: &str = "Failed to move task";
const TOAST_TASK_UPDATED: &str = "Task updated successfully";
const TOAST_TASK_UPDATE_FAILED: &str = "Failed to update task";
const TOAST_TASK_DELETED: &str = "Task deleted successfully";
const TOAST_TASK_DELETE_FAILED: &str = "Failed to delete task";

#[derive(yew::Properties, PartialEq)]
pub struct DailyLogViewProps {
  pub notifier: Notifier,
}

/// The day view: a date, its todo/completed partition, and the five
/// actions against the backend task store. The fetched collection is
/// the single source of truth; every mutation bumps `refresh_tick` on
/// success and lets the fetch effect re-read instead of patching local
/// state.
#[function_component(DailyLogView)]
pub fn daily_log_view(props: &DailyLogViewProps) -> Html {
  let selected_date = use_state(|| Local::now().date_naive());
  let tasks = use_state(Vec::<TaskDto>::new);
  let loading = use_state(|| true);
  let refresh_tick = use_state(|| 0_u64);
  let client_tags = use_state(Vec::<TagDto>::new);
  let project_tags = use_state(Vec::<TagDto>::new);

  {
    let tasks = tasks.clone();
    let loading = loading.clone();
    use_effect_with((*selected_date, *refresh_tick), move |(date, tick)| {
      let date = *date;
      let tick = *tick;
      loading.set(true);

      spawn_local(async move {
        tracing::info!(date = %date, tick, "refreshing daily log");
        let args = TasksForDateArgs {
          date: iso_date(date),
        };

        match invoke_tauri::<Vec<TaskDto>, _>("tasks_for_date", &args).await {
          Ok(list) => {
            tasks.set(list);
            loading.set(false);
          }
          Err(err) => {
            tracing::error!(error = %err, "tasks_for_date failed");
            loading.set(false);
          }
        }
      });

      || ()
    });
  }

  {
    let client_tags = client_tags.clone();
    let project_tags = project_tags.clone();
    use_effect_with((), move |_| {
      spawn_local(async move {
        match invoke_tauri::<Vec<TagDto>, _>("client_tags_list", &()).await {
          Ok(list) => client_tags.set(list),
          Err(err) => tracing::error!(error = %err, "client_tags_list failed"),
        }
        match invoke_tauri::<Vec<TagDto>, _>("project_tags_list", &()).await {
          Ok(list) => project_tags.set(list),
          Err(err) => tracing::error!(error = %err, "project_tags_list failed"),
        }
      });
      || ()
    });
  }

  // recomputed only when the fetched collection itself changes
  let partition = use_memo((*tasks).clone(), |tasks| partition_tasks(tasks));
  let (todo_tasks, completed_tasks) = (*partition).clone();

  let on_date_change = {
    let selected_date = selected_date.clone();
    Callback::from(move |date: NaiveDate| {
      selected_date.set(date);
      spawn_local(async move {
        let note = UiLogArgs {
          event: "date_selected".to_string(),
          detail: iso_date(date),
        };
        if let Err(err) = invoke_tauri::<(), _>("ui_log", &note).await {
          tracing::debug!(error = %err, "ui_log failed");
        }
      });
    })
  };

  let on_add = {
    let selected_date = selected_date.clone();
    let refresh_tick = refresh_tick.clone();
    let notifier = props.notifier.clone();
    Callback::from(move |(content, is_completed): (String, bool)| {
      let date = *selected_date;
      let refresh_tick = refresh_tick.clone();
      let notifier = notifier.clone();

      spawn_local(async move {
        let create = TaskCreate {
          content,
          date: iso_date(date),
          time: None,
          client_tag_id: None,
          project_tag_id: None,
        };

        let created = match invoke_tauri::<TaskDto, _>("task_add", &create).await {
          Ok(task) => task,
          Err(err) => {
            tracing::error!(error = %err, "task_add failed");
            notifier.failure(TOAST_TASK_ADD_FAILED);
            return;
          }
        };

        if is_completed {
          let update = TaskUpdateArgs {
            id: created.id,
            patch: completion_patch(Utc::now()),
          };
          if let Err(err) = invoke_tauri::<TaskDto, _>("task_update", &update).await {
            // the task exists but stayed incomplete; one failure toast,
            // no rollback
            tracing::error!(error = %err, id = %created.id, "completion follow-up failed");
            notifier.failure(TOAST_TASK_ADD_FAILED);
            refresh_tick.set((*refresh_tick).saturating_add(1));
            return;
          }
        }

        notifier.success(TOAST_TASK_ADDED);
        refresh_tick.set((*refresh_tick).saturating_add(1));
      });
    })
  };

  let on_complete = {
    let refresh_tick = refresh_tick.clone();
    let notifier = props.notifier.clone();
    Callback::from(move |id: Uuid| {
      let refresh_tick = refresh_tick.clone();
      let notifier = notifier.clone();

      spawn_local(async move {
        let update = TaskUpdateArgs {
          id,
          patch: completion_patch(Utc::now()),
        };

        match invoke_tauri::<TaskDto, _>("task_update", &update).await {
          Ok(_) => {
            notifier.success(TOAST_TASK_COMPLETED);
            refresh_tick.set((*refresh_tick).saturating_add(1));
          }
          Err(err) => {
            tracing::error!(error = %err, %id, "task_update (complete) failed");
            notifier.failure(TOAST_TASK_COMPLETE_FAILED);
          }
        }
      });
    })
  };

  let on_uncomplete = {
    let refresh_tick = refresh_tick.clone();
    let notifier = props.notifier.clone();
    Callback::from(move |id: Uuid| {
      let refresh_tick = refresh_tick.clone();
      let notifier = notifier.clone();

      spawn_local(async move {
        let update = TaskUpdateArgs {
          id,
          patch: uncompletion_patch(),
        };

        match invoke_tauri::<TaskDto, _>("task_update", &update).await {
          Ok(_) => {
            notifier.success(TOAST_TASK_REOPENED);
            refresh_tick.set((*refresh_tick).saturating_add(1));
          }
          Err(err) => {
            tracing::error!(error = %err, %id, "task_update (uncomplete) failed");
            notifier.failure(TOAST_TASK_REOPEN_FAILED);
          }
        }
      });
    })
  };

  let on_update = {
    let refresh_tick = refresh_tick.clone();
    let notifier = props.notifier.clone();
    Callback::from(move |(id, patch): (Uuid, TaskPatch)| {
      let refresh_tick = refresh_tick.clone();
      let notifier = notifier.clone();

      spawn_local(async move {
        let update = TaskUpdateArgs { id, patch };

        match invoke_tauri::<TaskDto, _>("task_update", &update).await {
          Ok(_) => {
            notifier.success(TOAST_TASK_UPDATED);
            refresh_tick.set((*refresh_tick).saturating_add(1));
          }
          Err(err) => {
            tracing::error!(error = %err, %id, "task_update failed");
            notifier.failure(TOAST_TASK_UPDATE_FAILED);
          }
        }
      });
    })
  };

  let on_delete = {
    let refresh_tick = refresh_tick.clone();
    let notifier = props.notifier.clone();
    Callback::from(move |id: Uuid| {
      let refresh_tick = refresh_tick.clone();
      let notifier = notifier.clone();

      spawn_local(async move {
        let args = TaskIdArg { id };

        match invoke_tauri::<(), _>("task_delete", &args).await {
          Ok(()) => {
            notifier.success(TOAST_TASK_DELETED);
            refresh_tick.set((*refresh_tick).saturating_add(1));
          }
          Err(err) => {
            tracing::error!(error = %err, %id, "task_delete failed");
            notifier.failure(TOAST_TASK_DELETE_FAILED);
          }
        }
      });
    })
  };

  let on_add_todo = {
    let on_add = on_add.clone();
    Callback::from(move |content: String| on_add.emit((content, false)))
  };
  let on_add_completed = {
    let on_add = on_add.clone();
    Callback::from(move |content: String| on_add.emit((content, true)))
  };

  if *loading {
    return html! {
      <div class="daily-log-loading">
        <div class="spinner"></div>
      </div>
    };
  }

  html! {
    <div class="daily-log">
      <div class="daily-log-toolbar">
        <DatePicker date={*selected_date} on_change={on_date_change} />
      </div>

      <div class="panel card">
        <h2 class="day-header">{ long_date_label(*selected_date) }</h2>
        <div class="separator"></div>

        <TaskList
          tasks={todo_tasks}
          client_tags={(*client_tags).clone()}
          project_tags={(*project_tags).clone()}
          on_add={on_add_todo}
          on_toggle={on_complete}
          on_update={on_update.clone()}
          on_delete={on_delete.clone()}
        />

        <CompletedTaskList
          tasks={completed_tasks}
          client_tags={(*client_tags).clone()}
          project_tags={(*project_tags).clone()}
          on_add={on_add_completed}
          on_toggle={on_uncomplete}
          on_update={on_update}
          on_delete={on_delete}
        />

        <div class="separator"></div>
        <h3 class="history-header">{ "Previous Activity" }</h3>
        <HistoryTimeline exclude_date={*selected_date} />
      </div>
    </div>
  }
}

/// Total, disjoint split of a day's tasks by the completed flag.
pub(crate) fn partition_tasks(tasks: &[TaskDto]) -> (Vec<TaskDto>, Vec<TaskDto>) {
  tasks.iter().cloned().partition(|task| !task.completed)
}

pub(crate) fn iso_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

pub(crate) fn long_date_label(date: NaiveDate) -> String {
  date.format("%A, %B %-d, %Y").to_string()
}

pub(crate) fn completion_patch(now: DateTime<Utc>) -> TaskPatch {
  TaskPatch {
    completed: Some(true),
    completed_at: Some(Some(now.to_rfc3339_opts(SecondsFormat::Secs, true))),
    ..TaskPatch::default()
  }
}

pub(crate) fn uncompletion_patch() -> TaskPatch {
  TaskPatch {
    completed: Some(false),
    completed_at: Some(None),
    ..TaskPatch::default()
  }
}

#[cfg(test)]
mod daily_log_tests {
  use super::*;

  fn sample_task(content: &str, completed: bool) -> TaskDto {
    let id = Uuid::new_v4();
    TaskDto {
      id,
      content: content.to_string(),
      date: "2024-06-01".to_string(),
      time: None,
      completed,
      completed_at: completed.then(|| "2024-06-01T15:23:00Z".to_string()),
      client_tag_id: None,
      project_tag_id: None,
      client_tag: None,
      project_tag: None,
      client_key: id.to_string(),
      created: None,
      modified: None,
    }
  }

  #[test]
  fn partition_is_total_and_disjoint() {
    let tasks = vec![
      sample_task("Write report", false),
      sample_task("Morning standup", true),
      sample_task("Review invoices", false),
    ];

    let (todo, done) = partition_tasks(&tasks);

    assert_eq!(todo.len() + done.len(), tasks.len());
    assert!(todo.iter().all(|task| !task.completed));
    assert!(done.iter().all(|task| task.completed));
    for task in &tasks {
      let in_todo = todo.iter().any(|t| t.id == task.id);
      let in_done = done.iter().any(|t| t.id == task.id);
      assert!(in_todo != in_done);
    }
  }

  #[test]
  fn partition_of_empty_collection_is_empty() {
    let (todo, done) = partition_tasks(&[]);
    assert!(todo.is_empty());
    assert!(done.is_empty());
  }

  #[test]
  fn completion_patch_sets_flag_and_timestamp() {
    use chrono::TimeZone;

    let now = Utc
      .with_ymd_and_hms(2024, 6, 1, 15, 23, 0)
      .single()
      .expect("valid instant");
    let patch = completion_patch(now);

    assert_eq!(patch.completed, Some(true));
    assert_eq!(
      patch.completed_at,
      Some(Some("2024-06-01T15:23:00Z".to_string()))
    );
    assert_eq!(patch.content, None);
  }

  #[test]
  fn uncompletion_patch_clears_the_timestamp() {
    let patch = uncompletion_patch();

    assert_eq!(patch.completed, Some(false));
    assert_eq!(patch.completed_at, Some(None));
    assert_eq!(patch.time, None);
  }

  #[test]
  fn header_label_is_long_form() {
    let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    assert_eq!(long_date_label(date), "Saturday, June 1, 2024");
    assert_eq!(iso_date(date), "2024-06-01");
  }
}
