use chrono::NaiveDate;
use daybook_shared::{HistoryArgs, HistoryDayDto};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, Properties, classes, function_component, html, use_effect_with, use_state};

use crate::api::invoke_tauri;

#[derive(Properties, PartialEq)]
pub struct HistoryTimelineProps {
  pub exclude_date: NaiveDate,
}

/// Read-only timeline of every other day with activity, most recent
/// first. Re-fetched whenever the excluded (selected) day changes.
#[function_component(HistoryTimeline)]
pub fn history_timeline(props: &HistoryTimelineProps) -> Html {
  let days = use_state(Vec::<HistoryDayDto>::new);

  {
    let days = days.clone();
    use_effect_with(props.exclude_date, move |date| {
      let args = HistoryArgs {
        exclude_date: date.format("%Y-%m-%d").to_string(),
      };

      spawn_local(async move {
        match invoke_tauri::<Vec<HistoryDayDto>, _>("history_days", &args).await {
          Ok(list) => days.set(list),
          Err(err) => tracing::error!(error = %err, "history_days failed"),
        }
      });

      || ()
    });
  }

  if days.is_empty() {
    return html! {
        <div class="history-empty muted">{ "No previous activity" }</div>
    };
  }

  html! {
      <div class="history-timeline">
          {
              for days.iter().map(|day| html! {
                  <div class="history-day" key={day.date.clone()}>
                      <div class="history-day-label">{ &day.label }</div>
                      {
                          for day.tasks.iter().map(|task| html! {
                              <div
                                  class={classes!("history-task", task.completed.then_some("completed"))}
                                  key={task.client_key.clone()}
                              >
                                  <span class="history-mark">{ if task.completed { "✓" } else { "○" } }</span>
                                  <span class="history-content">{ &task.content }</span>
                                  {
                                      match &task.time {
                                          Some(time) => html! { <span class="task-time">{ time }</span> },
                                          None => html! {},
                                      }
                                  }
                              </div>
                          })
                      }
                  </div>
              })
          }
      </div>
  }
}
