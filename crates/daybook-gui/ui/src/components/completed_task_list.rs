use daybook_shared::{TagDto, TaskDto, TaskPatch};
use uuid::Uuid;
use yew::{Callback, Html, Properties, TargetCast, function_component, html, use_state};

use super::TaskRow;

#[derive(Properties, PartialEq)]
pub struct CompletedTaskListProps {
  pub tasks: Vec<TaskDto>,
  pub client_tags: Vec<TagDto>,
  pub project_tags: Vec<TagDto>,
  pub on_add: Callback<String>,
  pub on_toggle: Callback<Uuid>,
  pub on_update: Callback<(Uuid, TaskPatch)>,
  pub on_delete: Callback<Uuid>,
}

/// Completed tasks for the day. Hidden entirely when the day has none,
/// except the add row which records work that was already done.
#[function_component(CompletedTaskList)]
pub fn completed_task_list(props: &CompletedTaskListProps) -> Html {
  let draft = use_state(String::new);

  let on_draft_input = {
    let draft = draft.clone();
    Callback::from(move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement = e.target_unchecked_into();
      draft.set(input.value());
    })
  };

  let submit_draft = {
    let draft = draft.clone();
    let on_add = props.on_add.clone();
    move || {
      let content = draft.trim().to_string();
      if content.is_empty() {
        return;
      }
      on_add.emit(content);
      draft.set(String::new());
    }
  };

  let on_draft_keydown = {
    let submit_draft = submit_draft.clone();
    Callback::from(move |e: web_sys::KeyboardEvent| {
      if e.key() == "Enter" {
        submit_draft();
      }
    })
  };

  let on_add_click = Callback::from(move |_: web_sys::MouseEvent| submit_draft());

  html! {
      <div class="completed-task-list">
          {
              if props.tasks.is_empty() {
                  html! {}
              } else {
                  html! {
                      <>
                          <div class="header muted">{ "Completed" }</div>
                          {
                              for props.tasks.iter().cloned().map(|task| {
                                  let key = task.client_key.clone();
                                  html! {
                                      <TaskRow
                                          {key}
                                          task={task}
                                          client_tags={props.client_tags.clone()}
                                          project_tags={props.project_tags.clone()}
                                          on_toggle={props.on_toggle.clone()}
                                          on_update={props.on_update.clone()}
                                          on_delete={props.on_delete.clone()}
                                      />
                                  }
                              })
                          }
                      </>
                  }
              }
          }
          <div class="task-add-row">
              <input
                  class="task-add-input"
                  placeholder="Log something already done"
                  value={(*draft).clone()}
                  oninput={on_draft_input}
                  onkeydown={on_draft_keydown}
              />
              <button onclick={on_add_click}>{ "Add as done" }</button>
          </div>
      </div>
  }
}
