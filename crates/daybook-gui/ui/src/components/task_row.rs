use daybook_shared::{TagDto, TaskDto, TaskPatch};
use uuid::Uuid;
use yew::{Callback, Html, Properties, TargetCast, classes, function_component, html, use_state};

use super::TaskTagBadge;

#[derive(Properties, PartialEq)]
pub struct TaskRowProps {
  pub task: TaskDto,
  pub client_tags: Vec<TagDto>,
  pub project_tags: Vec<TagDto>,
  pub on_toggle: Callback<Uuid>,
  pub on_update: Callback<(Uuid, TaskPatch)>,
  pub on_delete: Callback<Uuid>,
}

/// One task line: checkbox, content, optional time and tag badges,
/// plus an inline edit form. Saving submits the whole editable surface
/// as one patch so a cleared field becomes an explicit null rather
/// than an absent key.
#[function_component(TaskRow)]
pub fn task_row(props: &TaskRowProps) -> Html {
  let task_id = props.task.id;
  let editing = use_state(|| false);
  let draft_content = use_state(|| props.task.content.clone());
  let draft_time = use_state(|| props.task.time.clone().unwrap_or_default());
  let draft_client = use_state(|| props.task.client_tag_id);
  let draft_project = use_state(|| props.task.project_tag_id);

  let ontoggle = {
    let on_toggle = props.on_toggle.clone();
    Callback::from(move |_: web_sys::Event| {
      on_toggle.emit(task_id);
    })
  };

  let ondelete = {
    let on_delete = props.on_delete.clone();
    Callback::from(move |_: web_sys::MouseEvent| {
      on_delete.emit(task_id);
    })
  };

  let start_edit = {
    let editing = editing.clone();
    let draft_content = draft_content.clone();
    let draft_time = draft_time.clone();
    let draft_client = draft_client.clone();
    let draft_project = draft_project.clone();
    let task = props.task.clone();
    Callback::from(move |_: web_sys::MouseEvent| {
      draft_content.set(task.content.clone());
      draft_time.set(task.time.clone().unwrap_or_default());
      draft_client.set(task.client_tag_id);
      draft_project.set(task.project_tag_id);
      editing.set(true);
    })
  };

  let cancel_edit = {
    let editing = editing.clone();
    Callback::from(move |_: web_sys::MouseEvent| {
      editing.set(false);
    })
  };

  let on_content_input = {
    let draft_content = draft_content.clone();
    Callback::from(move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement = e.target_unchecked_into();
      draft_content.set(input.value());
    })
  };

  let on_time_input = {
    let draft_time = draft_time.clone();
    Callback::from(move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement = e.target_unchecked_into();
      draft_time.set(input.value());
    })
  };

  let on_client_change = {
    let draft_client = draft_client.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
      draft_client.set(Uuid::parse_str(&select.value()).ok());
    })
  };

  let on_project_change = {
    let draft_project = draft_project.clone();
    Callback::from(move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
      draft_project.set(Uuid::parse_str(&select.value()).ok());
    })
  };

  let save_edit = {
    let editing = editing.clone();
    let draft_content = draft_content.clone();
    let draft_time = draft_time.clone();
    let draft_client = draft_client.clone();
    let draft_project = draft_project.clone();
    let on_update = props.on_update.clone();
    Callback::from(move |_: web_sys::MouseEvent| {
      let content = draft_content.trim().to_string();
      if content.is_empty() {
        return;
      }

      let patch = TaskPatch {
        content: Some(content),
        time: Some(optional_text(&draft_time)),
        client_tag_id: Some(*draft_client),
        project_tag_id: Some(*draft_project),
        ..TaskPatch::default()
      };

      on_update.emit((task_id, patch));
      editing.set(false);
    })
  };

  if *editing {
    return html! {
        <div class="task-row editing">
            <input
                class="task-edit-content"
                value={(*draft_content).clone()}
                oninput={on_content_input}
            />
            <input
                class="task-edit-time"
                type="time"
                value={(*draft_time).clone()}
                oninput={on_time_input}
            />
            <select class="task-edit-client" onchange={on_client_change}>
                <option value="" selected={draft_client.is_none()}>{ "No client" }</option>
                {
                    for props.client_tags.iter().map(|tag| html! {
                        <option
                            value={tag.id.to_string()}
                            selected={*draft_client == Some(tag.id)}
                        >{ &tag.name }</option>
                    })
                }
            </select>
            <select class="task-edit-project" onchange={on_project_change}>
                <option value="" selected={draft_project.is_none()}>{ "No project" }</option>
                {
                    for props.project_tags.iter().map(|tag| html! {
                        <option
                            value={tag.id.to_string()}
                            selected={*draft_project == Some(tag.id)}
                        >{ &tag.name }</option>
                    })
                }
            </select>
            <button class="primary" onclick={save_edit}>{ "Save" }</button>
            <button onclick={cancel_edit}>{ "Cancel" }</button>
        </div>
    };
  }

  html! {
      <div class={classes!("task-row", props.task.completed.then_some("completed"))}>
          <input
              type="checkbox"
              checked={props.task.completed}
              onchange={ontoggle}
          />
          <span class="task-content">{ &props.task.content }</span>
          {
              match &props.task.time {
                  Some(time) => html! { <span class="task-time">{ time }</span> },
                  None => html! {},
              }
          }
          {
              match &props.task.client_tag {
                  Some(tag) => html! { <TaskTagBadge tag={tag.clone()} /> },
                  None => html! {},
              }
          }
          {
              match &props.task.project_tag {
                  Some(tag) => html! { <TaskTagBadge tag={tag.clone()} /> },
                  None => html! {},
              }
          }
          <span class="task-row-actions">
              <button class="ghost" onclick={start_edit}>{ "Edit" }</button>
              <button class="ghost danger" onclick={ondelete}>{ "Delete" }</button>
          </span>
      </div>
  }
}

fn optional_text(value: &str) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}

#[cfg(test)]
mod row_tests {
  use super::*;

  #[test]
  fn blank_time_becomes_an_explicit_clear() {
    assert_eq!(optional_text("   "), None);
    assert_eq!(optional_text(""), None);
    assert_eq!(optional_text(" 09:30 "), Some("09:30".to_string()));
  }
}
