use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::{
  Callback, Html, Properties, Reducible, classes, function_component, html, use_effect_with,
};

const TOAST_DISMISS_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Failure,
}

impl ToastKind {
  fn css_class(self) -> &'static str {
    match self {
      ToastKind::Success => "toast-success",
      ToastKind::Failure => "toast-failure",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub id: u64,
  pub kind: ToastKind,
  pub message: String,
}

#[derive(Clone, PartialEq, Default)]
pub struct ToastStack {
  pub toasts: Vec<Toast>,
  next_id: u64,
}

pub enum ToastAction {
  Push(ToastKind, String),
  Dismiss(u64),
}

impl Reducible for ToastStack {
  type Action = ToastAction;

  fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
    let mut next = (*self).clone();
    match action {
      ToastAction::Push(kind, message) => {
        let id = next.next_id;
        next.next_id += 1;
        next.toasts.push(Toast { id, kind, message });
      }
      ToastAction::Dismiss(id) => {
        next.toasts.retain(|toast| toast.id != id);
      }
    }
    Rc::new(next)
  }
}

/// The notification capability handed into the daily log view. Purely
/// user-facing text; nothing machine-readable rides along.
#[derive(Clone, PartialEq)]
pub struct Notifier {
  sink: Callback<(ToastKind, String)>,
}

impl Notifier {
  pub fn new(sink: Callback<(ToastKind, String)>) -> Self {
    Self { sink }
  }

  pub fn success(&self, message: impl Into<String>) {
    self.sink.emit((ToastKind::Success, message.into()));
  }

  pub fn failure(&self, message: impl Into<String>) {
    self.sink.emit((ToastKind::Failure, message.into()));
  }
}

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
  pub toasts: Vec<Toast>,
  pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
  html! {
    <div class="toast-host">
      {
        for props.toasts.iter().cloned().map(|toast| html! {
          <ToastCard key={toast.id} toast={toast} on_dismiss={props.on_dismiss.clone()} />
        })
      }
    </div>
  }
}

#[derive(Properties, PartialEq)]
struct ToastCardProps {
  toast: Toast,
  on_dismiss: Callback<u64>,
}

#[function_component(ToastCard)]
fn toast_card(props: &ToastCardProps) -> Html {
  {
    let on_dismiss = props.on_dismiss.clone();
    use_effect_with(props.toast.id, move |id| {
      let id = *id;
      spawn_local(async move {
        TimeoutFuture::new(TOAST_DISMISS_MS).await;
        on_dismiss.emit(id);
      });
      || ()
    });
  }

  let onclick = {
    let on_dismiss = props.on_dismiss.clone();
    let id = props.toast.id;
    Callback::from(move |_| on_dismiss.emit(id))
  };

  html! {
    <div class={classes!("toast", props.toast.kind.css_class())} {onclick}>
      { &props.toast.message }
    </div>
  }
}

#[cfg(test)]
mod stack_tests {
  use super::*;

  #[test]
  fn pushes_assign_distinct_ids() {
    let stack = Rc::new(ToastStack::default());
    let stack = stack.reduce(ToastAction::Push(ToastKind::Success, "Task added successfully".into()));
    let stack = stack.reduce(ToastAction::Push(ToastKind::Failure, "Failed to add task".into()));

    assert_eq!(stack.toasts.len(), 2);
    assert_ne!(stack.toasts[0].id, stack.toasts[1].id);
    assert_eq!(stack.toasts[0].message, "Task added successfully");
    assert_eq!(stack.toasts[1].kind, ToastKind::Failure);
  }

  #[test]
  fn dismiss_removes_only_the_target() {
    let stack = Rc::new(ToastStack::default());
    let stack = stack.reduce(ToastAction::Push(ToastKind::Success, "Task completed".into()));
    let stack = stack.reduce(ToastAction::Push(ToastKind::Success, "Task deleted successfully".into()));
    let first_id = stack.toasts[0].id;

    let stack = stack.reduce(ToastAction::Dismiss(first_id));

    assert_eq!(stack.toasts.len(), 1);
    assert_eq!(stack.toasts[0].message, "Task deleted successfully");
  }

  #[test]
  fn dismissing_an_unknown_id_is_a_no_op() {
    let stack = Rc::new(ToastStack::default());
    let stack = stack.reduce(ToastAction::Push(ToastKind::Failure, "Failed to delete task".into()));

    let unchanged = stack.clone().reduce(ToastAction::Dismiss(999));

    assert_eq!(unchanged.toasts, stack.toasts);
  }
}
