pub mod daily_log;
pub mod toast;

use yew::{Callback, Html, function_component, html, use_reducer};

use crate::app::daily_log::DailyLogView;
use crate::app::toast::{Notifier, ToastAction, ToastHost, ToastKind, ToastStack};

#[function_component(App)]
pub fn app() -> Html {
  let toasts = use_reducer(ToastStack::default);

  let notifier = Notifier::new({
    let toasts = toasts.clone();
    Callback::from(move |(kind, message): (ToastKind, String)| {
      toasts.dispatch(ToastAction::Push(kind, message));
    })
  });

  let on_dismiss = {
    let toasts = toasts.clone();
    Callback::from(move |id: u64| {
      toasts.dispatch(ToastAction::Dismiss(id));
    })
  };

  html! {
    <div class="shell">
      <DailyLogView notifier={notifier} />
      <ToastHost toasts={toasts.toasts.clone()} on_dismiss={on_dismiss} />
    </div>
  }
}
