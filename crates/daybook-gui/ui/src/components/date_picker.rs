use chrono::NaiveDate;
use yew::{Callback, Html, Properties, TargetCast, function_component, html};

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
  pub date: NaiveDate,
  pub on_change: Callback<NaiveDate>,
}

/// Native date input. Emits only on values that parse as a calendar
/// date; a cleared or malformed value leaves the selection alone.
#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
  let onchange = {
    let on_change = props.on_change.clone();
    Callback::from(move |e: web_sys::Event| {
      let input: web_sys::HtmlInputElement = e.target_unchecked_into();
      let value = input.value();
      match NaiveDate::parse_from_str(&value, "%Y-%m-%d") {
        Ok(date) => on_change.emit(date),
        Err(err) => {
          tracing::warn!(%value, error = %err, "ignoring unparseable date input");
        }
      }
    })
  };

  html! {
      <input
          class="date-picker"
          type="date"
          value={props.date.format("%Y-%m-%d").to_string()}
          {onchange}
      />
  }
}
