use daybook_shared::TagDto;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct TaskTagBadgeProps {
  pub tag: TagDto,
}

#[function_component(TaskTagBadge)]
pub fn task_tag_badge(props: &TaskTagBadgeProps) -> Html {
  html! {
      <span class="badge tag-badge" style={tag_badge_style(&props.tag)}>{ &props.tag.name }</span>
  }
}

fn tag_badge_style(tag: &TagDto) -> String {
  match &tag.color {
    Some(color) => format!("--tag-color:{color};"),
    None => String::new(),
  }
}
