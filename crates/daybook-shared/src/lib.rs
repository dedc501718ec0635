use serde::{
  Deserialize,
  Deserializer,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TagDto {
  pub id:    Uuid,
  pub name:  String,
  #[serde(default)]
  pub color: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:             Uuid,
  #[serde(default)]
  pub content:        String,
  pub date:           String,
  pub time:           Option<String>,
  pub completed:      bool,
  pub completed_at:   Option<String>,
  pub client_tag_id:  Option<Uuid>,
  pub project_tag_id: Option<Uuid>,
  #[serde(default)]
  pub client_tag:     Option<TagDto>,
  #[serde(default)]
  pub project_tag:    Option<TagDto>,
  /// Render/reconciliation key only, never business data.
  #[serde(default)]
  pub client_key:     String,
  pub created:        Option<String>,
  pub modified:       Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TasksForDateArgs {
  pub date: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskCreate {
  pub content:        String,
  pub date:           String,
  pub time:           Option<String>,
  pub client_tag_id:  Option<Uuid>,
  pub project_tag_id: Option<Uuid>
}

// Tri-state fields: absent leaves the column alone, an explicit null
// clears it. Plain Option<Option<_>> folds null into absent during
// deserialization, so each field reinstates the outer layer by hand.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
)]
pub struct TaskPatch {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub content: Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub time: Option<Option<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub client_tag_id:
    Option<Option<Uuid>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub project_tag_id:
    Option<Option<Uuid>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub completed: Option<bool>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "double_option"
  )]
  pub completed_at:
    Option<Option<String>>
}

fn double_option<'de, T, D>(
  deserializer: D
) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>
{
  Deserialize::deserialize(deserializer)
    .map(Some)
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskUpdateArgs {
  pub id:    Uuid,
  pub patch: TaskPatch
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct TaskIdArg {
  pub id: Uuid
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct HistoryArgs {
  pub exclude_date: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct UiLogArgs {
  pub event:  String,
  pub detail: String
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct HistoryDayDto {
  pub date:  String,
  pub label: String,
  pub tasks: Vec<TaskDto>
}

#[cfg(test)]
mod patch_tests {
  use super::*;

  #[test]
  fn absent_and_null_are_distinct() {
    let patch: TaskPatch =
      serde_json::from_str(
        r#"{"time": null}"#
      )
      .expect("parse patch");

    assert_eq!(patch.time, Some(None));
    assert_eq!(patch.client_tag_id, None);
    assert_eq!(patch.completed, None);
  }

  #[test]
  fn values_arrive_doubly_wrapped() {
    let patch: TaskPatch =
      serde_json::from_str(
        r#"{"time": "09:30", "completed": true}"#
      )
      .expect("parse patch");

    assert_eq!(
      patch.time,
      Some(Some("09:30".to_string()))
    );
    assert_eq!(
      patch.completed,
      Some(true)
    );
  }

  #[test]
  fn untouched_fields_stay_off_the_wire()
  {
    let patch = TaskPatch {
      content: Some(
        "Write report".to_string()
      ),
      ..TaskPatch::default()
    };

    let raw = serde_json::to_string(
      &patch
    )
    .expect("serialize patch");
    assert_eq!(
      raw,
      r#"{"content":"Write report"}"#
    );
  }

  #[test]
  fn clears_serialize_as_null() {
    let patch = TaskPatch {
      completed: Some(false),
      completed_at: Some(None),
      ..TaskPatch::default()
    };

    let raw = serde_json::to_string(
      &patch
    )
    .expect("serialize patch");
    assert_eq!(
      raw,
      r#"{"completed":false,"completed_at":null}"#
    );
  }

  #[test]
  fn patch_round_trips_through_json() {
    let patch = TaskPatch {
      time: Some(None),
      completed: Some(true),
      completed_at: Some(Some(
        "2024-06-01T15:23:00Z"
          .to_string()
      )),
      ..TaskPatch::default()
    };

    let raw = serde_json::to_string(
      &patch
    )
    .expect("serialize patch");
    let parsed: TaskPatch =
      serde_json::from_str(&raw)
        .expect("parse patch");
    assert_eq!(parsed, patch);
  }

  #[test]
  fn task_dto_defaults_render_fields() {
    let dto: TaskDto =
      serde_json::from_str(
        r#"{
          "id": "6f8e2f54-5c9b-4f3e-9d2a-1c2b3a4d5e6f",
          "date": "2024-06-01",
          "time": null,
          "completed": false,
          "completed_at": null,
          "client_tag_id": null,
          "project_tag_id": null,
          "created": null,
          "modified": null
        }"#
      )
      .expect("parse dto");

    assert_eq!(dto.content, "");
    assert_eq!(dto.client_key, "");
    assert_eq!(dto.client_tag, None);
    assert_eq!(dto.project_tag, None);
  }
}
