use chrono::{NaiveDate, Utc};
use daybook_core::logbook::{Logbook, NewTask, TaskChange};
use daybook_core::tags::ClientTag;
use tempfile::tempdir;
use uuid::Uuid;

fn date(raw: &str) -> NaiveDate {
    daybook_core::datetime::parse_iso_date(raw).expect("valid date")
}

#[test]
fn day_scoped_log_flow() {
    let temp = tempdir().expect("tempdir");
    let log = Logbook::open(temp.path()).expect("open logbook");
    let now = Utc::now();

    let saturday = date("2024-06-01");
    let friday = date("2024-05-31");

    let report = log
        .add(NewTask::for_date("Write report", saturday), now)
        .expect("add report");
    log.add(NewTask::for_date("Review invoices", saturday), now)
        .expect("add invoices");
    log.add(NewTask::for_date("Friday standup", friday), now)
        .expect("add standup");

    // fetch is scoped to the requested date
    let today = log.tasks_for_date(saturday).expect("fetch saturday");
    assert_eq!(today.len(), 2);
    assert!(today.iter().all(|task| task.date == saturday));
    assert!(today.iter().all(|task| !task.completed));

    // complete, then uncomplete, keeping the timestamp in step
    let completed = log
        .change(
            report.id,
            TaskChange {
                completed: Some(true),
                ..TaskChange::default()
            },
            now,
        )
        .expect("complete report");
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reopened = log
        .change(
            report.id,
            TaskChange {
                completed: Some(false),
                ..TaskChange::default()
            },
            now,
        )
        .expect("uncomplete report");
    assert!(!reopened.completed);
    assert_eq!(reopened.completed_at, None);

    // partial edit touches only the named fields
    let edited = log
        .change(
            report.id,
            TaskChange {
                content: Some("Write quarterly report".to_string()),
                time: Some(Some("14:00".to_string())),
                ..TaskChange::default()
            },
            now,
        )
        .expect("edit report");
    assert_eq!(edited.content, "Write quarterly report");
    assert_eq!(edited.time.as_deref(), Some("14:00"));
    assert!(!edited.completed);

    // history excludes the selected date and runs most recent first
    log.add(NewTask::for_date("Plan sprint", date("2024-05-29")), now)
        .expect("add older task");
    let history = log.history(saturday).expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, friday);
    assert_eq!(history[1].date, date("2024-05-29"));
    assert!(history.iter().all(|day| day.date != saturday));

    log.delete(report.id).expect("delete report");
    assert_eq!(log.tasks_for_date(saturday).expect("refetch").len(), 1);
}

#[test]
fn unknown_ids_are_reported_not_swallowed() {
    let temp = tempdir().expect("tempdir");
    let log = Logbook::open(temp.path()).expect("open logbook");

    let missing = Uuid::new_v4();
    let err = log.delete(missing).expect_err("delete should fail");
    assert!(err.to_string().contains("task not found"));

    let err = log
        .change(missing, TaskChange::default(), Utc::now())
        .expect_err("change should fail");
    assert!(err.to_string().contains("task not found"));
}

#[test]
fn blank_content_is_rejected_by_the_store() {
    let temp = tempdir().expect("tempdir");
    let log = Logbook::open(temp.path()).expect("open logbook");

    let err = log
        .add(NewTask::for_date("   ", date("2024-06-01")), Utc::now())
        .expect_err("blank add should fail");
    assert!(err.to_string().contains("content is empty"));
}

#[test]
fn tasks_survive_reopen_with_tags_intact() {
    let temp = tempdir().expect("tempdir");
    let now = Utc::now();
    let client = ClientTag {
        id: Uuid::new_v4(),
        name: "Acme".to_string(),
        color: Some("#d64545".to_string()),
    };

    let task_id = {
        let log = Logbook::open(temp.path()).expect("open logbook");
        let mut new = NewTask::for_date("Call Acme", date("2024-06-01"));
        new.client_tag_id = Some(client.id);

        let task = log.add(new, now).expect("add task");
        task.id
    };

    let log = Logbook::open(temp.path()).expect("reopen logbook");
    let tasks = log.tasks_for_date(date("2024-06-01")).expect("fetch");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task_id);
    assert_eq!(tasks[0].client_tag_id, Some(client.id));
    assert_eq!(tasks[0].project_tag_id, None);
}
