use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskdeck_core::document::{now_millis, CompletedTask, TaskDocument};
use taskdeck_core::retention::MS_PER_DAY;
use taskdeck_core::settings::Settings;
use taskdeck_core::storage::{load_document, save_document, LoadOutcome};
use taskdeck_core::store::Scope;
use taskdeck_core::tracker::Tracker;

#[test]
fn add_complete_purge_scenario() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");

    let mut tracker = Tracker::open(&path, Settings::default()).expect("open");
    assert_eq!(tracker.progress().percent, 0);

    assert!(tracker.add("buy milk").expect("add"));
    assert_eq!(tracker.document().tasks[0].title, "buy milk");
    assert!(!tracker.document().tasks[0].done);
    assert!(tracker.document().checklist.is_empty());
    assert_eq!(tracker.progress().percent, 0);

    assert!(tracker.toggle(0).expect("complete"));
    assert!(tracker.document().tasks.is_empty());
    assert_eq!(tracker.document().checklist[0].title, "buy milk");
    assert_eq!(tracker.progress().percent, 100);

    // Age the completed entry past the 7-day retention window, then purge.
    let mut doc = tracker.document().clone();
    doc.checklist[0].completed_at = now_millis() - 8 * MS_PER_DAY;
    save_document(&path, &doc).expect("age entry");
    let mut tracker = Tracker::open(
        &path,
        Settings {
            auto_delete_completed: false,
            ..Settings::default()
        },
    )
    .expect("reopen");
    assert_eq!(tracker.purge().expect("purge"), 1);
    assert!(tracker.document().checklist.is_empty());
    assert_eq!(tracker.progress().percent, 0);
}

#[test]
fn toggle_then_restore_keeps_title_but_not_creation_time() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");

    let mut tracker = Tracker::open(&path, Settings::default()).expect("open");
    tracker.add("call the dentist").expect("add");
    let created = tracker.document().tasks[0].created_at;

    assert!(tracker.toggle(0).expect("complete"));
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(tracker.restore(0).expect("restore"));

    let restored = &tracker.document().tasks[0];
    assert_eq!(restored.title, "call the dentist");
    assert!(restored.created_at > created);
    assert!(tracker.document().checklist.is_empty());
}

#[test]
fn deleted_tasks_never_reappear() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");

    let mut tracker = Tracker::open(&path, Settings::default()).expect("open");
    tracker.add("keep").expect("add");
    tracker.add("drop active").expect("add");
    tracker.add("drop completed").expect("add");
    tracker.toggle(2).expect("complete");

    assert!(tracker.delete(1, Scope::Tasks).expect("delete active"));
    assert!(tracker.delete(0, Scope::Checklist).expect("delete completed"));

    let reopened = Tracker::open(&path, Settings::default()).expect("reopen");
    let titles: Vec<&str> = reopened
        .document()
        .tasks
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    assert_eq!(titles, vec!["keep"]);
    assert!(reopened.document().checklist.is_empty());
}

#[test]
fn legacy_store_survives_a_full_round_trip() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");
    fs::write(
        &path,
        r#"{"tasks":[{"title":"old habit","done":false},{"title":"finished","done":true}]}"#,
    )
    .expect("seed legacy");

    let mut tracker = Tracker::open(&path, Settings::default()).expect("open");
    assert_eq!(tracker.load_outcome(), LoadOutcome::Migrated);
    assert_eq!(tracker.document().tasks.len(), 2);

    // The done flag survives migration but completion now relocates.
    assert!(tracker.toggle(1).expect("complete"));
    assert_eq!(tracker.document().checklist[0].title, "finished");

    let (on_disk, outcome) = load_document(&path);
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(on_disk.tasks.len(), 1);
    assert_eq!(on_disk.checklist.len(), 1);
}

#[test]
fn corrupt_store_is_replaced_only_after_a_mutation() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");
    fs::write(&path, "][ definitely not json").expect("seed corrupt");

    let mut tracker = Tracker::open(&path, Settings::default()).expect("open");
    assert_eq!(tracker.load_outcome(), LoadOutcome::Recovered);
    // The corrupt file is left in place until something is written.
    assert_eq!(
        fs::read_to_string(&path).expect("read"),
        "][ definitely not json"
    );

    tracker.add("fresh start").expect("add");
    let (on_disk, outcome) = load_document(&path);
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(on_disk.tasks[0].title, "fresh start");
}

#[test]
fn external_timestamps_survive_reload_when_recent() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("tasks.json");
    let now = now_millis();
    let doc = TaskDocument {
        tasks: Vec::new(),
        checklist: vec![
            CompletedTask::new("yesterday", now - MS_PER_DAY),
            CompletedTask::new("last week", now - 6 * MS_PER_DAY),
        ],
    };
    save_document(&path, &doc).expect("seed");

    let tracker = Tracker::open(&path, Settings::default()).expect("open");
    assert_eq!(tracker.document().checklist.len(), 2);
    assert_eq!(tracker.progress().percent, 100);
}
