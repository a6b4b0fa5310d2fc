use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::document::{now_millis, ActiveTask, TaskDocument};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write task store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize task store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// How [`load_document`] arrived at the document it returned.
///
/// Loading never fails; this signal lets callers observe silent
/// recoveries and legacy upgrades without changing the default behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Current two-list shape, passed through unchanged.
    Loaded,
    /// No file at the given path; started empty.
    Missing,
    /// Legacy single-list shape upgraded; creation times reset to now.
    Migrated,
    /// Unreadable or unrecognized content discarded in favor of an
    /// empty document.
    Recovered,
}

/// Reads the persisted document, migrating the legacy shape on the fly.
///
/// Any parse or schema failure yields an empty document rather than an
/// error. The legacy shape is a `tasks` array without a `checklist`
/// array; its items keep title and done flag but lose their original
/// creation time (the upgrade is one-way and lossy).
pub fn load_document(path: &Path) -> (TaskDocument, LoadOutcome) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (TaskDocument::default(), LoadOutcome::Missing);
        }
        Err(_) => return (TaskDocument::default(), LoadOutcome::Recovered),
    };
    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => return (TaskDocument::default(), LoadOutcome::Recovered),
    };
    decode(value)
}

fn decode(value: Value) -> (TaskDocument, LoadOutcome) {
    let Value::Object(mut map) = value else {
        return (TaskDocument::default(), LoadOutcome::Recovered);
    };
    let tasks_is_array = map.get("tasks").map(Value::is_array).unwrap_or(false);
    let checklist_is_array = map.get("checklist").map(Value::is_array).unwrap_or(false);
    if !tasks_is_array {
        return (TaskDocument::default(), LoadOutcome::Recovered);
    }
    if checklist_is_array {
        return match serde_json::from_value::<TaskDocument>(Value::Object(map)) {
            Ok(doc) => (doc, LoadOutcome::Loaded),
            Err(_) => (TaskDocument::default(), LoadOutcome::Recovered),
        };
    }
    let Some(Value::Array(items)) = map.remove("tasks") else {
        return (TaskDocument::default(), LoadOutcome::Recovered);
    };
    (migrate_legacy(items, now_millis()), LoadOutcome::Migrated)
}

fn migrate_legacy(items: Vec<Value>, now: i64) -> TaskDocument {
    let tasks = items
        .into_iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let title = map.get("title")?.as_str()?.to_string();
            let done = map.get("done").and_then(Value::as_bool).unwrap_or(false);
            Some(ActiveTask {
                title,
                done,
                created_at: now,
            })
        })
        .collect();
    TaskDocument {
        tasks,
        checklist: Vec::new(),
    }
}

/// Writes the document as indented JSON, atomically (temp file plus
/// rename in the same directory). Write failures propagate to the
/// caller; the in-memory state is not rolled back on their behalf.
pub fn save_document(path: &Path, doc: &TaskDocument) -> Result<(), StorageError> {
    let body = serde_json::to_string_pretty(doc)?;
    let mut tmp_name: OsString = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from("tasks.json"));
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    fs::write(&tmp, body)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
