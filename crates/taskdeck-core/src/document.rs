use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A task in the pending/in-progress list.
///
/// `done` only carries meaning while the checklist feature is disabled;
/// with the checklist enabled, completion is represented by relocation
/// into [`TaskDocument::checklist`] instead of a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTask {
    pub title: String,
    #[serde(default)]
    pub done: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

impl ActiveTask {
    pub fn new(title: impl Into<String>, created_at: i64) -> Self {
        Self {
            title: title.into(),
            done: false,
            created_at,
        }
    }
}

/// A completed task. Its presence in the checklist *is* the completed
/// state; `completed_at` records the most recent transition into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub title: String,
    #[serde(rename = "completedAt", default)]
    pub completed_at: i64,
}

impl CompletedTask {
    pub fn new(title: impl Into<String>, completed_at: i64) -> Self {
        Self {
            title: title.into(),
            completed_at,
        }
    }
}

/// The entire persisted state: active tasks plus the completed checklist.
///
/// Every task lives in exactly one of the two lists until deleted. Field
/// order matters for the on-disk layout and must stay `tasks` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub tasks: Vec<ActiveTask>,
    pub checklist: Vec<CompletedTask>,
}

impl TaskDocument {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.checklist.is_empty()
    }

    pub fn total(&self) -> usize {
        self.tasks.len() + self.checklist.len()
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
