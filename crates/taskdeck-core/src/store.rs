use crate::document::{ActiveTask, CompletedTask, TaskDocument};

/// Which list a positional operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Tasks,
    Checklist,
}

/// In-memory state machine over a [`TaskDocument`].
///
/// All addressing is positional into the current list at call time;
/// operations on a missing index degrade to no-ops and report `false`
/// instead of failing, so stale indices from a shrunken list are
/// harmless. Completion has two named transitions: [`complete`]
/// relocates into the checklist (checklist feature enabled), while
/// [`toggle_done`] flips the in-place flag (feature disabled). The
/// caller selects one per its configuration.
///
/// [`complete`]: TaskStore::complete
/// [`toggle_done`]: TaskStore::toggle_done
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    doc: TaskDocument,
}

impl TaskStore {
    pub fn new(doc: TaskDocument) -> Self {
        Self { doc }
    }

    pub fn document(&self) -> &TaskDocument {
        &self.doc
    }

    pub fn into_document(self) -> TaskDocument {
        self.doc
    }

    /// Appends a new pending task. Title validation (empty after trim)
    /// is the caller's responsibility; the store accepts any string.
    pub fn add(&mut self, title: impl Into<String>, now_ms: i64) {
        self.doc.tasks.push(ActiveTask::new(title, now_ms));
    }

    /// Moves `tasks[index]` to the front of the checklist, stamped with
    /// `now_ms`. The transition for the checklist-enabled mode.
    pub fn complete(&mut self, index: usize, now_ms: i64) -> bool {
        if index >= self.doc.tasks.len() {
            return false;
        }
        let task = self.doc.tasks.remove(index);
        self.doc
            .checklist
            .insert(0, CompletedTask::new(task.title, now_ms));
        true
    }

    /// Flips the `done` flag of `tasks[index]` in place. The transition
    /// for the checklist-disabled mode: no relocation, no timestamp.
    pub fn toggle_done(&mut self, index: usize) -> bool {
        match self.doc.tasks.get_mut(index) {
            Some(task) => {
                task.done = !task.done;
                true
            }
            None => false,
        }
    }

    /// Replaces the title of `tasks[index]` in place, preserving its
    /// position, done flag and creation time. Active tasks only.
    pub fn edit(&mut self, index: usize, new_title: impl Into<String>) -> bool {
        match self.doc.tasks.get_mut(index) {
            Some(task) => {
                task.title = new_title.into();
                true
            }
            None => false,
        }
    }

    /// Removes the item at `index` from the selected list. Terminal:
    /// the item is destroyed, not recoverable.
    pub fn delete(&mut self, index: usize, scope: Scope) -> bool {
        match scope {
            Scope::Tasks => {
                if index >= self.doc.tasks.len() {
                    return false;
                }
                self.doc.tasks.remove(index);
                true
            }
            Scope::Checklist => {
                if index >= self.doc.checklist.len() {
                    return false;
                }
                self.doc.checklist.remove(index);
                true
            }
        }
    }

    /// Moves `checklist[index]` back to the front of the active list as
    /// a pending task created at `now_ms`. The original creation time
    /// is not round-tripped.
    pub fn restore(&mut self, index: usize, now_ms: i64) -> bool {
        if index >= self.doc.checklist.len() {
            return false;
        }
        let entry = self.doc.checklist.remove(index);
        self.doc.tasks.insert(0, ActiveTask::new(entry.title, now_ms));
        true
    }
}
