use std::path::{Path, PathBuf};

use crate::document::{now_millis, TaskDocument};
use crate::progress::{compute_progress, Progress};
use crate::retention;
use crate::settings::Settings;
use crate::storage::{load_document, save_document, LoadOutcome, StorageError};
use crate::store::{Scope, TaskStore};

/// Owner of the persistence lifecycle: the one mutable cell holding the
/// task store, its backing path and the settings in effect.
///
/// Each mutation runs the full round trip (mutate, prune, save). A save
/// failure propagates without rolling back the in-memory state, so the
/// caller may retry persisting by issuing any further operation; until
/// then memory and disk diverge.
#[derive(Debug)]
pub struct Tracker {
    store_path: PathBuf,
    store: TaskStore,
    settings: Settings,
    outcome: LoadOutcome,
}

impl Tracker {
    /// Loads the store, migrating the legacy shape and applying the
    /// retention policy. Migration and pruning results are persisted
    /// right away so expired entries cannot resurface after a restart.
    pub fn open(store_path: &Path, settings: Settings) -> Result<Self, StorageError> {
        let (doc, outcome) = load_document(store_path);
        let before = doc.clone();
        let doc = retention::prune(doc, &settings.retention(), now_millis());
        let changed = outcome == LoadOutcome::Migrated || doc != before;
        let tracker = Self {
            store_path: store_path.to_path_buf(),
            store: TaskStore::new(doc),
            settings,
            outcome,
        };
        if changed {
            tracker.save()?;
        }
        Ok(tracker)
    }

    pub fn document(&self) -> &TaskDocument {
        self.store.document()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// How the last load arrived at its document; `Recovered` means a
    /// corrupt store was silently replaced and is worth logging.
    pub fn load_outcome(&self) -> LoadOutcome {
        self.outcome
    }

    pub fn progress(&self) -> Progress {
        compute_progress(self.store.document())
    }

    /// Adds a pending task. Titles that are empty after trimming are
    /// rejected here, before they reach the store.
    pub fn add(&mut self, title: &str) -> Result<bool, StorageError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(false);
        }
        self.store.add(title, now_millis());
        self.commit()?;
        Ok(true)
    }

    /// Completes or toggles `tasks[index]`, depending on whether the
    /// checklist feature is enabled in the current settings.
    pub fn toggle(&mut self, index: usize) -> Result<bool, StorageError> {
        let applied = if self.settings.enable_checklist {
            self.store.complete(index, now_millis())
        } else {
            self.store.toggle_done(index)
        };
        self.finish(applied)
    }

    pub fn edit(&mut self, index: usize, new_title: &str) -> Result<bool, StorageError> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Ok(false);
        }
        let applied = self.store.edit(index, new_title);
        self.finish(applied)
    }

    pub fn delete(&mut self, index: usize, scope: Scope) -> Result<bool, StorageError> {
        let applied = self.store.delete(index, scope);
        self.finish(applied)
    }

    pub fn restore(&mut self, index: usize) -> Result<bool, StorageError> {
        let applied = self.store.restore(index, now_millis());
        self.finish(applied)
    }

    /// Runs the expiry filter once, regardless of the auto-delete flag,
    /// and persists the result. Returns how many entries were removed.
    pub fn purge(&mut self) -> Result<usize, StorageError> {
        let before = self.store.document().checklist.len();
        let doc = std::mem::take(&mut self.store).into_document();
        let doc = retention::purge(doc, self.settings.retention_days, now_millis());
        let removed = before - doc.checklist.len();
        self.store = TaskStore::new(doc);
        self.save()?;
        Ok(removed)
    }

    fn finish(&mut self, applied: bool) -> Result<bool, StorageError> {
        if applied {
            self.commit()?;
        }
        Ok(applied)
    }

    fn commit(&mut self) -> Result<(), StorageError> {
        let doc = std::mem::take(&mut self.store).into_document();
        let doc = retention::prune(doc, &self.settings.retention(), now_millis());
        self.store = TaskStore::new(doc);
        self.save()
    }

    fn save(&self) -> Result<(), StorageError> {
        save_document(&self.store_path, self.store.document())
    }
}
