//! Core engine for taskdeck: task/checklist lifecycle, retention and persistence.

pub mod document;
pub mod progress;
pub mod retention;
pub mod settings;
pub mod storage;
pub mod store;
pub mod tracker;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
