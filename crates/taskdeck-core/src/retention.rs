use crate::document::TaskDocument;

pub const MS_PER_DAY: i64 = 86_400_000;
pub const MIN_RETENTION_DAYS: u32 = 1;
pub const MAX_RETENTION_DAYS: u32 = 365;
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

/// Expiry policy for completed tasks, supplied per operation from the
/// settings provider. Active tasks are never subject to retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    pub auto_delete_enabled: bool,
    pub retention_days: u32,
}

pub fn clamp_retention_days(days: u32) -> u32 {
    days.clamp(MIN_RETENTION_DAYS, MAX_RETENTION_DAYS)
}

/// Applies automatic expiry. Identity when auto-delete is disabled;
/// otherwise delegates to [`purge`]. Pure and idempotent for a fixed
/// `now_ms`.
pub fn prune(doc: TaskDocument, config: &RetentionConfig, now_ms: i64) -> TaskDocument {
    if !config.auto_delete_enabled {
        return doc;
    }
    purge(doc, config.retention_days, now_ms)
}

/// Runs the expiry filter once, regardless of the auto-delete flag.
/// Retains checklist entries completed at or after the cutoff, in their
/// original order; the active list is never touched.
pub fn purge(mut doc: TaskDocument, retention_days: u32, now_ms: i64) -> TaskDocument {
    let cutoff = now_ms - i64::from(clamp_retention_days(retention_days)) * MS_PER_DAY;
    doc.checklist.retain(|entry| entry.completed_at >= cutoff);
    doc
}
