//! Watering log — bounded, newest-first history of completed and canceled
//! runs.

use serde::{Deserialize, Serialize};

use crate::id::{GreenhouseKey, LogEntryId};
use crate::time::Timestamp;

/// Maximum number of entries retained; the oldest are silently dropped.
pub const LOG_RETENTION: usize = 1000;

/// How a watering run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Canceled,
}

/// Immutable record of one finished watering run.
///
/// Created only by the timer controller on terminal transitions; never
/// mutated, never individually deleted except by the retention cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: LogEntryId,
    /// Which greenhouse the run belonged to (reference, not ownership).
    pub greenhouse_id: GreenhouseKey,
    /// When the run was started.
    pub date: Timestamp,
    /// Elapsed whole minutes: the selected length for completed runs, the
    /// actually elapsed time for canceled runs.
    pub duration: i64,
    pub status: RunStatus,
}

/// A [`LogEntry`] before the store assigns its id.
#[derive(Debug, Clone)]
pub struct LogDraft {
    pub greenhouse_id: GreenhouseKey,
    pub date: Timestamp,
    pub duration: i64,
    pub status: RunStatus,
}

/// Append-only, bounded history of watering runs, newest-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WateringLog {
    entries: Vec<LogEntry>,
}

impl WateringLog {
    /// Assign an id to the draft, prepend it, and enforce the retention cap.
    /// Returns the stored entry.
    pub fn append(&mut self, draft: LogDraft) -> LogEntry {
        let entry = LogEntry {
            id: LogEntryId::new(),
            greenhouse_id: draft.greenhouse_id,
            date: draft.date,
            duration: draft.duration,
            status: draft.status,
        };
        self.entries.insert(0, entry.clone());
        self.entries.truncate(LOG_RETENTION);
        entry
    }

    /// All entries, newest-first by insertion.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries for one greenhouse, sorted descending by date.
    ///
    /// Insertion order is already chronological in the common case, but the
    /// explicit sort keeps the result correct if the wall clock was adjusted
    /// between appends.
    #[must_use]
    pub fn by_greenhouse(&self, key: &GreenhouseKey) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|entry| &entry.greenhouse_id == key)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// The start date of the most recent run for a greenhouse, if any.
    #[must_use]
    pub fn latest_date(&self, key: &GreenhouseKey) -> Option<Timestamp> {
        self.entries
            .iter()
            .filter(|entry| &entry.greenhouse_id == key)
            .map(|entry| entry.date)
            .max()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
