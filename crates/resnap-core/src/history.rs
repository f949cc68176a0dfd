//! In-memory lookup history for one client session.
//!
//! Entries are created pending before the outbound call starts and are
//! addressed by a stable [`EntryId`] afterwards, so lookups that resolve out
//! of order never touch each other's slots. Newest entries come first.

use std::fmt;

use serde::Serialize;

use crate::caption::{format_caption, ERROR_CAPTION, PENDING_CAPTION};
use crate::condition::Condition;
use crate::estimate::{minimum_total_of, PriceEstimate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(u64);

impl From<u64> for EntryId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("no history entry with id {0}")]
    UnknownEntry(EntryId),
}

/// Completed lookup, ready to be written into its pending entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
    /// Search term or image caption the lookup ran with.
    pub label: String,
    pub condition: Condition,
    pub estimate: PriceEstimate,
    /// Replaces the entry's thumbnail when present.
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Resolved {
        label: String,
        condition: Condition,
        estimate: PriceEstimate,
    },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: EntryId,
    /// Image reference; empty until a thumbnail is known.
    pub thumbnail: String,
    #[serde(flatten)]
    pub status: EntryStatus,
    pub saved: bool,
}

impl HistoryEntry {
    /// Packed single-string caption, e.g. `"Widget (Used) - $5-9"`.
    #[must_use]
    pub fn caption(&self) -> String {
        match &self.status {
            EntryStatus::Pending => PENDING_CAPTION.to_string(),
            EntryStatus::Failed => ERROR_CAPTION.to_string(),
            EntryStatus::Resolved {
                label,
                condition,
                estimate,
            } => format_caption(label, condition.label(), estimate),
        }
    }

    /// Title line: `"<label> (<condition>)"`, or the status marker.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.status {
            EntryStatus::Resolved {
                label, condition, ..
            } => format!("{label} ({condition})"),
            EntryStatus::Pending => PENDING_CAPTION.to_string(),
            EntryStatus::Failed => ERROR_CAPTION.to_string(),
        }
    }

    #[must_use]
    pub fn estimate(&self) -> Option<&PriceEstimate> {
        match &self.status {
            EntryStatus::Resolved { estimate, .. } => Some(estimate),
            EntryStatus::Pending | EntryStatus::Failed => None,
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, EntryStatus::Pending)
    }
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pending entry at the front and returns its id.
    pub fn append_pending(&mut self, thumbnail: impl Into<String>) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            0,
            HistoryEntry {
                id,
                thumbnail: thumbnail.into(),
                status: EntryStatus::Pending,
                saved: false,
            },
        );
        id
    }

    /// Writes a completed lookup into its entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::UnknownEntry`] if `id` was never issued.
    pub fn resolve(
        &mut self,
        id: EntryId,
        outcome: LookupOutcome,
    ) -> Result<&HistoryEntry, HistoryError> {
        let entry = self.entry_mut(id)?;
        if let Some(thumbnail) = outcome.thumbnail.filter(|t| !t.is_empty()) {
            entry.thumbnail = thumbnail;
        }
        entry.status = EntryStatus::Resolved {
            label: outcome.label,
            condition: outcome.condition,
            estimate: outcome.estimate,
        };
        Ok(entry)
    }

    /// Marks an entry as failed; it then displays the error caption.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::UnknownEntry`] if `id` was never issued.
    pub fn fail(&mut self, id: EntryId) -> Result<&HistoryEntry, HistoryError> {
        let entry = self.entry_mut(id)?;
        entry.status = EntryStatus::Failed;
        Ok(entry)
    }

    /// Bookmarks an entry. Saving twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::UnknownEntry`] if `id` was never issued.
    pub fn mark_saved(&mut self, id: EntryId) -> Result<&HistoryEntry, HistoryError> {
        let entry = self.entry_mut(id)?;
        entry.saved = true;
        Ok(entry)
    }

    #[must_use]
    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn saved(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(|e| e.saved)
    }

    #[must_use]
    pub fn saved_count(&self) -> usize {
        self.saved().count()
    }

    /// Sum of the lower bounds of every saved estimate.
    #[must_use]
    pub fn saved_minimum_total(&self) -> f64 {
        minimum_total_of(self.saved().filter_map(HistoryEntry::estimate))
    }

    /// Summary line for the saved list.
    ///
    /// `None` when items are saved but none carries a price, matching the
    /// display that hides a zero total.
    #[must_use]
    pub fn saved_summary(&self) -> Option<String> {
        let count = self.saved_count();
        if count == 0 {
            return Some("No saved items".to_string());
        }
        let total = self.saved_minimum_total();
        (total > 0.0).then(|| format!("{count} item(s) worth ${total}!"))
    }

    fn entry_mut(&mut self, id: EntryId) -> Result<&mut HistoryEntry, HistoryError> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(HistoryError::UnknownEntry(id))
    }
}
