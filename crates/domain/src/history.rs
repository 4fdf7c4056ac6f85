//! Request History Domain Model
//!
//! One [`HistoryRecord`] is written per execution, success or failure.
//! Records are immutable once created.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::{HttpMethod, RequestDescriptor};
use crate::result::{ExecutionOutcome, ExecutionResult};

/// Default number of records kept by [`RequestHistory`].
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Unique identifier for this entry.
    pub id: String,
    /// When the execution finished.
    pub timestamp: DateTime<Utc>,
    /// HTTP method used.
    pub method: HttpMethod,
    /// The request URL as authored (before query params are appended).
    pub url: String,
    /// The full descriptor that was executed.
    pub request: RequestDescriptor,
    /// The normalized result.
    pub result: ExecutionResult,
    /// Execution duration in milliseconds.
    pub elapsed_ms: u64,
    /// HTTP status, or `None` when no response was obtained.
    pub status: Option<u16>,
}

impl HistoryRecord {
    /// Creates a record for an executed descriptor.
    #[must_use]
    pub fn new(
        descriptor: &RequestDescriptor,
        outcome: &ExecutionOutcome,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let result = ExecutionResult::from_outcome(outcome);
        Self {
            id: crate::generate_id(),
            timestamp,
            method: descriptor.method,
            url: descriptor.url.clone(),
            elapsed_ms: result.elapsed_ms,
            status: result.status,
            request: descriptor.clone(),
            result,
        }
    }

    /// Returns true if a response was received.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.result.success
    }

    /// Returns the descriptor to replay this entry.
    #[must_use]
    pub fn replay_descriptor(&self) -> RequestDescriptor {
        self.request.clone()
    }

    /// Returns a human-readable "time ago" string relative to `now`.
    #[must_use]
    pub fn time_ago(&self, now: DateTime<Utc>) -> String {
        let duration = now.signed_duration_since(self.timestamp);

        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{mins}m ago")
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{hours}h ago")
        } else if duration.num_days() < 7 {
            let days = duration.num_days();
            format!("{days}d ago")
        } else {
            self.timestamp.format("%Y-%m-%d").to_string()
        }
    }

    /// Returns the duration as a display string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_display(&self) -> String {
        match self.elapsed_ms {
            ms if ms < 1000 => format!("{ms}ms"),
            ms => format!("{:.1}s", ms as f64 / 1000.0),
        }
    }
}

/// Request history with a maximum size limit, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestHistory {
    entries: VecDeque<HistoryRecord>,
    #[serde(default = "default_max_entries")]
    max_entries: usize,
}

const fn default_max_entries() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for RequestHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl RequestHistory {
    /// Creates a new empty history.
    #[must_use]
    pub const fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Adds an entry to the history (at the front).
    pub fn add(&mut self, entry: HistoryRecord) {
        self.entries.push_front(entry);

        // Trim to max size
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<HistoryRecord> {
        &self.entries
    }

    /// Returns up to `limit` newest entries.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryRecord> {
        self.entries.iter().take(limit)
    }

    /// Returns an entry by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Removes an entry by ID, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<HistoryRecord> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(index)
    }

    /// Clears all history entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sets the maximum number of entries and trims if needed.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max;
        while self.entries.len() > max {
            self.entries.pop_back();
        }
    }
}
