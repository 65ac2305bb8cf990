//! Tape of completed calculations
//!
//! Every successful `=` leaves one line on the tape. The history line on the
//! display only ever shows the pending expression; the tape keeps the results.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// The evaluated expression, e.g. `"5 + 3"`
    pub expression: String,
    /// The numeric result
    pub result: f64,
    /// The result as it was shown on the display
    pub display: String,
}

impl TapeEntry {
    /// Creates a new tape entry
    #[must_use]
    pub fn new(expression: impl Into<String>, result: f64, display: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            result,
            display: display.into(),
        }
    }

    /// Returns the `expression = result` line
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} = {}", self.expression, self.display)
    }
}

/// Bounded tape; the oldest entry is dropped once capacity is reached
#[derive(Debug, Clone)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    capacity: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default maximum tape length
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new tape with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a tape holding at most `capacity` entries
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: impl Into<String>, result: f64, display: impl Into<String>) {
        self.push(TapeEntry::new(expression, result, display));
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the tape is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of entries
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clears all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Returns the last n entries (newest first)
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&TapeEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Serializes the tape to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes a tape from JSON, keeping the newest entries that fit
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, serde_json::Error> {
        let entries: Vec<TapeEntry> = serde_json::from_str(json)?;
        let mut tape = Self::with_capacity(capacity);
        for entry in entries {
            tape.push(entry);
        }
        Ok(tape)
    }

    /// One `expression = result` line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(TapeEntry::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
