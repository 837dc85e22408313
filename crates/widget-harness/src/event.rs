//! Event Log and Checklist
//!
//! Everything the widget reports ends up as an [`EventRecord`]. Event keys
//! that were seen go into [`ReceivedEvents`], which marks the static
//! checklist.

use std::collections::BTreeSet;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Origin label for direct widget callbacks
pub const CALLBACK_ORIGIN: &str = "callback";

/// Event keys a complete widget run is expected to produce
pub const EXPECTED_EVENTS: [&str; 4] = ["onModalWillEnter", "loaded", "onModalWillLeave", "close"];

/// A single logged event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Local wall-clock time, human readable
    pub timestamp: String,

    /// `"callback"` or the sender's URL origin
    pub origin: String,

    /// Event payload rendered as text
    pub data: String,
}

impl EventRecord {
    /// Create a record stamped with the current local time
    pub fn now(origin: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
            origin: origin.into(),
            data: data.into(),
        }
    }

    pub fn is_callback(&self) -> bool {
        self.origin == CALLBACK_ORIGIN
    }
}

/// Ordered log of events for the page session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct event keys seen in the current run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReceivedEvents {
    keys: BTreeSet<String>,
}

impl ReceivedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the key was not seen before
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Checklist of [`EXPECTED_EVENTS`] in fixed order
    pub fn checklist(&self) -> Vec<ChecklistItem> {
        EXPECTED_EVENTS
            .into_iter()
            .map(|name| ChecklistItem {
                name,
                received: self.contains(name),
            })
            .collect()
    }

    /// All expected events have been seen
    pub fn is_complete(&self) -> bool {
        EXPECTED_EVENTS.iter().all(|name| self.contains(name))
    }
}

/// One row of the checklist
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub name: &'static str,
    pub received: bool,
}
