//! Cycle-tagged event log.
//!
//! Every observable scheduling decision produces one `Event`. Within a cycle
//! events are ordered by phase (write result, execute, issue) and then by
//! station order, so two runs of the same program produce identical logs.
//! Pushing an event also forwards it to `tracing`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::Cycle;

/// Category of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// An instruction entered a reservation station.
    Issue,
    /// A station started executing.
    Execute,
    /// A station broadcast its result.
    Write,
    /// A structural or RAW hazard delayed progress.
    Hazard,
    /// Lifecycle notice (start, completion).
    Info,
}

impl EventKind {
    /// Lower-case label used in logs and JSON.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Execute => "execute",
            Self::Write => "write",
            Self::Hazard => "hazard",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One entry of the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Cycle the event happened in (0 for the start notice).
    pub cycle: Cycle,
    /// Category.
    pub kind: EventKind,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}] {:<7} {}", self.cycle, self.kind, self.message)
    }
}

/// Append-only list of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and mirrors it to `tracing`.
    pub fn push(&mut self, event: Event) {
        match event.kind {
            EventKind::Hazard => trace!(cycle = event.cycle, kind = %event.kind, "{}", event.message),
            _ => debug!(cycle = event.cycle, kind = %event.kind, "{}", event.message),
        }
        self.events.push(event);
    }

    /// Appends an event built from its parts.
    pub fn record(&mut self, cycle: Cycle, kind: EventKind, message: impl Into<String>) {
        self.push(Event {
            cycle,
            kind,
            message: message.into(),
        });
    }

    /// Appends already-traced events without re-emitting them.
    pub fn extend_from_slice(&mut self, events: &[Event]) {
        self.events.extend_from_slice(events);
    }

    /// Events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events recorded in `cycle`.
    pub fn for_cycle(&self, cycle: Cycle) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.cycle == cycle)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes every event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Events as a slice.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    /// Consumes the log, returning its events.
    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
