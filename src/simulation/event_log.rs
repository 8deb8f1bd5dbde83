//! Event logging system for displaying recent range events.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A logged event for display in the demo overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Simulation time when the event occurred.
    pub time: f32,
    /// Human-readable description of the event.
    pub description: String,
    /// Category of the event (for display styling).
    pub kind: EventKind,
}

/// Categories of range events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A dart was grabbed.
    Grab,
    /// A dart was thrown.
    Throw,
    /// A dart stuck into a target.
    Stick,
    /// A dart hit too slowly and bounced off.
    Bounce,
    /// A round/session reset cleared the darts.
    Reset,
}

/// Event log that tracks recent range events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    /// Recent events, newest first.
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep.
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log.
    pub fn log(&mut self, time: f32, description: String, kind: EventKind) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            kind,
        });

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Returns all events, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }

    /// Clears all events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
