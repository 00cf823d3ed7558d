//! Event recording for adapters.

use std::cmp::Ordering;

use tracevis_core::{Event, Location};
use tracing::debug;

/// Sorts a private copy of the input while recording what it does.
///
/// Every mutating call both changes the working copy and appends the matching
/// event, so the recorded trace replays to the same arrangement.
#[derive(Debug, Clone)]
pub struct Recorder {
    values: Vec<i64>,
    events: Vec<Event>,
}

impl Recorder {
    /// Start recording over a copy of `input`.
    pub fn new(input: &[i64]) -> Self {
        Self {
            values: input.to_vec(),
            events: Vec::new(),
        }
    }

    /// The working copy in its current arrangement.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of values being sorted.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there is nothing to sort.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Events recorded so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Record a comparison and return how `values[i]` orders against `values[j]`.
    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.events.push(Event::compare(i, j));
        self.values[i].cmp(&self.values[j])
    }

    /// Swap two positions and record it.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.events.push(Event::swap(i, j));
        self.values.swap(i, j);
    }

    /// Overwrite one position and record it.
    pub fn set_value(&mut self, index: usize, value: i64) {
        self.events.push(Event::set_value(index, value));
        self.values[index] = value;
    }

    /// Move a named pointer.
    pub fn pointer(&mut self, name: &str, location: impl Into<Location>) {
        self.events.push(Event::set_pointer(name, location));
    }

    /// Focus on the inclusive range `low..=high`.
    pub fn range(&mut self, low: usize, high: usize) {
        self.events.push(Event::set_range(low, high));
    }

    /// Drop the focus range.
    pub fn clear_range(&mut self) {
        self.events.push(Event::ClearRange);
    }

    /// Attach a label to one position.
    pub fn label(&mut self, index: usize, label: &str) {
        self.events.push(Event::add_label(index, label));
    }

    /// Finish recording and hand back the trace.
    pub fn finish(self) -> Vec<Event> {
        debug!(len = self.values.len(), events = self.events.len(), "trace recorded");
        self.events
    }
}
