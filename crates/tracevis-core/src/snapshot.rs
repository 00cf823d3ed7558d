//! Point-in-time visualization state.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::Location;

/// A non-fatal condition raised while producing a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    /// A pointer was moved outside `0..len`. It may still be a valid node id.
    InvalidPointerLocation {
        name: String,
        location: Location,
        len: usize,
    },
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::InvalidPointerLocation {
                name,
                location,
                len,
            } => write!(
                f,
                "pointer {name} moved to {location}, outside of {len} values"
            ),
        }
    }
}

/// Everything a renderer needs to draw one step of a trace.
///
/// Snapshots are values: the player never mutates one after handing it out.
/// The larger collections sit behind `Arc` and are copied on write, so
/// consecutive snapshots share whatever a step did not touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    values: Arc<Vec<i64>>,
    highlights: BTreeSet<usize>,
    pointers: Arc<BTreeMap<String, Location>>,
    active_range: Option<(usize, usize)>,
    labels: Arc<BTreeMap<usize, BTreeSet<String>>>,
    message: Option<String>,
    conditions: Vec<Condition>,
}

impl Snapshot {
    /// Snapshot #0: the raw values with nothing highlighted, pointed at or labelled.
    pub fn initial(values: Vec<i64>) -> Self {
        Self {
            values: Arc::new(values),
            ..Self::default()
        }
    }

    /// The data in its current arrangement.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Indices currently emphasized.
    pub fn highlights(&self) -> &BTreeSet<usize> {
        &self.highlights
    }

    /// Named pointers and where they point.
    pub fn pointers(&self) -> &BTreeMap<String, Location> {
        &self.pointers
    }

    /// Where pointer `name` points, if it has been set.
    pub fn pointer(&self, name: &str) -> Option<Location> {
        self.pointers.get(name).copied()
    }

    /// Inclusive focus region, if any.
    pub fn active_range(&self) -> Option<(usize, usize)> {
        self.active_range
    }

    /// Per-index tags. Indices without tags have no entry.
    pub fn labels(&self) -> &BTreeMap<usize, BTreeSet<String>> {
        &self.labels
    }

    /// Whether `index` carries `label`.
    pub fn has_label(&self, index: usize, label: &str) -> bool {
        self.labels
            .get(&index)
            .is_some_and(|tags| tags.contains(label))
    }

    /// Human-readable description of the current step.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Conditions raised by the event that produced this snapshot.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Start the next snapshot from this one. Conditions belong to a single
    /// step and are not carried over.
    pub(crate) fn successor(&self) -> Self {
        Self {
            conditions: Vec::new(),
            ..self.clone()
        }
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<i64> {
        Arc::make_mut(&mut self.values)
    }

    pub(crate) fn set_highlights(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.highlights = indices.into_iter().collect();
    }

    pub(crate) fn pointers_mut(&mut self) -> &mut BTreeMap<String, Location> {
        Arc::make_mut(&mut self.pointers)
    }

    pub(crate) fn set_active_range(&mut self, range: Option<(usize, usize)>) {
        self.active_range = range;
    }

    pub(crate) fn labels_mut(&mut self) -> &mut BTreeMap<usize, BTreeSet<String>> {
        Arc::make_mut(&mut self.labels)
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub(crate) fn push_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    #[cfg(test)]
    pub(crate) fn shares_values_with(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}
