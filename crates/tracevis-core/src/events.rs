//! Trace events recorded during algorithm execution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target of a named pointer.
///
/// Usually an index into the values, but algorithms over graphs or trees use
/// it as a node id. The event model does not say which; that convention is
/// shared between the algorithm and whoever draws the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(pub i64);

impl Location {
    /// Interpret this location as an index into `len` values.
    pub fn as_index(self, len: usize) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|&index| index < len)
    }
}

impl From<usize> for Location {
    fn from(index: usize) -> Self {
        Location(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<i64> for Location {
    fn from(id: i64) -> Self {
        Location(id)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One atomic fact about an algorithm's execution.
///
/// Events carry no behavior. Their meaning is defined by
/// [`apply_event`](crate::apply_event), which the player uses to turn each
/// one into a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The elements at `i` and `j` were compared
    Compare { i: usize, j: usize },

    /// The elements at `i` and `j` exchanged places
    Swap { i: usize, j: usize },

    /// A named pointer moved to `location`
    SetPointer { name: String, location: Location },

    /// The element at `index` was overwritten with `value`
    SetValue { index: usize, value: i64 },

    /// The algorithm is focused on the inclusive range `low..=high`
    SetRange { low: usize, high: usize },

    /// The focus range was dropped
    ClearRange,

    /// `label` was attached to the element at `index`
    AddLabel { index: usize, label: String },

    /// `label` was detached from the element at `index`
    RemoveLabel { index: usize, label: String },
}

impl Event {
    /// Every tag a serialized event may carry.
    pub const TAGS: &'static [&'static str] = &[
        "Compare",
        "Swap",
        "SetPointer",
        "SetValue",
        "SetRange",
        "ClearRange",
        "AddLabel",
        "RemoveLabel",
    ];

    /// `Compare(i, j)`.
    pub fn compare(i: usize, j: usize) -> Self {
        Event::Compare { i, j }
    }

    /// `Swap(i, j)`.
    pub fn swap(i: usize, j: usize) -> Self {
        Event::Swap { i, j }
    }

    /// Move pointer `name` to `location`.
    pub fn set_pointer(name: impl Into<String>, location: impl Into<Location>) -> Self {
        Event::SetPointer {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Overwrite the value at `index`.
    pub fn set_value(index: usize, value: i64) -> Self {
        Event::SetValue { index, value }
    }

    /// Focus on `low..=high`.
    pub fn set_range(low: usize, high: usize) -> Self {
        Event::SetRange { low, high }
    }

    /// Attach `label` to `index`.
    pub fn add_label(index: usize, label: impl Into<String>) -> Self {
        Event::AddLabel {
            index,
            label: label.into(),
        }
    }

    /// Detach `label` from `index`.
    pub fn remove_label(index: usize, label: impl Into<String>) -> Self {
        Event::RemoveLabel {
            index,
            label: label.into(),
        }
    }

    /// The serialized tag for this event.
    pub fn tag(&self) -> &'static str {
        match self {
            Event::Compare { .. } => "Compare",
            Event::Swap { .. } => "Swap",
            Event::SetPointer { .. } => "SetPointer",
            Event::SetValue { .. } => "SetValue",
            Event::SetRange { .. } => "SetRange",
            Event::ClearRange => "ClearRange",
            Event::AddLabel { .. } => "AddLabel",
            Event::RemoveLabel { .. } => "RemoveLabel",
        }
    }

    /// Whether `tag` names a known event variant.
    pub fn is_known_tag(tag: &str) -> bool {
        Self::TAGS.contains(&tag)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Compare { i, j } => write!(f, "Compare({i}, {j})"),
            Event::Swap { i, j } => write!(f, "Swap({i}, {j})"),
            Event::SetPointer { name, location } => write!(f, "SetPointer({name}, {location})"),
            Event::SetValue { index, value } => write!(f, "SetValue({index}, {value})"),
            Event::SetRange { low, high } => write!(f, "SetRange({low}, {high})"),
            Event::ClearRange => write!(f, "ClearRange"),
            Event::AddLabel { index, label } => write!(f, "AddLabel({index}, {label})"),
            Event::RemoveLabel { index, label } => write!(f, "RemoveLabel({index}, {label})"),
        }
    }
}
