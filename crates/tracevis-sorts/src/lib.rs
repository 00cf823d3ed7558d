//! Tracevis Sorts
//!
//! Sorting algorithms as trace adapters: each one sorts a private copy of its
//! input and returns the events describing what it did. Nothing here knows
//! about snapshots or rendering; replay the trace with
//! [`tracevis_core::Player`] to see it.
//!
//! # Usage
//!
//! ```
//! use tracevis_core::Player;
//! use tracevis_sorts::{BubbleSort, TraceAdapter};
//!
//! let input = vec![3, 1, 2];
//! let mut player = Player::new(input.clone());
//! player.load(BubbleSort.produce_trace(&input));
//!
//! assert_eq!(player.seek_end().unwrap().values(), &[1, 2, 3]);
//! ```

mod bubble;
mod insertion;
mod merge;
mod recorder;
mod selection;

use tracevis_core::Event;

pub use bubble::bubble_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use recorder::Recorder;
pub use selection::{selection_sort, SORTED_LABEL};

/// An algorithm that turns input data into an event trace.
///
/// Implementations must be pure and deterministic and must not modify
/// `input`. They need not prove their trace sorts anything; the player
/// replays whatever they emit.
pub trait TraceAdapter {
    /// Short stable name, e.g. `"bubble"`.
    fn name(&self) -> &'static str;

    /// Sort a copy of `input` and return the events describing it.
    fn produce_trace(&self, input: &[i64]) -> Vec<Event>;
}

/// Adapter for [`bubble_sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BubbleSort;

/// Adapter for [`insertion_sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertionSort;

/// Adapter for [`selection_sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionSort;

/// Adapter for [`merge_sort`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSort;

impl TraceAdapter for BubbleSort {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn produce_trace(&self, input: &[i64]) -> Vec<Event> {
        bubble_sort(input)
    }
}

impl TraceAdapter for InsertionSort {
    fn name(&self) -> &'static str {
        "insertion"
    }

    fn produce_trace(&self, input: &[i64]) -> Vec<Event> {
        insertion_sort(input)
    }
}

impl TraceAdapter for SelectionSort {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn produce_trace(&self, input: &[i64]) -> Vec<Event> {
        selection_sort(input)
    }
}

impl TraceAdapter for MergeSort {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn produce_trace(&self, input: &[i64]) -> Vec<Event> {
        merge_sort(input)
    }
}

/// Every adapter in this crate.
pub fn all_adapters() -> [&'static dyn TraceAdapter; 4] {
    [&BubbleSort, &InsertionSort, &SelectionSort, &MergeSort]
}
