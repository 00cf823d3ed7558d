//! Insertion sort.

use std::cmp::Ordering;

use tracevis_core::Event;

use crate::recorder::Recorder;

/// Insertion sort trace for `values`.
///
/// Pointer `i` marks the element being inserted. It walks left with adjacent
/// compare/swap pairs, after which `SetRange(0, i)` marks the ordered prefix.
pub fn insertion_sort(values: &[i64]) -> Vec<Event> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    for i in 1..n {
        rec.pointer("i", i);
        let mut j = i;
        while j > 0 && rec.compare(j - 1, j) == Ordering::Greater {
            rec.swap(j - 1, j);
            j -= 1;
        }
        rec.range(0, i);
    }

    if n > 1 {
        rec.clear_range();
    }
    rec.finish()
}
