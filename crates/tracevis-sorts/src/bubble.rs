//! Bubble sort.

use std::cmp::Ordering;

use tracevis_core::Event;

use crate::recorder::Recorder;

/// Bubble sort trace for `values`.
///
/// Emits one `Compare` per inner-loop iteration, `n * (n - 1) / 2` in total,
/// and a `Swap` right after each comparison that finds an inversion. No
/// pointers, ranges or labels.
pub fn bubble_sort(values: &[i64]) -> Vec<Event> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    for i in 0..n {
        for j in 0..(n - i - 1) {
            if rec.compare(j, j + 1) == Ordering::Greater {
                rec.swap(j, j + 1);
            }
        }
    }

    rec.finish()
}
