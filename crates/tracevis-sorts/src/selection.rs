//! Selection sort.

use std::cmp::Ordering;

use tracevis_core::Event;

use crate::recorder::Recorder;

/// Label attached to positions that hold their final value.
pub const SORTED_LABEL: &str = "sorted";

/// Selection sort trace for `values`.
///
/// Pointers `i`, `j` and `min` track the pass, the scan and the smallest value
/// seen so far. Each pass ends with at most one swap and labels position `i`
/// as sorted.
pub fn selection_sort(values: &[i64]) -> Vec<Event> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    for i in 0..n {
        rec.pointer("i", i);
        rec.pointer("min", i);
        let mut min = i;

        for j in (i + 1)..n {
            rec.pointer("j", j);
            if rec.compare(min, j) == Ordering::Greater {
                min = j;
                rec.pointer("min", j);
            }
        }

        if min != i {
            rec.swap(i, min);
        }
        rec.label(i, SORTED_LABEL);
    }

    rec.finish()
}
