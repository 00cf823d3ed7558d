//! Merge sort.

use std::cmp::Ordering;

use tracevis_core::Event;

use crate::recorder::Recorder;

/// Top-down merge sort trace for `values`.
///
/// Each merge is announced with `SetRange(lo, hi)`. Both runs stay in place
/// while their heads are compared, so every `Compare` names positions that
/// still hold the compared values. The merged run is then written back with
/// one `SetValue` per position. Stable for equal values.
pub fn merge_sort(values: &[i64]) -> Vec<Event> {
    let mut rec = Recorder::new(values);
    let n = rec.len();

    if n > 1 {
        sort(&mut rec, 0, n - 1);
        rec.clear_range();
    }

    rec.finish()
}

fn sort(rec: &mut Recorder, lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    sort(rec, lo, mid);
    sort(rec, mid + 1, hi);
    merge(rec, lo, mid, hi);
}

fn merge(rec: &mut Recorder, lo: usize, mid: usize, hi: usize) {
    rec.range(lo, hi);

    let mut merged = Vec::with_capacity(hi - lo + 1);
    let (mut i, mut j) = (lo, mid + 1);
    while i <= mid && j <= hi {
        if rec.compare(i, j) == Ordering::Greater {
            merged.push(rec.values()[j]);
            j += 1;
        } else {
            merged.push(rec.values()[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&rec.values()[i..=mid]);
    merged.extend_from_slice(&rec.values()[j..=hi]);

    for (offset, value) in merged.into_iter().enumerate() {
        rec.set_value(lo + offset, value);
    }
}
