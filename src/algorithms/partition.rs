//! Minimum number of concurrent slots for one day's intervals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::ordering::canonical_order;
use crate::interval::{Buffers, Span};
use crate::schedule::DaySchedule;

/// Result of partitioning a set of spans into non-overlapping slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    slot_count: usize,
    slot_of: Vec<usize>,
}

impl Partition {
    /// Number of slots allocated; the minimum needed.
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Slot the span at input position `index` was placed on.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.slot_of.get(index).copied()
    }

    /// Slot per input position.
    pub fn slots(&self) -> &[usize] {
        &self.slot_of
    }
}

/// Partitions `spans` into the fewest slots such that no two spans on one
/// slot overlap.
///
/// Spans are swept in canonical order against a min-heap of slot end-times.
/// A slot whose end-time is `<=` the next start is reused (half-open
/// bounds); otherwise a new slot is opened. Among slots freed at the same
/// instant the lowest index is reused.
///
/// The resulting count equals [`max_overlap`] of the same spans. O(n log n);
/// the heap never holds more than the final slot count.
pub fn partition<S: Span>(spans: &[S]) -> Partition {
    let mut free_at: BinaryHeap<Reverse<(NaiveDateTime, usize)>> = BinaryHeap::new();
    let mut slot_of = vec![0; spans.len()];
    let mut slot_count = 0;

    for index in canonical_order(spans) {
        let span = &spans[index];
        let slot = match free_at.peek() {
            Some(&Reverse((end, slot))) if end <= span.start() => {
                free_at.pop();
                slot
            }
            _ => {
                slot_count += 1;
                slot_count - 1
            }
        };
        slot_of[index] = slot;
        free_at.push(Reverse((span.end(), slot)));
    }

    debug_assert!(
        spans.iter().any(|s| s.end() <= s.start()) || slot_count == max_overlap(spans),
        "slot count must equal peak overlap"
    );
    Partition {
        slot_count,
        slot_of,
    }
}

/// Minimum number of slots needed to hold `spans` without overlap.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sitecap::algorithms::minimum_slots;
/// use sitecap::interval::Interval;
///
/// let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
/// let intervals = vec![
///     Interval::new(at(9, 0), at(10, 0), "OR", ()).unwrap(),
///     Interval::new(at(9, 30), at(10, 30), "OR", ()).unwrap(),
///     Interval::new(at(10, 0), at(11, 0), "OR", ()).unwrap(),
/// ];
/// assert_eq!(minimum_slots(&intervals), 2);
/// ```
pub fn minimum_slots<S: Span>(spans: &[S]) -> usize {
    partition(spans).slot_count()
}

/// Maximum number of spans open at any single instant.
///
/// Independent event sweep: at equal instants closings are applied before
/// openings, matching half-open bounds.
pub fn max_overlap<S: Span>(spans: &[S]) -> usize {
    let mut events: Vec<(NaiveDateTime, bool)> = spans
        .iter()
        .flat_map(|s| [(s.start(), true), (s.end(), false)])
        .collect();
    // `false < true`, so an end at t sorts before a start at t.
    events.sort_unstable();

    let mut open = 0usize;
    let mut peak = 0usize;
    for (_, opens) in events {
        if opens {
            open += 1;
            peak = peak.max(open);
        } else {
            open = open.saturating_sub(1);
        }
    }
    peak
}

/// Minimum slot counts of one day, raw and buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinimumSlots {
    pub unbuffered: usize,
    pub buffered: usize,
}

/// Runs the partitioner over a day's raw intervals and over their buffered
/// views.
pub fn minimum_slots_for_day<D>(day: &DaySchedule<D>, buffers: &Buffers) -> MinimumSlots {
    MinimumSlots {
        unbuffered: minimum_slots(day.intervals()),
        buffered: minimum_slots(&day.buffered(buffers)),
    }
}
