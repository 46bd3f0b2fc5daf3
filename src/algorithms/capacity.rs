//! Fixed-capacity "what-if" assignment.
//!
//! Intervals are offered, in canonical order, to exactly `capacity` slots.
//! An interval that finds no free slot is *uncovered*: it is reported and
//! never occupies or blocks a slot. The pass is greedy and never backtracks,
//! so the uncovered set is fully determined by the input.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;

use super::ordering::canonical_order;
use crate::errors::{EngineError, Result};
use crate::interval::{Buffers, Interval, Span};
use crate::schedule::DaySchedule;

/// Validates a capacity coming from configuration or user input.
pub fn checked_capacity(capacity: i64) -> Result<usize> {
    if capacity <= 0 {
        return Err(EngineError::InvalidCapacity(capacity));
    }
    usize::try_from(capacity).map_err(|_| EngineError::InvalidCapacity(capacity))
}

/// Assigns `spans` to `capacity` slots.
///
/// Returns, per input position, the slot the span landed on or `None` if it
/// was left uncovered. A slot is free for a span when its recorded end-time
/// is `<=` the span's start (never-used slots are always free); among free
/// slots the one freed earliest wins, ties going to the lowest index.
///
/// Fails with [`EngineError::InvalidCapacity`] when `capacity` is zero,
/// before looking at any span.
pub fn assign_spans<S: Span>(spans: &[S], capacity: usize) -> Result<Vec<Option<usize>>> {
    if capacity == 0 {
        return Err(EngineError::InvalidCapacity(0));
    }

    // More slots than spans can never be told apart, so the heap stays small
    // even for very large capacities.
    let live = capacity.min(spans.len());
    let mut slots: BinaryHeap<Reverse<(Option<NaiveDateTime>, usize)>> =
        (0..live).map(|slot| Reverse((None, slot))).collect();
    let mut slot_of = vec![None; spans.len()];

    for index in canonical_order(spans) {
        let span = &spans[index];
        let free = match slots.peek() {
            Some(&Reverse((free_at, slot))) if free_at.map_or(true, |t| t <= span.start()) => {
                Some(slot)
            }
            _ => None,
        };
        if let Some(slot) = free {
            slots.pop();
            slots.push(Reverse((Some(span.end()), slot)));
        }
        slot_of[index] = free;
    }

    Ok(slot_of)
}

/// An interval that could not be placed under a capacity cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UncoveredInterval<'a, D> {
    interval: &'a Interval<D>,
    day: NaiveDate,
    capacity: usize,
}

impl<'a, D> UncoveredInterval<'a, D> {
    pub fn interval(&self) -> &'a Interval<D> {
        self.interval
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Outcome of one `(day, capacity)` what-if.
#[derive(Debug, Clone)]
pub struct Assignment<'a, D> {
    day: NaiveDate,
    capacity: usize,
    slot_of: Vec<Option<usize>>,
    uncovered: Vec<UncoveredInterval<'a, D>>,
}

impl<'a, D> Assignment<'a, D> {
    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total(&self) -> usize {
        self.slot_of.len()
    }

    /// Intervals that received a slot.
    pub fn assigned(&self) -> usize {
        self.total() - self.uncovered.len()
    }

    /// Uncovered intervals in canonical order.
    pub fn uncovered(&self) -> &[UncoveredInterval<'a, D>] {
        &self.uncovered
    }

    pub fn uncovered_count(&self) -> usize {
        self.uncovered.len()
    }

    pub fn is_fully_covered(&self) -> bool {
        self.uncovered.is_empty()
    }

    /// Slot of the interval at input position `index` within the day.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.slot_of.get(index).copied().flatten()
    }
}

/// Runs the capacity-constrained assignment for one day.
///
/// Overlap is judged on the buffered views of the day's intervals; pass
/// [`Buffers::none`] to judge raw intervals.
pub fn assign_with_capacity<'a, D>(
    day: &'a DaySchedule<D>,
    capacity: usize,
    buffers: &Buffers,
) -> Result<Assignment<'a, D>> {
    let views = day.buffered(buffers);
    let slot_of = assign_spans(&views, capacity)?;

    let uncovered: Vec<UncoveredInterval<'a, D>> = canonical_order(&views)
        .into_iter()
        .filter(|&index| slot_of[index].is_none())
        .map(|index| UncoveredInterval {
            interval: views[index].interval(),
            day: day.day(),
            capacity,
        })
        .collect();

    if !uncovered.is_empty() {
        debug!(
            "{}: {} of {} intervals uncovered with {} slots",
            day.day(),
            uncovered.len(),
            day.len(),
            capacity
        );
    }

    Ok(Assignment {
        day: day.day(),
        capacity,
        slot_of,
        uncovered,
    })
}
