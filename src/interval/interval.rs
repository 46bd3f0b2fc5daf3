//! Half-open occupancy interval for one calendar day.

use std::fmt::Display;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use qtty::{Minute, Quantity};
use serde::Serialize;

use super::buffer::{BufferedInterval, Buffers};
use super::span::Span;
use crate::errors::{EngineError, IntervalFault, Result};
use crate::units::minutes_of;

/// One scheduled occupancy `[start, end)`.
///
/// The interval belongs to the calendar date of its `start`; `end` may reach
/// at most midnight of the following day. `category` is an opaque label
/// assigned upstream and `detail` an opaque payload carried through to
/// reports on uncovered intervals.
///
/// # Invariants
///
/// - `end > start`
/// - `end <= start.date() + 1 day, 00:00`
///
/// Both are checked by the constructors, so a value of this type is always
/// well formed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval<D = ()> {
    start: NaiveDateTime,
    end: NaiveDateTime,
    category: String,
    detail: D,
}

impl<D> Interval<D> {
    /// Creates interval `[start, end)`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        category: impl Into<String>,
        detail: D,
    ) -> Result<Self> {
        let fault = |fault| EngineError::InvalidInterval {
            start: Some(start),
            end: Some(end),
            fault,
        };

        if end <= start {
            return Err(fault(IntervalFault::EndNotAfterStart));
        }
        if let Some(next_midnight) = start.date().succ_opt().map(|d| d.and_time(NaiveTime::MIN)) {
            if end > next_midnight {
                return Err(fault(IntervalFault::SpansMidnight));
            }
        }

        Ok(Self {
            start,
            end,
            category: category.into(),
            detail,
        })
    }

    /// Builds an interval from possibly missing timestamps, as delivered by
    /// tabular sources.
    pub fn from_parts(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category: impl Into<String>,
        detail: D,
    ) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end, category, detail),
            (None, _) => Err(EngineError::InvalidInterval {
                start,
                end,
                fault: IntervalFault::MissingStart,
            }),
            (Some(_), None) => Err(EngineError::InvalidInterval {
                start,
                end,
                fault: IntervalFault::MissingEnd,
            }),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn detail(&self) -> &D {
        &self.detail
    }

    /// Calendar date this interval belongs to.
    pub fn day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in minutes, the unit committed time is reported in.
    pub fn minutes(&self) -> Quantity<Minute> {
        minutes_of(self.duration())
    }

    /// Returns true if `t` ∈ `[start, end)`.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t < self.end
    }

    /// View of this interval padded by `buffers`.
    pub fn buffered(&self, buffers: &Buffers) -> BufferedInterval<'_, D> {
        buffers.apply(self)
    }
}

impl<D> Span for Interval<D> {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}

impl<D> Display for Interval<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}, {}) {}",
            self.day(),
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.category
        )
    }
}
