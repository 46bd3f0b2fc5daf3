use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use thiserror::Error;

/// Why an interval was rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalFault {
    MissingStart,
    MissingEnd,
    EndNotAfterStart,
    /// The end lies past midnight of the day after the start.
    SpansMidnight,
}

impl fmt::Display for IntervalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalFault::MissingStart => write!(f, "missing start timestamp"),
            IntervalFault::MissingEnd => write!(f, "missing end timestamp"),
            IntervalFault::EndNotAfterStart => write!(f, "end is not after start"),
            IntervalFault::SpansMidnight => write!(f, "interval spans a day boundary"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid interval [{start:?}, {end:?}): {fault}")]
    InvalidInterval {
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        fault: IntervalFault,
    },

    #[error("Capacity must be a positive number of slots, got {0}")]
    InvalidCapacity(i64),

    #[error("Invalid {which} buffer: {minutes} min (must be finite and >= 0)")]
    InvalidBuffer { which: &'static str, minutes: f64 },

    #[error("Invalid time grid: {0}")]
    InvalidGrid(String),

    #[error("Interval on {found} does not belong to day schedule {expected}")]
    DayMismatch { expected: NaiveDate, found: NaiveDate },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
