//! sitecap - Site Capacity analytics
//!
//! Given the timed intervals that occupy a shared resource (procedure rooms,
//! bays, sites), computes per day the minimum number of concurrent sites
//! needed, builds time-of-day concurrency heatmaps, and replays each day
//! against a fixed site count to list what would not fit.
//!
//! The algorithms in [`algorithms`] are pure functions over borrowed input;
//! [`report::analyze`] runs them over a whole batch driven by an
//! [`config::AnalysisConfig`].

pub mod algorithms;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod grid;
pub mod intake;
pub mod interval;
pub mod report;
pub mod schedule;
pub mod units;

pub use config::AnalysisConfig;
pub use errors::{EngineError, Result};
pub use interval::{Buffers, Interval, Span};
pub use report::{analyze, AnalysisReport};
pub use schedule::{group_by_day, DaySchedule};
// Re-export unit conversion traits for ergonomic use
pub use units::{convert, SameDim};
