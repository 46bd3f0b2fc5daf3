use crate::errors::{EngineError, Result};
use crate::interval::{BufferedInterval, Buffers, Interval};
use chrono::{NaiveDate, NaiveDateTime};
use qtty::{Minute, Quantity};
use serde::Serialize;
use std::collections::BTreeMap;


/// All intervals sharing one calendar day.
///
/// A `DaySchedule` is the unit of analysis for the partitioner and the
/// capacity assigner. Intervals are kept in the order they were supplied;
/// algorithms establish their own canonical order, so input order never
/// changes a result.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sitecap::interval::Interval;
/// use sitecap::schedule::DaySchedule;
///
/// let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let schedule = DaySchedule::new(
///     day,
///     vec![
///         Interval::new(at(9, 0), at(10, 0), "OR", ()).unwrap(),
///         Interval::new(at(9, 30), at(10, 30), "GI", ()).unwrap(),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(schedule.len(), 2);
/// assert_eq!(schedule.occupancy_at(at(9, 45)), 2);
/// assert_eq!(schedule.committed_minutes().value(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule<D = ()> {
    day: NaiveDate,
    intervals: Vec<Interval<D>>,
}

impl<D> DaySchedule<D> {
    /// Groups `intervals` under `day`.
    ///
    /// Fails with [`EngineError::DayMismatch`] if any interval belongs to
    /// another date.
    pub fn new(day: NaiveDate, intervals: Vec<Interval<D>>) -> Result<Self> {
        if let Some(stray) = intervals.iter().find(|iv| iv.day() != day) {
            return Err(EngineError::DayMismatch {
                expected: day,
                found: stray.day(),
            });
        }
        Ok(Self { day, intervals })
    }

    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            intervals: Vec::new(),
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }

    pub fn intervals(&self) -> &[Interval<D>] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval<D>> + '_ {
        self.intervals.iter()
    }

    /// Buffered views of every interval, in input order.
    pub fn buffered(&self, buffers: &Buffers) -> Vec<BufferedInterval<'_, D>> {
        buffers.apply_all(&self.intervals)
    }

    /// Number of intervals with `start <= t < end`.
    ///
    /// Linear scan; the heatmap builder uses a sorted sweep instead.
    pub fn occupancy_at(&self, t: NaiveDateTime) -> usize {
        self.intervals.iter().filter(|iv| iv.contains(t)).count()
    }

    /// Total raw occupied time (sum of durations, overlaps counted twice).
    pub fn committed_minutes(&self) -> Quantity<Minute> {
        self.intervals
            .iter()
            .map(|iv| iv.minutes())
            .fold(Quantity::new(0.0), |acc, m| acc + m)
    }

    /// Returns the earliest start of the day, if any.
    pub fn earliest_start(&self) -> Option<NaiveDateTime> {
        self.intervals.iter().map(|iv| iv.start()).min()
    }

    /// Returns the latest end of the day, if any.
    pub fn latest_end(&self) -> Option<NaiveDateTime> {
        self.intervals.iter().map(|iv| iv.end()).max()
    }
}

/// Splits intervals into one [`DaySchedule`] per date, ordered by date.
///
/// Within a day, intervals keep their relative input order.
pub fn group_by_day<D>(intervals: impl IntoIterator<Item = Interval<D>>) -> Vec<DaySchedule<D>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<Interval<D>>> = BTreeMap::new();
    for interval in intervals {
        by_day.entry(interval.day()).or_default().push(interval);
    }
    by_day
        .into_iter()
        .map(|(day, intervals)| DaySchedule { day, intervals })
        .collect()
}
