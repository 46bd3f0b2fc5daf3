//! Time-gridded concurrency heatmap.
//!
//! For every grid instant `t` and every day supplied, the number of intervals
//! open at `t` (`start <= t < end`) is counted, raw and buffered. Counts are
//! then reduced per instant to a mean and a maximum across the days.
//!
//! The builder never looks at calendar semantics: which days go in (a month,
//! weekdays only, ...) is decided by the caller, and since each cell depends
//! only on the days supplied, any subset can be built on its own.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Serialize, Serializer};

use super::round_to_tenth;
use crate::grid::TimeGrid;
use crate::interval::{Buffers, Span};
use crate::schedule::DaySchedule;

/// Aggregate occupancy of one grid slot across a set of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    #[serde(serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,
    /// Mean raw occupancy, one decimal.
    pub average: f64,
    pub max: usize,
    /// Mean buffered occupancy, one decimal.
    pub average_buffered: f64,
    pub max_buffered: usize,
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// Occupancy of one slot on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SlotOccupancy {
    pub unbuffered: usize,
    pub buffered: usize,
}

/// Sorted bounds of a day's spans; answers "how many are open at `t`" with
/// two binary searches.
struct SortedBounds {
    starts: Vec<NaiveDateTime>,
    ends: Vec<NaiveDateTime>,
}

impl SortedBounds {
    fn new<S: Span>(spans: &[S]) -> Self {
        let mut starts: Vec<_> = spans.iter().map(Span::start).collect();
        let mut ends: Vec<_> = spans.iter().map(Span::end).collect();
        starts.sort_unstable();
        ends.sort_unstable();
        Self { starts, ends }
    }

    /// Every span that ended by `t` also started by `t`, so the difference
    /// is exactly the number open at `t`.
    fn open_at(&self, t: NaiveDateTime) -> usize {
        let started = self.starts.partition_point(|s| *s <= t);
        let ended = self.ends.partition_point(|e| *e <= t);
        started.saturating_sub(ended)
    }
}

/// Per-slot occupancy of a single day, aligned with `grid`.
pub fn day_occupancy<D>(
    day: &DaySchedule<D>,
    grid: &TimeGrid,
    buffers: &Buffers,
) -> Vec<SlotOccupancy> {
    let raw = SortedBounds::new(day.intervals());
    let padded = SortedBounds::new(&day.buffered(buffers));
    grid.instants(day.day())
        .map(|t| SlotOccupancy {
            unbuffered: raw.open_at(t),
            buffered: padded.open_at(t),
        })
        .collect()
}

/// Reduces per-day occupancy rows (each aligned with `grid`) to heatmap
/// cells.
///
/// An empty set of rows yields zero cells of value 0.
pub fn aggregate_occupancy(rows: &[Vec<SlotOccupancy>], grid: &TimeGrid) -> Vec<HeatmapCell> {
    let days = rows.len();
    grid.slots()
        .iter()
        .enumerate()
        .map(|(slot, &time)| {
            let mut sum = 0usize;
            let mut sum_buffered = 0usize;
            let mut max = 0usize;
            let mut max_buffered = 0usize;
            for occupancy in rows.iter().filter_map(|row| row.get(slot)) {
                sum += occupancy.unbuffered;
                sum_buffered += occupancy.buffered;
                max = max.max(occupancy.unbuffered);
                max_buffered = max_buffered.max(occupancy.buffered);
            }
            let mean = |total: usize| {
                if days == 0 {
                    0.0
                } else {
                    round_to_tenth(total as f64 / days as f64)
                }
            };
            HeatmapCell {
                time,
                average: mean(sum),
                max,
                average_buffered: mean(sum_buffered),
                max_buffered,
            }
        })
        .collect()
}

/// Builds the heatmap over `schedules`, one cell per grid slot.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sitecap::algorithms::build_heatmap;
/// use sitecap::grid::TimeGrid;
/// use sitecap::interval::{Buffers, Interval};
/// use sitecap::schedule::DaySchedule;
/// use qtty::{Minute, Quantity};
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
/// let at = |h, m| date.and_hms_opt(h, m, 0).unwrap();
/// let day = DaySchedule::new(
///     date,
///     vec![Interval::new(at(10, 0), at(10, 30), "OR", ()).unwrap()],
/// )
/// .unwrap();
///
/// let grid = TimeGrid::new(10, 11, Quantity::<Minute>::new(15.0)).unwrap();
/// let cells = build_heatmap([&day], &grid, &Buffers::none());
/// let counts: Vec<_> = cells.iter().map(|c| c.max).collect();
/// assert_eq!(counts, vec![1, 1, 0, 0]);
/// ```
pub fn build_heatmap<'a, D: 'a>(
    schedules: impl IntoIterator<Item = &'a DaySchedule<D>>,
    grid: &TimeGrid,
    buffers: &Buffers,
) -> Vec<HeatmapCell> {
    let rows: Vec<Vec<SlotOccupancy>> = schedules
        .into_iter()
        .map(|day| day_occupancy(day, grid, buffers))
        .collect();
    aggregate_occupancy(&rows, grid)
}
