//! Per-day figures.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use qtty::{Minute, Quantity};
use serde::Serialize;

use super::whatif::WhatIfSample;
use super::UncoveredCount;
use crate::algorithms::{assign_with_capacity, minimum_slots_for_day, round_to_tenth};
use crate::calendar::{is_weekday, weekday_name};
use crate::errors::Result;
use crate::interval::Buffers;
use crate::schedule::DaySchedule;

/// What one calendar day looks like.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAnalysis {
    pub date: NaiveDate,
    pub weekday: String,
    pub is_weekday: bool,
    pub is_holiday: bool,
    pub total_intervals: usize,
    /// Earliest raw start of the day.
    pub first_start: Option<NaiveDateTime>,
    /// Latest raw end of the day.
    pub last_end: Option<NaiveDateTime>,
    /// Peak overlap of the raw intervals.
    pub min_sites_unbuffered: usize,
    pub min_sites_buffered: usize,
    pub committed_minutes: f64,
    pub capacity_minutes: f64,
    /// Committed over capacity minutes, in percent, one decimal.
    pub utilization_pct: f64,
    /// One entry per what-if capacity, in configured order.
    pub uncovered: Vec<UncoveredCount>,
}

impl DailyAnalysis {
    /// Weekday that is not a holiday.
    pub fn is_operating_day(&self) -> bool {
        self.is_weekday && !self.is_holiday
    }

    pub fn uncovered_at(&self, capacity: usize) -> Option<usize> {
        self.uncovered
            .iter()
            .find(|u| u.capacity == capacity)
            .map(|u| u.count)
    }
}

/// Inputs shared by every day of a batch.
pub(super) struct DayContext<'c> {
    pub buffers: Buffers,
    pub whatif_buffers: Buffers,
    pub capacities: &'c [usize],
    pub capacity_minutes: Quantity<Minute>,
    pub holidays: &'c [NaiveDate],
    pub samples_per_day: usize,
}

/// A day's figures plus its first few uncovered intervals per capacity.
pub(super) struct DayOutcome<D> {
    pub daily: DailyAnalysis,
    /// Aligned with `DayContext::capacities`.
    pub samples: Vec<Vec<WhatIfSample<D>>>,
}

pub(super) fn analyze_day<D: Clone>(
    schedule: &DaySchedule<D>,
    ctx: &DayContext<'_>,
) -> Result<DayOutcome<D>> {
    let date = schedule.day();
    let slots = minimum_slots_for_day(schedule, &ctx.buffers);
    let committed = schedule.committed_minutes();

    let mut uncovered = Vec::with_capacity(ctx.capacities.len());
    let mut samples = Vec::with_capacity(ctx.capacities.len());
    for &capacity in ctx.capacities {
        let assignment = assign_with_capacity(schedule, capacity, &ctx.whatif_buffers)?;
        uncovered.push(UncoveredCount {
            capacity,
            count: assignment.uncovered_count(),
        });
        samples.push(
            assignment
                .uncovered()
                .iter()
                .take(ctx.samples_per_day)
                .map(WhatIfSample::from_uncovered)
                .collect(),
        );
    }

    let capacity = ctx.capacity_minutes.value();
    let utilization_pct = if capacity > 0.0 {
        round_to_tenth(committed.value() / capacity * 100.0)
    } else {
        0.0
    };

    debug!(
        "{}: {} intervals, min sites {} ({} buffered), {:.1}% utilized",
        date,
        schedule.len(),
        slots.unbuffered,
        slots.buffered,
        utilization_pct
    );

    Ok(DayOutcome {
        daily: DailyAnalysis {
            date,
            weekday: weekday_name(date),
            is_weekday: is_weekday(date),
            is_holiday: ctx.holidays.contains(&date),
            total_intervals: schedule.len(),
            first_start: schedule.earliest_start(),
            last_end: schedule.latest_end(),
            min_sites_unbuffered: slots.unbuffered,
            min_sites_buffered: slots.buffered,
            committed_minutes: committed.value(),
            capacity_minutes: capacity,
            utilization_pct,
            uncovered,
        },
        samples,
    })
}
