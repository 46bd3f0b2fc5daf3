//! Batch analysis over many days.
//!
//! [`analyze`] drops excluded categories, groups the remaining intervals by
//! day and runs every algorithm on every day. Day-level results are then
//! rolled up into what-if totals, a summary over operating weekdays and
//! heatmaps (all operating weekdays, and each month separately).
//!
//! Days are independent; with the `parallel` feature they are analysed on
//! the rayon pool. Output is ordered by date either way.

mod daily;
mod summary;
mod whatif;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use log::{info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::algorithms::{build_heatmap, checked_capacity, HeatmapCell};
use crate::calendar::{by_month, operating_days};
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::interval::Interval;
use crate::schedule::group_by_day;

pub use daily::DailyAnalysis;
pub use summary::Summary;
pub use whatif::{WhatIfSample, WhatIfSummary};

use daily::{analyze_day, DayContext, DayOutcome};

/// Bound on the interval payload carried through a report.
///
/// Samples copy the payload, so it must be `Clone`. With the `parallel`
/// feature days are analysed on other threads, which also needs
/// `Send + Sync`.
#[cfg(feature = "parallel")]
pub trait ReportDetail: Clone + Send + Sync {}
#[cfg(feature = "parallel")]
impl<T: Clone + Send + Sync> ReportDetail for T {}

/// Bound on the interval payload carried through a report.
///
/// Samples copy the payload, so it must be `Clone`.
#[cfg(not(feature = "parallel"))]
pub trait ReportDetail: Clone {}
#[cfg(not(feature = "parallel"))]
impl<T: Clone> ReportDetail for T {}

/// Uncovered intervals at one capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UncoveredCount {
    pub capacity: usize,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<D> {
    /// Every day with at least one interval, in date order.
    pub daily: Vec<DailyAnalysis>,
    pub what_if: Vec<WhatIfSummary<D>>,
    pub summary: Summary,
    /// Over operating weekdays.
    pub heatmap: Vec<HeatmapCell>,
    /// Over operating weekdays, keyed `YYYY-MM`.
    pub monthly_heatmaps: BTreeMap<String, Vec<HeatmapCell>>,
}

/// Runs the full analysis over `intervals` with `config`.
///
/// The configuration is validated first, so an invalid capacity or buffer
/// fails before any day is looked at.
pub fn analyze<D>(
    intervals: impl IntoIterator<Item = Interval<D>>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport<D>>
where
    D: ReportDetail,
{
    config.validate()?;
    let buffers = config.buffers()?;
    let grid = config.grid()?;
    let capacities = config.capacities()?;
    let contract_sites = checked_capacity(config.contract_sites)?;

    let schedules = group_by_day(
        intervals
            .into_iter()
            .filter(|iv| !config.excluded_categories.iter().any(|c| c == iv.category())),
    );

    let ctx = DayContext {
        buffers,
        whatif_buffers: config.whatif_buffers()?,
        capacities: &capacities,
        capacity_minutes: config.capacity_minutes()?,
        holidays: &config.holidays,
        samples_per_day: config.samples_per_day,
    };

    #[cfg(feature = "parallel")]
    let outcomes: Vec<DayOutcome<D>> = schedules
        .par_iter()
        .map(|schedule| analyze_day(schedule, &ctx))
        .collect::<Result<_>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<DayOutcome<D>> = schedules
        .iter()
        .map(|schedule| analyze_day(schedule, &ctx))
        .collect::<Result<_>>()?;

    let what_if = whatif::summarize(&capacities, &outcomes, config.sample_limit);

    let operating: Vec<&DailyAnalysis> = outcomes
        .iter()
        .map(|o| &o.daily)
        .filter(|d| d.is_operating_day())
        .collect();
    if operating.is_empty() {
        warn!(
            "No operating weekdays among {} analysed days; summary averages are 0",
            outcomes.len()
        );
    }
    let summary = Summary::over(&operating, contract_sites, &capacities);

    let operating_schedules = operating_days(&schedules, &config.holidays);
    let heatmap = build_heatmap(operating_schedules.iter().copied(), &grid, &buffers);
    let monthly_heatmaps = by_month(operating_schedules.iter().copied())
        .into_iter()
        .map(|(month, days)| (month, build_heatmap(days, &grid, &buffers)))
        .collect();

    info!(
        "Analysed {} days ({} operating): max min sites {}, {} at or over {} contracted",
        outcomes.len(),
        summary.operating_days,
        summary.max_min_sites,
        summary.days_at_or_over_contract,
        contract_sites
    );

    Ok(AnalysisReport {
        daily: outcomes.into_iter().map(|o| o.daily).collect(),
        what_if,
        summary,
        heatmap,
        monthly_heatmaps,
    })
}
