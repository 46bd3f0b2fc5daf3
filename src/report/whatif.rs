//! Batch totals of the fixed-capacity what-ifs.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::daily::DayOutcome;
use crate::algorithms::UncoveredInterval;

/// An uncovered interval kept as an example.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhatIfSample<D> {
    pub date: NaiveDate,
    pub category: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub detail: D,
}

impl<D: Clone> WhatIfSample<D> {
    pub(super) fn from_uncovered(uncovered: &UncoveredInterval<'_, D>) -> Self {
        let interval = uncovered.interval();
        Self {
            date: uncovered.day(),
            category: interval.category().to_string(),
            start: interval.start(),
            end: interval.end(),
            detail: interval.detail().clone(),
        }
    }
}

/// Outcome of running every day with `capacity` slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfSummary<D> {
    pub capacity: usize,
    pub total_uncovered: usize,
    pub days_affected: usize,
    /// In date order, then canonical order within a day.
    pub samples: Vec<WhatIfSample<D>>,
}

/// One summary per capacity, in configured order.
pub(super) fn summarize<D: Clone>(
    capacities: &[usize],
    outcomes: &[DayOutcome<D>],
    sample_limit: usize,
) -> Vec<WhatIfSummary<D>> {
    capacities
        .iter()
        .enumerate()
        .map(|(k, &capacity)| {
            let counts = outcomes.iter().map(|o| o.daily.uncovered[k].count);
            WhatIfSummary {
                capacity,
                total_uncovered: counts.clone().sum(),
                days_affected: counts.filter(|&c| c > 0).count(),
                samples: outcomes
                    .iter()
                    .flat_map(|o| o.samples[k].iter().cloned())
                    .take(sample_limit)
                    .collect(),
            }
        })
        .collect()
}
