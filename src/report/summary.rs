//! Averages over operating weekdays.

use serde::Serialize;

use super::daily::DailyAnalysis;
use super::UncoveredCount;
use crate::algorithms::round_to_tenth;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub operating_days: usize,
    pub avg_intervals_per_day: f64,
    pub avg_committed_minutes: f64,
    pub avg_min_sites: f64,
    pub max_min_sites: usize,
    /// Days whose buffered minimum reaches the contracted site count.
    pub days_at_or_over_contract: usize,
    pub contract_sites: usize,
    /// Mean of the daily raw peak overlap.
    pub avg_peak_concurrency: f64,
    pub uncovered_totals: Vec<UncoveredCount>,
}

impl Summary {
    /// Summarises `days`, which the caller has already restricted to
    /// operating days. Averages are 0 when `days` is empty.
    pub(super) fn over(days: &[&DailyAnalysis], contract_sites: usize, capacities: &[usize]) -> Self {
        let mean = |total: f64| {
            if days.is_empty() {
                0.0
            } else {
                round_to_tenth(total / days.len() as f64)
            }
        };

        let uncovered_totals = capacities
            .iter()
            .enumerate()
            .map(|(k, &capacity)| UncoveredCount {
                capacity,
                count: days.iter().map(|d| d.uncovered[k].count).sum(),
            })
            .collect();

        Self {
            operating_days: days.len(),
            avg_intervals_per_day: mean(days.iter().map(|d| d.total_intervals as f64).sum()),
            avg_committed_minutes: mean(days.iter().map(|d| d.committed_minutes).sum()),
            avg_min_sites: mean(days.iter().map(|d| d.min_sites_buffered as f64).sum()),
            max_min_sites: days.iter().map(|d| d.min_sites_buffered).max().unwrap_or(0),
            days_at_or_over_contract: days
                .iter()
                .filter(|d| d.min_sites_buffered >= contract_sites)
                .count(),
            contract_sites,
            avg_peak_concurrency: mean(days.iter().map(|d| d.min_sites_unbuffered as f64).sum()),
            uncovered_totals,
        }
    }
}
