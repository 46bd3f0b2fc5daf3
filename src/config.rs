//! Analysis configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or [`AnalysisConfig::default`])
//! reproduces the standard run: 30/15 minute buffers, a 07:00-19:00 workday
//! sampled every 15 minutes, 10 contracted sites and what-ifs at 9 and 8.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use qtty::{Minute, Quantity};
use serde::{Deserialize, Serialize};

use crate::algorithms::checked_capacity;
use crate::errors::{EngineError, Result};
use crate::grid::TimeGrid;
use crate::interval::Buffers;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Turnover minutes added before each interval.
    #[serde(default = "default_pre_buffer")]
    pub pre_buffer_minutes: f64,
    /// Turnover minutes added after each interval.
    #[serde(default = "default_post_buffer")]
    pub post_buffer_minutes: f64,

    #[serde(default = "default_workday_start")]
    pub workday_start_hour: u32,
    #[serde(default = "default_workday_end")]
    pub workday_end_hour: u32,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,

    /// Sites under contract; days needing at least this many are flagged.
    #[serde(default = "default_contract_sites")]
    pub contract_sites: i64,
    /// Capacities evaluated by the what-if assignment.
    #[serde(default = "default_whatif_capacities")]
    pub whatif_capacities: Vec<i64>,
    /// Judge what-if conflicts on buffered intervals.
    #[serde(default = "default_true")]
    pub whatif_buffered: bool,

    #[serde(default = "default_samples_per_day")]
    pub samples_per_day: usize,
    #[serde(default = "default_sample_limit")]
    pub sample_limit: usize,

    /// Weekdays treated as non-operating.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
    /// Interval categories dropped before analysis.
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

fn default_pre_buffer() -> f64 {
    30.0
}

fn default_post_buffer() -> f64 {
    15.0
}

fn default_workday_start() -> u32 {
    7
}

fn default_workday_end() -> u32 {
    19
}

fn default_slot_minutes() -> u32 {
    15
}

fn default_contract_sites() -> i64 {
    10
}

fn default_whatif_capacities() -> Vec<i64> {
    vec![9, 8]
}

fn default_true() -> bool {
    true
}

fn default_samples_per_day() -> usize {
    3
}

fn default_sample_limit() -> usize {
    20
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pre_buffer_minutes: default_pre_buffer(),
            post_buffer_minutes: default_post_buffer(),
            workday_start_hour: default_workday_start(),
            workday_end_hour: default_workday_end(),
            slot_minutes: default_slot_minutes(),
            contract_sites: default_contract_sites(),
            whatif_capacities: default_whatif_capacities(),
            whatif_buffered: default_true(),
            samples_per_day: default_samples_per_day(),
            sample_limit: default_sample_limit(),
            holidays: Vec::new(),
            excluded_categories: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            EngineError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field that has a typed counterpart.
    pub fn validate(&self) -> Result<()> {
        self.buffers()?;
        self.grid()?;
        checked_capacity(self.contract_sites)?;
        self.capacities()?;
        Ok(())
    }

    pub fn buffers(&self) -> Result<Buffers> {
        Buffers::from_minutes(self.pre_buffer_minutes, self.post_buffer_minutes)
    }

    /// Buffers the what-if pass judges conflicts with.
    pub fn whatif_buffers(&self) -> Result<Buffers> {
        if self.whatif_buffered {
            self.buffers()
        } else {
            Ok(Buffers::none())
        }
    }

    pub fn grid(&self) -> Result<TimeGrid> {
        TimeGrid::new(
            self.workday_start_hour,
            self.workday_end_hour,
            Quantity::<Minute>::new(self.slot_minutes as f64),
        )
    }

    /// What-if capacities as slot counts, in configured order.
    pub fn capacities(&self) -> Result<Vec<usize>> {
        self.whatif_capacities
            .iter()
            .map(|&k| checked_capacity(k))
            .collect()
    }

    /// Site-minutes available in one workday: contract sites x window.
    pub fn capacity_minutes(&self) -> Result<Quantity<Minute>> {
        let sites = checked_capacity(self.contract_sites)?;
        Ok(self.grid()?.window_minutes() * sites as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.whatif_capacities, vec![9, 8]);
        assert_eq!(config.grid().unwrap().len(), 48);
        assert_eq!(config.capacity_minutes().unwrap().value(), 7200.0);
    }

    #[test]
    fn overrides_are_applied() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            pre_buffer_minutes = 20.0
            post_buffer_minutes = 10.5
            contract_sites = 6
            whatif_capacities = [5]
            whatif_buffered = false
            holidays = ["2025-12-25"]
            excluded_categories = ["CLINIC"]
            "#,
        )
        .unwrap();
        assert_eq!(config.buffers().unwrap().pre().value(), 20.0);
        assert_eq!(config.buffers().unwrap().post().value(), 10.5);
        assert_eq!(config.capacities().unwrap(), vec![5]);
        assert!(config.whatif_buffers().unwrap().is_none());
        assert_eq!(
            config.holidays,
            vec![NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()]
        );
        assert_eq!(config.excluded_categories, vec!["CLINIC".to_string()]);
    }

    #[test]
    fn non_positive_capacity_is_rejected() {
        let err = AnalysisConfig::from_toml_str("whatif_capacities = [9, 0]").unwrap_err();
        assert_eq!(err, EngineError::InvalidCapacity(0));

        let err = AnalysisConfig::from_toml_str("contract_sites = -1").unwrap_err();
        assert_eq!(err, EngineError::InvalidCapacity(-1));
    }

    #[test]
    fn bad_grid_is_rejected() {
        let err = AnalysisConfig::from_toml_str("workday_start_hour = 19\nworkday_end_hour = 7")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidGrid(_)));
    }

    #[test]
    fn negative_buffer_is_rejected() {
        let err = AnalysisConfig::from_toml_str("pre_buffer_minutes = -5").unwrap_err();
        assert!(matches!(err, EngineError::InvalidBuffer { which: "pre", .. }));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = AnalysisConfig::from_toml_str("contract_sites = \"ten\"").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = AnalysisConfig::from_file("/nonexistent/sitecap.toml").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
