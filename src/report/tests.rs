use super::*;
use crate::errors::EngineError;
use chrono::{NaiveDate, NaiveTime};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
}

fn iv(d: u32, s: (u32, u32), e: (u32, u32), category: &str, tag: &str) -> Interval<String> {
    let start = date(d).and_hms_opt(s.0, s.1, 0).unwrap();
    let end = date(d).and_hms_opt(e.0, e.1, 0).unwrap();
    Interval::new(start, end, category, tag.to_string()).unwrap()
}

/// No buffers, two contracted sites, what-ifs at 1 and 2.
fn plain_config() -> AnalysisConfig {
    AnalysisConfig {
        pre_buffer_minutes: 0.0,
        post_buffer_minutes: 0.0,
        contract_sites: 2,
        whatif_capacities: vec![1, 2],
        ..AnalysisConfig::default()
    }
}

/// Sat 4th, Mon 6th (A/B/C), Tue 7th (holiday).
fn week() -> Vec<Interval<String>> {
    vec![
        iv(6, (10, 0), (11, 0), "OR", "C"),
        iv(4, (8, 0), (9, 0), "OR", "sat"),
        iv(6, (9, 0), (10, 0), "OR", "A"),
        iv(7, (9, 0), (9, 30), "GI", "hol"),
        iv(6, (9, 30), (10, 30), "OR", "B"),
    ]
}

mod daily {
    use super::*;

    #[test]
    fn days_are_in_date_order() {
        let report = analyze(week(), &plain_config()).unwrap();
        let dates: Vec<_> = report.daily.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(4), date(6), date(7)]);
    }

    #[test]
    fn monday_figures() {
        let mut config = plain_config();
        config.holidays = vec![date(7)];
        let report = analyze(week(), &config).unwrap();
        let monday = &report.daily[1];

        assert_eq!(monday.weekday, "Monday");
        assert!(monday.is_weekday && !monday.is_holiday);
        assert_eq!(monday.total_intervals, 3);
        assert_eq!(monday.first_start, date(6).and_hms_opt(9, 0, 0));
        assert_eq!(monday.last_end, date(6).and_hms_opt(11, 0, 0));
        assert_eq!(monday.min_sites_unbuffered, 2);
        assert_eq!(monday.min_sites_buffered, 2);
        assert_eq!(monday.committed_minutes, 180.0);
        // 2 sites x 12 h
        assert_eq!(monday.capacity_minutes, 1440.0);
        assert_eq!(monday.utilization_pct, 12.5);
        assert_eq!(monday.uncovered_at(1), Some(1));
        assert_eq!(monday.uncovered_at(2), Some(0));
        assert_eq!(monday.uncovered_at(3), None);

        let saturday = &report.daily[0];
        assert!(!saturday.is_weekday);
        assert!(report.daily[2].is_holiday);
    }

    #[test]
    fn buffers_raise_buffered_minimum_only() {
        let config = AnalysisConfig {
            whatif_capacities: vec![1],
            ..AnalysisConfig::default()
        };
        let intervals = vec![
            iv(6, (9, 0), (10, 0), "OR", "A"),
            iv(6, (10, 0), (11, 0), "OR", "C"),
        ];
        let report = analyze(intervals, &config).unwrap();
        let day = &report.daily[0];
        assert_eq!(day.min_sites_unbuffered, 1);
        assert_eq!(day.min_sites_buffered, 2);
        // What-ifs judge buffered views by default.
        assert_eq!(day.uncovered_at(1), Some(1));
    }

    #[test]
    fn unbuffered_whatif_when_configured() {
        let config = AnalysisConfig {
            whatif_capacities: vec![1],
            whatif_buffered: false,
            ..AnalysisConfig::default()
        };
        let intervals = vec![
            iv(6, (9, 0), (10, 0), "OR", "A"),
            iv(6, (10, 0), (11, 0), "OR", "C"),
        ];
        let report = analyze(intervals, &config).unwrap();
        assert_eq!(report.daily[0].uncovered_at(1), Some(0));
    }
}

mod what_if {
    use super::*;

    #[test]
    fn single_site_leaves_b_uncovered() {
        let report = analyze(week(), &plain_config()).unwrap();
        let one = &report.what_if[0];
        assert_eq!(one.capacity, 1);
        assert_eq!(one.total_uncovered, 1);
        assert_eq!(one.days_affected, 1);
        assert_eq!(one.samples.len(), 1);
        assert_eq!(one.samples[0].detail, "B");
        assert_eq!(one.samples[0].date, date(6));
        assert_eq!(one.samples[0].category, "OR");

        let two = &report.what_if[1];
        assert_eq!(two.total_uncovered, 0);
        assert!(two.samples.is_empty());
    }

    #[test]
    fn samples_are_capped_per_day_and_overall() {
        // Five identical cases on each of seven weekdays, one site: four
        // uncovered per day.
        let days = [6, 7, 8, 9, 10, 13, 14];
        let intervals: Vec<_> = days
            .iter()
            .flat_map(|&d| (0..5).map(move |n| iv(d, (9, 0), (10, 0), "OR", &n.to_string())))
            .collect();
        let config = AnalysisConfig {
            whatif_capacities: vec![1],
            ..plain_config()
        };
        let report = analyze(intervals, &config).unwrap();
        let one = &report.what_if[0];

        assert_eq!(one.total_uncovered, 28);
        assert_eq!(one.days_affected, 7);
        assert_eq!(one.samples.len(), 20);
        assert_eq!(one.samples[0].date, date(6));
        assert_eq!(one.samples.iter().filter(|s| s.date == date(6)).count(), 3);
        assert_eq!(one.samples.iter().filter(|s| s.date == date(14)).count(), 2);
        // Canonical order within a day keeps input order for ties.
        let first_day: Vec<_> = one.samples[..3].iter().map(|s| s.detail.as_str()).collect();
        assert_eq!(first_day, vec!["1", "2", "3"]);
    }
}

mod summary {
    use super::*;

    #[test]
    fn only_operating_weekdays_count() {
        let mut config = plain_config();
        config.holidays = vec![date(7)];
        let report = analyze(week(), &config).unwrap();
        let summary = &report.summary;

        assert_eq!(summary.operating_days, 1);
        assert_eq!(summary.avg_intervals_per_day, 3.0);
        assert_eq!(summary.avg_committed_minutes, 180.0);
        assert_eq!(summary.avg_min_sites, 2.0);
        assert_eq!(summary.max_min_sites, 2);
        assert_eq!(summary.days_at_or_over_contract, 1);
        assert_eq!(summary.avg_peak_concurrency, 2.0);
        assert_eq!(
            summary.uncovered_totals,
            vec![
                UncoveredCount { capacity: 1, count: 1 },
                UncoveredCount { capacity: 2, count: 0 }
            ]
        );
    }

    #[test]
    fn averages_round_to_one_decimal() {
        // Mon 1 case, Tue 2 cases, Wed 2 cases: 5 / 3 = 1.666..
        let intervals = vec![
            iv(6, (9, 0), (10, 0), "OR", "a"),
            iv(7, (9, 0), (10, 0), "OR", "b"),
            iv(7, (11, 0), (12, 0), "OR", "c"),
            iv(8, (9, 0), (10, 0), "OR", "d"),
            iv(8, (13, 0), (14, 0), "OR", "e"),
        ];
        let report = analyze(intervals, &plain_config()).unwrap();
        assert_eq!(report.summary.operating_days, 3);
        assert_eq!(report.summary.avg_intervals_per_day, 1.7);
        assert_eq!(report.summary.avg_committed_minutes, 100.0);
    }

    #[test]
    fn no_operating_days_yields_zeroes() {
        let intervals = vec![iv(4, (9, 0), (10, 0), "OR", "sat")];
        let report = analyze(intervals, &plain_config()).unwrap();
        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.summary.operating_days, 0);
        assert_eq!(report.summary.avg_min_sites, 0.0);
        assert_eq!(report.summary.max_min_sites, 0);
        assert!(report.heatmap.iter().all(|c| c.max == 0 && c.average == 0.0));
        assert!(report.monthly_heatmaps.is_empty());
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let report = analyze(Vec::<Interval<String>>::new(), &AnalysisConfig::default()).unwrap();
        assert!(report.daily.is_empty());
        assert_eq!(report.what_if.len(), 2);
        assert_eq!(report.heatmap.len(), 48);
    }
}

mod heatmaps {
    use super::*;

    fn cell(cells: &[HeatmapCell], h: u32, m: u32) -> &HeatmapCell {
        let t = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        cells.iter().find(|c| c.time == t).unwrap()
    }

    #[test]
    fn weekend_and_holidays_stay_out() {
        let mut config = plain_config();
        config.holidays = vec![date(7)];
        let report = analyze(week(), &config).unwrap();

        // Saturday's 08:00 case is not counted.
        assert_eq!(cell(&report.heatmap, 8, 0).max, 0);
        // Holiday 09:00 case is not counted; Monday has A only.
        assert_eq!(cell(&report.heatmap, 9, 0).max, 1);
        assert_eq!(cell(&report.heatmap, 9, 30).max, 2);
    }

    #[test]
    fn months_are_built_separately() {
        let intervals = vec![
            iv(30, (9, 0), (10, 0), "OR", "oct-a"),
            iv(30, (9, 0), (10, 0), "OR", "oct-b"),
            iv(31, (9, 0), (10, 0), "OR", "oct-c"),
            Interval::new(
                NaiveDate::from_ymd_opt(2025, 11, 3).unwrap().and_hms_opt(9, 0, 0).unwrap(),
                NaiveDate::from_ymd_opt(2025, 11, 3).unwrap().and_hms_opt(10, 0, 0).unwrap(),
                "OR",
                "nov".to_string(),
            )
            .unwrap(),
        ];
        let report = analyze(intervals, &plain_config()).unwrap();

        let months: Vec<_> = report.monthly_heatmaps.keys().cloned().collect();
        assert_eq!(months, vec!["2025-10", "2025-11"]);

        let october = cell(&report.monthly_heatmaps["2025-10"], 9, 0);
        assert_eq!(october.max, 2);
        assert_eq!(october.average, 1.5);

        let november = cell(&report.monthly_heatmaps["2025-11"], 9, 0);
        assert_eq!(november.max, 1);
        assert_eq!(november.average, 1.0);

        // (2 + 1 + 1) / 3
        assert_eq!(cell(&report.heatmap, 9, 0).average, 1.3);
    }
}

mod intake {
    use super::*;

    #[test]
    fn excluded_categories_are_dropped() {
        let mut config = plain_config();
        config.excluded_categories = vec!["GI".to_string()];
        let report = analyze(week(), &config).unwrap();
        let dates: Vec<_> = report.daily.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(4), date(6)]);
    }

    #[test]
    fn invalid_capacity_fails_up_front() {
        let config = AnalysisConfig {
            whatif_capacities: vec![9, 0],
            ..AnalysisConfig::default()
        };
        assert_eq!(
            analyze(week(), &config).unwrap_err(),
            EngineError::InvalidCapacity(0)
        );
    }
}

mod serialization {
    use super::*;

    #[test]
    fn reruns_serialize_identically() {
        let config = AnalysisConfig::default();
        let first = serde_json::to_string(&analyze(week(), &config).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze(week(), &config).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn field_names_are_camel_case() {
        let report = analyze(week(), &plain_config()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["daily"][0].get("minSitesBuffered").is_some());
        assert!(json["summary"].get("avgPeakConcurrency").is_some());
        assert!(json["whatIf"][0].get("totalUncovered").is_some());
        assert_eq!(json["monthlyHeatmaps"]["2025-10"][0]["time"], "07:00");
    }
}

#[cfg(not(feature = "parallel"))]
mod single_threaded {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn payload_need_not_be_send() {
        let at = |h, m| date(6).and_hms_opt(h, m, 0).unwrap();
        let intervals = vec![
            Interval::new(at(9, 0), at(10, 0), "OR", Rc::<str>::from("A")).unwrap(),
            Interval::new(at(9, 30), at(10, 30), "OR", Rc::<str>::from("B")).unwrap(),
        ];
        let config = AnalysisConfig {
            whatif_capacities: vec![1],
            ..plain_config()
        };
        let report = analyze(intervals, &config).unwrap();
        assert_eq!(&*report.what_if[0].samples[0].detail, "B");
    }
}
