//! Demonstration of a batch site-capacity analysis.
//!
//! Run with `RUST_LOG=debug` to see per-day figures.

use chrono::{NaiveDate, NaiveDateTime};
use sitecap::intake::{collect_intervals, RecordMapper};
use sitecap::{analyze, AnalysisConfig, EngineError, Interval};

/// A row as it might come out of a case export.
struct CaseRow {
    case_id: u32,
    room: &'static str,
    in_room: Option<NaiveDateTime>,
    out_room: Option<NaiveDateTime>,
}

/// Keeps cases with both timestamps; clinic visits are out of scope.
struct CaseMapper;

impl RecordMapper for CaseMapper {
    type Record = CaseRow;
    type Detail = u32;

    fn map(&self, row: &CaseRow) -> sitecap::Result<Option<Interval<u32>>> {
        if row.room == "CLINIC" {
            return Ok(None);
        }
        Interval::from_parts(row.in_room, row.out_room, row.room, row.case_id).map(Some)
    }
}

fn at(day: u32, h: u32, m: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2025, 10, day).and_then(|d| d.and_hms_opt(h, m, 0))
}

fn case(case_id: u32, room: &'static str, day: u32, from: (u32, u32), to: (u32, u32)) -> CaseRow {
    CaseRow {
        case_id,
        room,
        in_room: at(day, from.0, from.1),
        out_room: at(day, to.0, to.1),
    }
}

fn main() -> Result<(), EngineError> {
    env_logger::init();

    let rows = vec![
        case(1, "OR", 6, (9, 0), (10, 0)),
        case(2, "OR", 6, (9, 30), (10, 30)),
        case(3, "GI", 6, (10, 0), (11, 0)),
        case(4, "CLINIC", 6, (10, 0), (10, 20)),
        case(5, "OR", 7, (7, 30), (9, 15)),
        case(6, "GI", 7, (8, 0), (8, 45)),
        case(7, "GI", 7, (8, 15), (9, 0)),
        case(8, "OR", 7, (13, 0), (15, 30)),
        case(9, "OR", 11, (9, 0), (10, 0)),
    ];

    let intervals = collect_intervals(&rows, &CaseMapper)?;
    println!("{} cases in scope", intervals.len());

    let config = AnalysisConfig::from_toml_str(
        r#"
        contract_sites = 3
        whatif_capacities = [2, 1]
        "#,
    )?;
    let report = analyze(intervals, &config)?;

    println!("\n=== Daily ===");
    for day in &report.daily {
        let span = match (day.first_start, day.last_end) {
            (Some(first), Some(last)) => format!("{}-{}", first.format("%H:%M"), last.format("%H:%M")),
            _ => "-".to_string(),
        };
        println!(
            "{} {:<9} {} cases={} min sites={} (buffered {}) utilization={:.1}%",
            day.date,
            day.weekday,
            span,
            day.total_intervals,
            day.min_sites_unbuffered,
            day.min_sites_buffered,
            day.utilization_pct
        );
    }

    println!("\n=== What-if ===");
    for what_if in &report.what_if {
        println!(
            "{} sites: {} uncovered over {} days",
            what_if.capacity, what_if.total_uncovered, what_if.days_affected
        );
        for sample in &what_if.samples {
            println!(
                "  case {} ({}) {} - {}",
                sample.detail,
                sample.category,
                sample.start,
                sample.end.time()
            );
        }
    }

    let summary = &report.summary;
    println!("\n=== Summary ===");
    println!("Operating weekdays: {}", summary.operating_days);
    println!("Avg min sites:      {:.1}", summary.avg_min_sites);
    println!("Max min sites:      {}", summary.max_min_sites);
    println!("Avg peak overlap:   {:.1}", summary.avg_peak_concurrency);

    println!("\n=== Busiest slots ===");
    let mut cells: Vec<_> = report.heatmap.iter().filter(|c| c.max_buffered > 0).collect();
    cells.sort_by(|a, b| b.max_buffered.cmp(&a.max_buffered).then(a.time.cmp(&b.time)));
    for cell in cells.iter().take(5) {
        println!(
            "{}  avg {:.1} (buffered {:.1}) max {} (buffered {})",
            cell.time.format("%H:%M"),
            cell.average,
            cell.average_buffered,
            cell.max,
            cell.max_buffered
        );
    }

    Ok(())
}
