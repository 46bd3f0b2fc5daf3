//! The three sweep algorithms.
//!
//! All of them are pure functions over borrowed, immutable input: nothing is
//! cached between calls and nothing is shared between invocations, so
//! different days or different capacities can be evaluated concurrently.
//!
//! - [`partition`] - minimum number of concurrent slots (interval partitioning)
//! - [`heatmap`] - per-slot occupancy across a set of days
//! - [`capacity`] - greedy assignment under a fixed slot cap
//! - [`ordering`] - canonical processing order shared by the sweeps

pub mod capacity;
pub mod heatmap;
pub mod ordering;
pub mod partition;


pub use capacity::{assign_spans, assign_with_capacity, checked_capacity, Assignment, UncoveredInterval};
pub use heatmap::{aggregate_occupancy, build_heatmap, day_occupancy, HeatmapCell, SlotOccupancy};
pub use ordering::canonical_order;
pub use partition::{max_overlap, minimum_slots, minimum_slots_for_day, partition, MinimumSlots, Partition};

/// Rounds to one decimal place, exact halves to even.
///
/// Decided on the exact value of `value * 10`: `0.25` gives `0.2`, while
/// `0.15` (stored just below the half) gives `0.1`.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    // Error of the rounded product; its sign breaks ties the product
    // landed on by rounding.
    let residue = value.mul_add(10.0, -scaled);
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 && residue != 0.0 {
        if residue > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / 10.0
}
