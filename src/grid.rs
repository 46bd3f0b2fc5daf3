//! Fixed time-of-day grid the concurrency heatmap is sampled on.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use qtty::{Minute, Quantity};

use crate::errors::{EngineError, Result};
use crate::units::{convert, SameDim};

/// Ordered slot instants `start_hour:00, +width, ...` strictly before
/// `end_hour:00`.
///
/// The grid is static configuration shared by every day analysed; a slot is
/// turned into an instant on a given day with [`TimeGrid::instants`].
///
/// # Example
///
/// ```
/// use qtty::{Minute, Quantity};
/// use sitecap::grid::TimeGrid;
///
/// let grid = TimeGrid::new(7, 19, Quantity::<Minute>::new(15.0)).unwrap();
/// assert_eq!(grid.len(), 48);
/// assert_eq!(grid.label(0), Some("07:00".to_string()));
/// assert_eq!(grid.label(47), Some("18:45".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    start_hour: u32,
    end_hour: u32,
    slot_width: Quantity<Minute>,
    slots: Vec<NaiveTime>,
}

impl TimeGrid {
    /// Creates the grid for window `[start_hour, end_hour)`.
    ///
    /// Requires `start_hour < end_hour <= 24` and a slot width that is a whole,
    /// positive number of minutes no longer than the window.
    pub fn new<U: SameDim<Minute>>(
        start_hour: u32,
        end_hour: u32,
        slot_width: Quantity<U>,
    ) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(EngineError::InvalidGrid(format!(
                "window {}:00-{}:00 must satisfy start < end <= 24",
                start_hour, end_hour
            )));
        }

        let slot_width: Quantity<Minute> = convert(slot_width);
        let width = slot_width.value();
        let window = (end_hour - start_hour) * 60;
        if !width.is_finite() || width < 1.0 || (width - width.round()).abs() > 1e-9 {
            return Err(EngineError::InvalidGrid(format!(
                "slot width must be a whole number of minutes >= 1, got {}",
                width
            )));
        }
        let step = width.round() as u32;
        if step > window {
            return Err(EngineError::InvalidGrid(format!(
                "slot width {} min exceeds the {} min window",
                step, window
            )));
        }

        let slots = (0..window)
            .step_by(step as usize)
            .filter_map(|offset| {
                let minutes = start_hour * 60 + offset;
                NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
            })
            .collect();

        Ok(Self {
            start_hour,
            end_hour,
            slot_width,
            slots,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn slot_width(&self) -> Quantity<Minute> {
        self.slot_width
    }

    /// Length of the daily window.
    pub fn window_minutes(&self) -> Quantity<Minute> {
        Quantity::new(((self.end_hour - self.start_hour) * 60) as f64)
    }

    pub fn slots(&self) -> &[NaiveTime] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `HH:MM` label of slot `index`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.slots.get(index).map(|t| t.format("%H:%M").to_string())
    }

    /// The grid's slot instants on `day`, in order.
    pub fn instants(&self, day: NaiveDate) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.slots.iter().map(move |t| day.and_time(*t))
    }
}

impl Default for TimeGrid {
    /// 07:00 to 19:00 in 15-minute slots.
    fn default() -> Self {
        let slots = (0..48u32)
            .filter_map(|i| {
                let minutes = 7 * 60 + i * 15;
                NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
            })
            .collect();
        Self {
            start_hour: 7,
            end_hour: 19,
            slot_width: Quantity::new(15.0),
            slots,
        }
    }
}
