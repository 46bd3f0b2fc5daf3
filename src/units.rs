//! Unit handling for durations.
//!
//! Buffers, slot widths and committed time are carried as `qtty` quantities so
//! callers can state them in whichever time unit is natural (minutes, hours),
//! while timestamps stay on `chrono`'s calendar types. This module is the
//! bridge between the two.

use chrono::Duration;
use qtty::{Minute, Quantity, Unit};

/// Marker trait for units that share the same physical dimension.
///
/// Automatically implemented for any pair of units where `From::Dim == To::Dim`,
/// so `Hour: SameDim<Minute>` holds while `Meter: SameDim<Minute>` does not.
pub trait SameDim<To: Unit>: Unit<Dim = To::Dim> {}

impl<From, To> SameDim<To> for From
where
    From: Unit,
    To: Unit<Dim = From::Dim>,
{
}

/// Converts a quantity from one unit to another unit of the same dimension.
#[inline]
pub const fn convert<From, To>(q: Quantity<From>) -> Quantity<To>
where
    From: SameDim<To>,
    To: Unit,
{
    q.to_const::<To>()
}

/// Converts any time quantity to a `chrono::Duration`, rounded to the second.
pub fn to_duration<U: SameDim<Minute>>(q: Quantity<U>) -> Duration {
    let minutes: Quantity<Minute> = convert(q);
    Duration::seconds((minutes.value() * 60.0).round() as i64)
}

/// Converts a `chrono::Duration` into minutes.
pub fn minutes_of(d: Duration) -> Quantity<Minute> {
    Quantity::new(d.num_seconds() as f64 / 60.0)
}
