//! Setup/teardown padding applied before overlap is evaluated.

use chrono::{Duration, NaiveDateTime};
use qtty::{Minute, Quantity};

use super::interval::Interval;
use super::span::Span;
use crate::errors::{EngineError, Result};
use crate::units::{convert, to_duration, SameDim};

/// Longest padding accepted on either side of an interval.
const MAX_BUFFER_MINUTES: f64 = 24.0 * 60.0;

/// Pre/post padding, constant across all intervals of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buffers {
    pre: Quantity<Minute>,
    post: Quantity<Minute>,
}

impl Buffers {
    /// Creates buffers from any time unit.
    ///
    /// Both sides must be finite, non-negative and at most one day.
    pub fn new<U: SameDim<Minute>>(pre: Quantity<U>, post: Quantity<U>) -> Result<Self> {
        let pre: Quantity<Minute> = convert(pre);
        let post: Quantity<Minute> = convert(post);
        Self::check("pre", pre)?;
        Self::check("post", post)?;
        Ok(Self { pre, post })
    }

    pub fn from_minutes(pre: f64, post: f64) -> Result<Self> {
        Self::new(Quantity::<Minute>::new(pre), Quantity::<Minute>::new(post))
    }

    /// No padding: buffered views coincide with the raw intervals.
    pub const fn none() -> Self {
        Self {
            pre: Quantity::new(0.0),
            post: Quantity::new(0.0),
        }
    }

    fn check(which: &'static str, q: Quantity<Minute>) -> Result<()> {
        let minutes = q.value();
        if !minutes.is_finite() || minutes < 0.0 || minutes > MAX_BUFFER_MINUTES {
            return Err(EngineError::InvalidBuffer { which, minutes });
        }
        Ok(())
    }

    pub fn pre(&self) -> Quantity<Minute> {
        self.pre
    }

    pub fn post(&self) -> Quantity<Minute> {
        self.post
    }

    pub fn is_none(&self) -> bool {
        self.pre.value() == 0.0 && self.post.value() == 0.0
    }

    pub fn pre_duration(&self) -> Duration {
        to_duration(self.pre)
    }

    pub fn post_duration(&self) -> Duration {
        to_duration(self.post)
    }

    /// Pads a single interval.
    pub fn apply<'a, D>(&self, interval: &'a Interval<D>) -> BufferedInterval<'a, D> {
        BufferedInterval {
            start: interval.start() - self.pre_duration(),
            end: interval.end() + self.post_duration(),
            interval,
        }
    }

    /// Pads every interval of a slice, preserving order.
    pub fn apply_all<'a, D>(&self, intervals: &'a [Interval<D>]) -> Vec<BufferedInterval<'a, D>> {
        let pre = self.pre_duration();
        let post = self.post_duration();
        intervals
            .iter()
            .map(|interval| BufferedInterval {
                start: interval.start() - pre,
                end: interval.end() + post,
                interval,
            })
            .collect()
    }
}

impl Default for Buffers {
    fn default() -> Self {
        Self::none()
    }
}

/// Ephemeral padded view of an [`Interval`]; never stored beyond one pass.
///
/// Buffered bounds may cross midnight; only the raw interval is bound to
/// its day.
#[derive(Debug)]
pub struct BufferedInterval<'a, D> {
    interval: &'a Interval<D>,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl<'a, D> BufferedInterval<'a, D> {
    /// The raw interval this view pads.
    pub fn interval(&self) -> &'a Interval<D> {
        self.interval
    }
}

impl<D> Clone for BufferedInterval<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for BufferedInterval<'_, D> {}

impl<D> Span for BufferedInterval<'_, D> {
    fn start(&self) -> NaiveDateTime {
        self.start
    }

    fn end(&self) -> NaiveDateTime {
        self.end
    }
}
