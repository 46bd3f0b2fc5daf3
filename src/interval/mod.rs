//! Intervals, their buffered views, and the [`Span`] seam the algorithms
//! sweep over.

mod buffer;
#[allow(clippy::module_inception)]
mod interval;
mod span;

pub use buffer::{BufferedInterval, Buffers};
pub use interval::Interval;
pub use span::Span;
