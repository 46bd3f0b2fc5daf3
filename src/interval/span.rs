use chrono::NaiveDateTime;

/// Anything with half-open bounds `[start, end)` the sweep algorithms can
/// consume: raw intervals and their buffered views alike.
///
/// Implementors must keep `end > start`. [`Interval`](super::Interval)
/// enforces this at construction and buffering only widens it. The sweeps
/// do not panic on a span that breaks it, but the counts they return for
/// such input are unspecified.
pub trait Span {
    fn start(&self) -> NaiveDateTime;

    fn end(&self) -> NaiveDateTime;

    /// Returns true if `start <= t < end`.
    fn is_open_at(&self, t: NaiveDateTime) -> bool {
        self.start() <= t && t < self.end()
    }
}

impl<S: Span + ?Sized> Span for &S {
    fn start(&self) -> NaiveDateTime {
        (**self).start()
    }

    fn end(&self) -> NaiveDateTime {
        (**self).end()
    }
}
