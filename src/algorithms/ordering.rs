//! Canonical processing order shared by the partitioner and the assigner.

use crate::interval::Span;
use std::cmp::Ordering;

/// Earlier start first; for equal starts the shorter span goes first.
pub fn compare_canonical<S: Span>(a: &S, b: &S) -> Ordering {
    a.start()
        .cmp(&b.start())
        .then_with(|| a.end().cmp(&b.end()))
}

/// Input positions of `spans` in canonical order.
///
/// The sort is stable, so spans with identical bounds keep their input
/// order and the result never depends on anything but the input sequence.
pub fn canonical_order<S: Span>(spans: &[S]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..spans.len()).collect();
    order.sort_by(|&a, &b| compare_canonical(&spans[a], &spans[b]));
    order
}
