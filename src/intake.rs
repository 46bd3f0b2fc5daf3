//! Turning upstream records into validated intervals.
//!
//! Where records come from (a CSV export, a database query, ...) is not this
//! crate's concern. A [`RecordMapper`] decides, per record, whether it is in
//! scope and, if so, which interval it describes.

use crate::errors::Result;
use crate::interval::Interval;

/// Maps one upstream record to an interval.
pub trait RecordMapper {
    /// Raw record type.
    type Record;
    /// Payload carried by the produced intervals.
    type Detail;

    /// `Ok(None)` excludes the record; `Err` rejects the whole batch.
    fn map(&self, record: &Self::Record) -> Result<Option<Interval<Self::Detail>>>;
}

/// Collects every in-scope interval from `records`.
///
/// Stops at the first record the mapper rejects.
pub fn collect_intervals<'r, M>(
    records: impl IntoIterator<Item = &'r M::Record>,
    mapper: &M,
) -> Result<Vec<Interval<M::Detail>>>
where
    M: RecordMapper,
    M::Record: 'r,
{
    let mut intervals = Vec::new();
    for record in records {
        if let Some(interval) = mapper.map(record)? {
            intervals.push(interval);
        }
    }
    Ok(intervals)
}
