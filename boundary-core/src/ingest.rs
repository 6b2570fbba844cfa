//! Point extraction from source records.

use log::debug;

use crate::{PointSet, SourceAccessError, SourceGeometry, SourceRecord};

/// Counts gathered while ingesting one dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IngestSummary {
    /// Records read from the dataset.
    pub records: u64,
    /// Points appended to the point set.
    pub points: u64,
    /// Records contributing no point (other geometry types, or none).
    pub skipped: u64,
}

impl IngestSummary {
    fn record_points(&mut self, count: usize) {
        self.records += 1;
        self.points += u64::try_from(count).unwrap_or(u64::MAX);
    }

    fn record_skip(&mut self) {
        self.records += 1;
        self.skipped += 1;
    }
}

/// Append the points of every record to `points`.
///
/// Points are appended as records arrive, so a decoding failure part way
/// through leaves the points read before it in place.
///
/// # Errors
///
/// Returns the first [`SourceAccessError`] yielded by `records`.
pub fn ingest_records<I>(
    points: &mut PointSet,
    records: I,
) -> Result<IngestSummary, SourceAccessError>
where
    I: IntoIterator<Item = Result<SourceRecord, SourceAccessError>>,
{
    let mut summary = IngestSummary::default();
    for record in records {
        match record?.geometry {
            Some(SourceGeometry::Point(point)) => {
                points.push(point);
                summary.record_points(1);
            }
            Some(SourceGeometry::MultiPoint(members)) => {
                let count = members.len();
                points.extend(members);
                summary.record_points(count);
            }
            Some(SourceGeometry::Other(kind)) => {
                debug!("skipping {kind} geometry");
                summary.record_skip();
            }
            None => {
                debug!("skipping record without geometry");
                summary.record_skip();
            }
        }
    }
    Ok(summary)
}
