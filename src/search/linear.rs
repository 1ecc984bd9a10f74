//! Serial exhaustive scan.

use std::ops::Range;

use crate::distance::Metric;
use crate::error::{Result, SearchError};

use super::Neighbor;

/// Nearest element to `query` within `range`, first found wins on ties.
/// An empty range yields `None`.
pub fn scan_range<T, M>(items: &[T], range: Range<usize>, query: &T, metric: &M) -> Result<Option<Neighbor>>
where
    M: Metric<T> + ?Sized,
{
    let mut best: Option<Neighbor> = None;
    for i in range {
        let distance = metric.distance(&items[i], query)?;
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Neighbor { index: i, distance });
        }
    }
    Ok(best)
}

/// Nearest element to `query` over the whole container.
pub fn find_closest_linear<T, M>(items: &[T], query: &T, metric: &M) -> Result<Neighbor>
where
    M: Metric<T> + ?Sized,
{
    scan_range(items, 0..items.len(), query, metric)?.ok_or(SearchError::EmptyContainer)
}
