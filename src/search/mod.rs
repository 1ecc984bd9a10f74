//! Nearest-candidate search over a [`Sequence`].
//!
//! - [`sort`]: in-place ordering by a caller-supplied comparator.
//! - [`anchor`]: escalating-tolerance binary search on the proxy key.
//! - [`refine`]: exhaustive true-distance scan inside a window around the anchor.
//! - [`linear`] and [`parallel`]: exhaustive scans that need no ordering.
//!
//! The proxy-key path is a heuristic. When the proxy key does not track the
//! true distance, the element it returns can be farther from the query than
//! the global nearest neighbor.

pub mod anchor;
pub mod linear;
pub mod parallel;
pub mod refine;
pub mod sort;

pub use anchor::{find_anchor, find_anchor_by, Anchor};
pub use linear::find_closest_linear;
pub use parallel::parallel_linear_search;

use crate::distance::{Metric, ProxyKey};
use crate::error::Result;
use crate::sequence::Sequence;

/// A search hit: position in the searched container and its true distance
/// to the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: u64,
}

/// Anchor search on the query's proxy key, then refinement over a window of
/// width `k` around the anchor.
pub fn find_closest_binary<T, M>(seq: &Sequence<T>, query: &T, k: usize, metric: &M) -> Result<Neighbor>
where
    T: ProxyKey,
    M: Metric<T> + ?Sized,
{
    let anchor = find_anchor(seq, query)?;
    refine::refine(seq.as_slice(), anchor.index, query, k, metric)
}
