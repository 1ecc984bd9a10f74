//! Escalating-tolerance binary search over proxy keys.
//!
//! Two layers: [`fuzzy_binary_search`] is a pure search for a key inside a
//! fixed tolerance band, and [`find_anchor_by`] drives it with a tolerance
//! that starts at [`TOLERANCE_START`] and grows by [`TOLERANCE_STEP`] until
//! some element qualifies. The caller's window width never feeds the
//! tolerance.

use tracing::debug;

use crate::distance::ProxyKey;
use crate::error::{Result, SearchError};
use crate::sequence::Sequence;

/// Tolerance used on the first search attempt.
pub const TOLERANCE_START: u64 = 0;

/// Amount added to the tolerance after each failed attempt.
pub const TOLERANCE_STEP: u64 = 5;

/// Result of an anchor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Position in the sorted container.
    pub index: usize,
    /// Tolerance of the attempt that produced the hit.
    pub tolerance: u64,
}

/// Whether `key` lies strictly within `tolerance` of `query_key`, or equals it.
pub fn within_tolerance(key: i64, query_key: i64, tolerance: u64) -> bool {
    let diff = (i128::from(key) - i128::from(query_key)).unsigned_abs();
    // a saturated tolerance accepts everything so escalation always ends
    diff == 0 || diff < u128::from(tolerance) || tolerance == u64::MAX
}

/// Binary search for any element whose key is within `tolerance` of
/// `query_key`. `items` must be ordered by `key_of`.
///
/// Returns `None` when the range is exhausted without a hit.
pub fn fuzzy_binary_search<T, K>(
    items: &[T],
    key_of: &K,
    query_key: i64,
    tolerance: u64,
) -> Option<usize>
where
    K: Fn(&T) -> i64,
{
    search_range(items, key_of, 0, items.len(), query_key, tolerance)
}

fn search_range<T, K>(
    items: &[T],
    key_of: &K,
    bot: usize,
    end: usize,
    query_key: i64,
    tolerance: u64,
) -> Option<usize>
where
    K: Fn(&T) -> i64,
{
    if bot >= end {
        return None;
    }
    let mid = bot + (end - 1 - bot) / 2;
    let mid_key = key_of(&items[mid]);

    if within_tolerance(mid_key, query_key, tolerance) {
        Some(mid)
    } else if query_key > mid_key {
        search_range(items, key_of, mid + 1, end, query_key, tolerance)
    } else {
        search_range(items, key_of, bot, mid, query_key, tolerance)
    }
}

/// Locate an anchor for `query_key` in a sorted container, escalating the
/// tolerance until the search succeeds.
///
/// Fails with `EmptyContainer` on an empty container and `NotSorted` when the
/// sortedness flag is cleared.
pub fn find_anchor_by<T, K>(seq: &Sequence<T>, query_key: i64, key_of: K) -> Result<Anchor>
where
    K: Fn(&T) -> i64,
{
    if seq.is_empty() {
        return Err(SearchError::EmptyContainer);
    }
    if !seq.is_sorted() {
        return Err(SearchError::NotSorted);
    }

    let mut tolerance = TOLERANCE_START;
    loop {
        if let Some(index) = fuzzy_binary_search(seq.as_slice(), &key_of, query_key, tolerance) {
            if tolerance > TOLERANCE_START {
                debug!(query_key, tolerance, index, "anchor found after escalation");
            }
            return Ok(Anchor { index, tolerance });
        }
        tolerance = tolerance.saturating_add(TOLERANCE_STEP);
    }
}

/// [`find_anchor_by`] using the element's own proxy key.
pub fn find_anchor<T: ProxyKey>(seq: &Sequence<T>, query: &T) -> Result<Anchor> {
    find_anchor_by(seq, query.proxy_key(), T::proxy_key)
}
