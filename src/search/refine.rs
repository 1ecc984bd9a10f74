//! Bounded true-distance scan around an anchor.

use std::ops::RangeInclusive;

use crate::distance::Metric;
use crate::error::{Result, SearchError};

use super::Neighbor;

/// Index range `[anchor - k/2, anchor + k/2]` clamped to `[0, len - 1]`.
///
/// `len` must be non-zero and `anchor < len`.
pub fn window(anchor: usize, k: usize, len: usize) -> RangeInclusive<usize> {
    let half = k / 2;
    let lo = anchor.saturating_sub(half);
    let hi = anchor.saturating_add(half).min(len - 1);
    lo..=hi
}

/// Element minimizing true distance to `query` within the window of width
/// `k` around `anchor`.
///
/// The anchor's own distance seeds the best answer and only a strictly
/// smaller distance replaces it, so the anchor wins ties and otherwise the
/// lowest index wins. Nothing outside the window is evaluated.
pub fn refine<T, M>(
    items: &[T],
    anchor: usize,
    query: &T,
    k: usize,
    metric: &M,
) -> Result<Neighbor>
where
    M: Metric<T> + ?Sized,
{
    if items.is_empty() {
        return Err(SearchError::EmptyContainer);
    }
    if anchor >= items.len() {
        return Err(SearchError::OutOfRange {
            index: anchor,
            len: items.len(),
        });
    }

    let mut best = Neighbor {
        index: anchor,
        distance: metric.distance(&items[anchor], query)?,
    };
    for i in window(anchor, k, items.len()) {
        let distance = metric.distance(&items[i], query)?;
        if distance < best.distance {
            best = Neighbor { index: i, distance };
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::abs_distance;
    use std::cell::RefCell;

    #[test]
    fn test_window_clamping() {
        assert_eq!(window(5, 4, 10), 3..=7);
        assert_eq!(window(1, 6, 10), 0..=4);
        assert_eq!(window(8, 6, 10), 5..=9);
        assert_eq!(window(3, 1000, 7), 0..=6);
    }

    #[test]
    fn test_window_degenerate_widths() {
        assert_eq!(window(4, 0, 10), 4..=4);
        assert_eq!(window(4, 1, 10), 4..=4);
        assert_eq!(window(4, 3, 10), 3..=5);
    }

    #[test]
    fn test_picks_best_in_window() {
        let items = [0i64, 10, 20, 30, 40, 50];
        let best = refine(&items, 2, &31, 4, &abs_distance).unwrap();
        assert_eq!(best, Neighbor { index: 3, distance: 1 });
    }

    #[test]
    fn test_never_looks_outside_window() {
        let items = [100i64, 0, 0, 0, 100];
        // the exact match at index 0 is outside [1, 3]
        let best = refine(&items, 2, &100, 2, &abs_distance).unwrap();
        assert!((1..=3).contains(&best.index));
        assert_eq!(best.distance, 100);

        let seen = RefCell::new(Vec::new());
        let tracking = |a: &i64, b: &i64| {
            seen.borrow_mut().push(*a);
            a.abs_diff(*b)
        };
        let items = [1i64, 2, 3, 4, 5, 6, 7];
        refine(&items, 3, &4, 2, &tracking).unwrap();
        let visited = seen.into_inner();
        assert!(visited.iter().all(|v| (3..=5).contains(v)));
    }

    #[test]
    fn test_anchor_wins_ties() {
        let items = [9i64, 11, 9];
        let best = refine(&items, 2, &10, 4, &abs_distance).unwrap();
        assert_eq!(best.index, 2);

        let items = [9i64, 12, 9];
        let best = refine(&items, 1, &10, 4, &abs_distance).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_errors() {
        let empty: [i64; 0] = [];
        assert!(refine(&empty, 0, &1, 4, &abs_distance)
            .unwrap_err()
            .is_out_of_range());
        assert!(matches!(
            refine(&[1i64, 2], 2, &1, 4, &abs_distance),
            Err(SearchError::OutOfRange { index: 2, len: 2 })
        ));
    }
}
