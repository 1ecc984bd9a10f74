//! In-place partition-exchange sort over a caller-supplied comparator.

use crate::distance::Comparator;

/// Sort `items` so that `cmp.less(items[i + 1], items[i])` is false for every
/// adjacent pair. Not stable.
///
/// Each pass partitions around the last element of the range. The smaller
/// side is sorted recursively and the larger side is handled by the loop,
/// which keeps recursion depth logarithmic on already-sorted input.
pub fn quick_sort<T, C>(items: &mut [T], cmp: &C)
where
    C: Comparator<T> + ?Sized,
{
    let mut range = items;
    while range.len() > 1 {
        let pivot = partition(range, cmp);
        let (lower, upper) = std::mem::take(&mut range).split_at_mut(pivot);
        if lower.len() < upper.len() {
            quick_sort(lower, cmp);
            range = upper;
        } else {
            quick_sort(upper, cmp);
            range = lower;
        }
    }
}

/// Move every element not greater than the pivot (the last element) to the
/// front and return the pivot's final position.
///
/// The upper range `[pivot..]` starts at the pivot itself.
fn partition<T, C>(range: &mut [T], cmp: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    let last = range.len() - 1;
    let mut idx = 0;
    for i in 0..last {
        if !cmp.less(&range[last], &range[i]) {
            range.swap(i, idx);
            idx += 1;
        }
    }
    range.swap(last, idx);
    idx
}

/// Index `i` of the first adjacent pair where `items[i + 1]` orders before
/// `items[i]`, if any.
pub fn first_unsorted<T, C>(items: &[T], cmp: &C) -> Option<usize>
where
    C: Comparator<T> + ?Sized,
{
    items
        .windows(2)
        .position(|pair| cmp.less(&pair[1], &pair[0]))
}

pub fn is_sorted_by<T, C>(items: &[T], cmp: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    first_unsorted(items, cmp).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::ByProxyKey;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted(mut v: Vec<i64>) -> Vec<i64> {
        quick_sort(&mut v, &ByProxyKey);
        v
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(sorted(vec![]), Vec::<i64>::new());
        assert_eq!(sorted(vec![7]), vec![7]);
    }

    #[test]
    fn test_small() {
        assert_eq!(sorted(vec![5, 1]), vec![1, 5]);
        assert_eq!(sorted(vec![3, 1, 2]), vec![1, 2, 3]);
        assert_eq!(sorted(vec![1, 2, 3, 4]), vec![1, 2, 3, 4]);
        assert_eq!(sorted(vec![4, 3, 2, 1]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_duplicates_and_negatives() {
        assert_eq!(
            sorted(vec![2, -1, 2, 0, -1, 2, 5]),
            vec![-1, -1, 0, 2, 2, 2, 5]
        );
        assert_eq!(sorted(vec![9; 16]), vec![9; 16]);
    }

    #[test]
    fn test_large_presorted_input() {
        let input: Vec<i64> = (0..2_000).collect();
        let out = sorted(input.clone());
        assert_eq!(out, input);

        let reversed: Vec<i64> = (0..2_000).rev().collect();
        assert_eq!(sorted(reversed), input);
    }

    #[test]
    fn test_random_matches_std() {
        let mut rng = StdRng::seed_from_u64(7);
        for len in [2usize, 3, 10, 100, 1000] {
            let input: Vec<i64> = (0..len).map(|_| rng.gen_range(-50..50)).collect();
            let mut expected = input.clone();
            expected.sort();
            assert_eq!(sorted(input), expected);
        }
    }

    #[test]
    fn test_custom_comparator() {
        let mut v = vec![1i64, 5, 3];
        quick_sort(&mut v, &|a: &i64, b: &i64| a > b);
        assert_eq!(v, vec![5, 3, 1]);
    }

    #[test]
    fn test_first_unsorted() {
        assert_eq!(first_unsorted(&[1i64, 2, 2, 3], &ByProxyKey), None);
        assert_eq!(first_unsorted(&[1i64, 3, 2], &ByProxyKey), Some(1));
        assert!(is_sorted_by::<i64, _>(&[], &ByProxyKey));
    }
}
