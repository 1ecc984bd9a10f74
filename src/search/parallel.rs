//! Four-way partitioned exhaustive scan.
//!
//! The container is split into [`PARTITIONS`] contiguous ranges. Three are
//! scanned by tasks spawned on the rayon pool, the last one on the calling
//! thread, and the local winners are reduced in partition order once every
//! task has joined.
//! Tasks only read the container and write their own result slot.

use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::distance::Metric;
use crate::error::{Result, SearchError};

use super::linear::scan_range;
use super::Neighbor;

/// Fixed fan-out of the parallel scan.
pub const PARTITIONS: usize = 4;

type Slot = Option<Result<Option<Neighbor>>>;

/// Split `[0, len)` into sizes `len/4, len/4, len/4, len - 3*(len/4)`.
pub fn partition_ranges(len: usize) -> [Range<usize>; PARTITIONS] {
    let quarter = len / PARTITIONS;
    [
        0..quarter,
        quarter..2 * quarter,
        2 * quarter..3 * quarter,
        3 * quarter..len,
    ]
}

/// Nearest element to `query`, identical to a serial scan (ties resolve to
/// the lowest index).
///
/// Fails with `EmptyContainer` before any task is spawned. A metric error or
/// a panic inside any partition is reported only after all partitions have
/// finished; the first failure in partition order wins.
pub fn parallel_linear_search<T, M>(items: &[T], query: &T, metric: &M) -> Result<Neighbor>
where
    T: Sync,
    M: Metric<T> + Sync + ?Sized,
{
    if items.is_empty() {
        return Err(SearchError::EmptyContainer);
    }

    let ranges = partition_ranges(items.len());
    debug!(len = items.len(), quarter = ranges[0].len(), last = ranges[3].len(), "parallel scan");

    let mut slots: [Slot; PARTITIONS] = Default::default();
    {
        let (spawned, inline) = slots.split_at_mut(PARTITIONS - 1);
        let inline_range = ranges[PARTITIONS - 1].clone();
        rayon::in_place_scope(|s| {
            for (slot, range) in spawned.iter_mut().zip(ranges.iter().cloned()) {
                s.spawn(move |_| *slot = Some(guarded_scan(items, range, query, metric)));
            }
            inline[0] = Some(guarded_scan(items, inline_range, query, metric));
        });
    }

    let mut best: Option<Neighbor> = None;
    for slot in slots {
        let local = slot.ok_or_else(|| {
            SearchError::WorkerPanicked("partition finished without a result".to_string())
        })??;
        if let Some(candidate) = local {
            if best.map_or(true, |b| candidate.distance < b.distance) {
                best = Some(candidate);
            }
        }
    }
    best.ok_or(SearchError::EmptyContainer)
}

/// Scan one partition, turning a panic into an error for the joining thread.
fn guarded_scan<T, M>(items: &[T], range: Range<usize>, query: &T, metric: &M) -> Result<Option<Neighbor>>
where
    M: Metric<T> + ?Sized,
{
    panic::catch_unwind(AssertUnwindSafe(|| scan_range(items, range, query, metric)))
        .unwrap_or_else(|payload| Err(SearchError::WorkerPanicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::abs_distance;
    use crate::search::linear::find_closest_linear;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_partition_sizes() {
        let r = partition_ranges(10);
        assert_eq!(r, [0..2, 2..4, 4..6, 6..10]);

        let r = partition_ranges(3);
        assert_eq!(r, [0..0, 0..0, 0..0, 0..3]);

        let r = partition_ranges(8);
        assert_eq!(r.iter().map(|r| r.len()).sum::<usize>(), 8);
    }

    #[test]
    fn test_empty() {
        let items: [i64; 0] = [];
        assert!(parallel_linear_search(&items, &1, &abs_distance)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_singleton() {
        for q in [-5i64, 0, 99] {
            let best = parallel_linear_search(&[7i64], &q, &abs_distance).unwrap();
            assert_eq!(best.index, 0);
        }
    }

    #[test]
    fn test_matches_serial_scan() {
        let mut rng = StdRng::seed_from_u64(11);
        for len in [1usize, 2, 3, 4, 5, 9, 64, 1001] {
            let items: Vec<i64> = (0..len).map(|_| rng.gen_range(-500..500)).collect();
            for _ in 0..20 {
                let q = rng.gen_range(-600..600);
                let serial = find_closest_linear(&items, &q, &abs_distance).unwrap();
                let parallel = parallel_linear_search(&items, &q, &abs_distance).unwrap();
                assert_eq!(serial, parallel);
            }
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_partition() {
        // equal distances in every partition
        let items = vec![3i64; 12];
        let best = parallel_linear_search(&items, &0, &abs_distance).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let items: Vec<i64> = (0..40).collect();
        let metric = |a: &i64, b: &i64| {
            if *a == 5 {
                panic!("bad element");
            }
            a.abs_diff(*b)
        };
        let err = parallel_linear_search(&items, &20, &metric).unwrap_err();
        match err {
            SearchError::WorkerPanicked(msg) => assert!(msg.contains("bad element")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_partition_runs_on_caller_thread() {
        use std::sync::Mutex;
        use std::thread::{self, ThreadId};

        let items: Vec<i64> = (0..40).collect();
        let last_partition = partition_ranges(items.len())[PARTITIONS - 1].clone();
        let seen: Mutex<Vec<ThreadId>> = Mutex::new(Vec::new());
        let metric = |a: &i64, b: &i64| {
            if last_partition.contains(&(*a as usize)) {
                seen.lock().unwrap().push(thread::current().id());
            }
            a.abs_diff(*b)
        };

        let caller = thread::current().id();
        parallel_linear_search(&items, &7, &metric).unwrap();
        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), last_partition.len());
        assert!(seen.iter().all(|id| *id == caller));
    }

    #[test]
    fn test_metric_error_propagates() {
        use crate::sample::Sample;
        use crate::distance::SampleMetric;

        let items = vec![
            Sample::new(vec![0; 4], 2, 2).unwrap(),
            Sample::new(vec![0; 4], 2, 2).unwrap(),
            Sample::new(vec![0; 4], 2, 2).unwrap(),
            Sample::new(vec![0; 6], 3, 2).unwrap(),
        ];
        let query = Sample::new(vec![1; 4], 2, 2).unwrap();
        let err = parallel_linear_search(&items, &query, &SampleMetric::SquaredEuclidean).unwrap_err();
        assert!(matches!(err, SearchError::DimensionMismatch { .. }));
    }
}
