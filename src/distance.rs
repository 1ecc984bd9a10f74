//! Proxy keys, distance metrics, and comparators

use crate::error::Result;
use crate::sample::Sample;
use serde::{Deserialize, Serialize};

/// A cheap scalar summary of an element, used to impose a sortable order.
pub trait ProxyKey {
    fn proxy_key(&self) -> i64;
}

impl ProxyKey for i64 {
    fn proxy_key(&self) -> i64 {
        *self
    }
}

impl ProxyKey for i32 {
    fn proxy_key(&self) -> i64 {
        i64::from(*self)
    }
}

/// The true (potentially expensive) distance between two elements.
pub trait Metric<T: ?Sized> {
    fn distance(&self, a: &T, b: &T) -> Result<u64>;
}

impl<T: ?Sized, F> Metric<T> for F
where
    F: Fn(&T, &T) -> u64,
{
    fn distance(&self, a: &T, b: &T) -> Result<u64> {
        Ok(self(a, b))
    }
}

/// A strict weak order over elements.
pub trait Comparator<T: ?Sized> {
    fn less(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders elements by ascending proxy key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByProxyKey;

impl<T: ProxyKey + ?Sized> Comparator<T> for ByProxyKey {
    fn less(&self, a: &T, b: &T) -> bool {
        a.proxy_key() < b.proxy_key()
    }
}

/// Distance metrics over sample pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleMetric {
    /// Sum of squared pixel differences
    #[default]
    SquaredEuclidean,
    /// Sum of absolute pixel differences
    Manhattan,
}

impl Metric<Sample> for SampleMetric {
    fn distance(&self, a: &Sample, b: &Sample) -> Result<u64> {
        match self {
            SampleMetric::SquaredEuclidean => a.distance(b),
            SampleMetric::Manhattan => manhattan_distance(a, b),
        }
    }
}

/// Sum of absolute pixel differences between two samples.
pub fn manhattan_distance(a: &Sample, b: &Sample) -> Result<u64> {
    a.check_shape(b)?;
    Ok(a.as_slice()
        .iter()
        .zip(b.as_slice().iter())
        .map(|(&x, &y)| u64::from(x.abs_diff(y)))
        .sum())
}

/// Absolute difference of two integers, the metric used for plain `i64` data.
pub fn abs_distance(a: &i64, b: &i64) -> u64 {
    a.abs_diff(*b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn sample(pixels: Vec<u8>) -> Sample {
        let n = pixels.len();
        Sample::new(pixels, n, 1).unwrap()
    }

    #[test]
    fn test_squared_euclidean() {
        let a = sample(vec![1, 2, 3]);
        let b = sample(vec![4, 5, 6]);
        assert_eq!(SampleMetric::SquaredEuclidean.distance(&a, &b).unwrap(), 27);
    }

    #[test]
    fn test_manhattan() {
        let a = sample(vec![1, 9, 3]);
        let b = sample(vec![4, 5, 6]);
        assert_eq!(SampleMetric::Manhattan.distance(&a, &b).unwrap(), 10);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = sample(vec![1, 2]);
        let b = sample(vec![1, 2, 3]);
        assert!(matches!(
            SampleMetric::Manhattan.distance(&a, &b),
            Err(SearchError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_closure_metric() {
        let metric = |a: &i64, b: &i64| a.abs_diff(*b);
        assert_eq!(Metric::<i64>::distance(&metric, &3, &-4).unwrap(), 7);
        assert_eq!(Metric::<i64>::distance(&abs_distance, &10, &4).unwrap(), 6);
    }

    #[test]
    fn test_comparators() {
        assert!(ByProxyKey.less(&1i64, &2i64));
        assert!(!ByProxyKey.less(&2i64, &2i64));

        let greater = |a: &i64, b: &i64| a > b;
        assert!(Comparator::<i64>::less(&greater, &3, &2));

        let dim = sample(vec![1, 1]);
        let bright = sample(vec![200, 200]);
        assert!(ByProxyKey.less(&dim, &bright));
    }
}
