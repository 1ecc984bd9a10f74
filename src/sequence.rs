//! Growable element container that tracks whether it is sorted

use crate::distance::{ByProxyKey, Comparator, Metric, ProxyKey};
use crate::error::{Result, SearchError};
use crate::search::{self, sort, Neighbor};

/// An ordered, append-only collection of elements.
///
/// The sortedness flag is set by [`Sequence::sort_by`] and cleared by every
/// [`Sequence::push`]. Proxy-key search refuses to run while it is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence<T> {
    items: Vec<T>,
    sorted: bool,
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            sorted: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            sorted: false,
        }
    }

    /// Wrap existing elements. The result is considered unsorted.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            sorted: false,
        }
    }

    /// Wrap elements that are claimed to already be ordered by `cmp`.
    ///
    /// The claim is verified in one pass; a violation is an `InvalidArgument`.
    pub fn from_sorted<C: Comparator<T>>(items: Vec<T>, cmp: C) -> Result<Self> {
        if let Some(i) = sort::first_unsorted(&items, &cmp) {
            return Err(SearchError::InvalidArgument(format!(
                "elements {} and {} are out of order",
                i,
                i + 1
            )));
        }
        Ok(Self {
            items,
            sorted: true,
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `idx`, or `OutOfRange` past the current size.
    pub fn at(&self, idx: usize) -> Result<&T> {
        self.items.get(idx).ok_or(SearchError::OutOfRange {
            index: idx,
            len: self.items.len(),
        })
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    /// Append an element. Invalidates sortedness.
    pub fn push(&mut self, value: T) {
        self.items.push(value);
        self.sorted = false;
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Sort in place so that no element is `cmp`-less than its predecessor.
    pub fn sort_by<C: Comparator<T>>(&mut self, cmp: C) {
        sort::quick_sort(&mut self.items, &cmp);
        self.sorted = true;
    }

    /// Nearest element by exhaustive serial scan.
    pub fn find_closest_linear<M: Metric<T>>(&self, query: &T, metric: &M) -> Result<Neighbor> {
        search::linear::find_closest_linear(&self.items, query, metric)
    }
}

impl<T: Clone> Sequence<T> {
    /// Replace the contents with a deep copy of `other`, flag included.
    pub fn assign(&mut self, other: &Sequence<T>) {
        self.items.clone_from(&other.items);
        self.sorted = other.sorted;
    }
}

impl<T: PartialEq> Sequence<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.items.contains(value)
    }
}

impl<T: ProxyKey> Sequence<T> {
    /// Sort by ascending proxy key.
    pub fn sort_by_proxy_key(&mut self) {
        self.sort_by(ByProxyKey);
    }

    /// Anchor search followed by refinement over a window of width `k`.
    pub fn find_closest_binary<M: Metric<T>>(
        &self,
        query: &T,
        k: usize,
        metric: &M,
    ) -> Result<Neighbor> {
        search::find_closest_binary(self, query, k, metric)
    }
}

impl<T: Sync> Sequence<T> {
    /// Nearest element by four-way parallel exhaustive scan.
    pub fn parallel_linear_search<M>(&self, query: &T, metric: &M) -> Result<Neighbor>
    where
        M: Metric<T> + Sync,
    {
        search::parallel::parallel_linear_search(&self.items, query, metric)
    }
}
