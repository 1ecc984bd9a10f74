//! Proxy-key index: sorted training set, anchor search, windowed refinement

use tracing::{debug, info};

use crate::distance::{ByProxyKey, Metric, ProxyKey};
use crate::error::Result;
use crate::index::Index;
use crate::search::{self, sort, Neighbor};
use crate::sequence::Sequence;

/// Window width used when none is given.
pub const DEFAULT_WINDOW: usize = 1000;

/// Approximate index that keeps its training set sorted by proxy key and
/// computes true distances only inside a window of `window` elements around
/// the anchor.
#[derive(Debug)]
pub struct ProxyIndex<T, M> {
    training: Sequence<T>,
    metric: M,
    window: usize,
}

impl<T, M> ProxyIndex<T, M> {
    /// Create a new empty index with the default window.
    pub fn new(metric: M) -> Self {
        Self::with_window(metric, DEFAULT_WINDOW)
    }

    pub fn with_window(metric: M, window: usize) -> Self {
        Self {
            training: Sequence::new(),
            metric,
            window,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// The training set in proxy-key order.
    pub fn training(&self) -> &Sequence<T> {
        &self.training
    }
}

impl<T: ProxyKey, M: Metric<T>> ProxyIndex<T, M> {
    /// [`Index::nearest`] with an explicit window width.
    pub fn nearest_within(&self, query: &T, window: usize) -> Result<Neighbor> {
        search::find_closest_binary(&self.training, query, window, &self.metric)
    }
}

impl<T: ProxyKey, M: Metric<T>> Index<T> for ProxyIndex<T, M> {
    /// Sorts the training set by proxy key unless it is flagged sorted and
    /// already in proxy-key order.
    fn train(&mut self, mut training: Sequence<T>) -> Result<()> {
        if training.is_sorted() && sort::is_sorted_by(training.as_slice(), &ByProxyKey) {
            debug!(len = training.len(), "training set already sorted");
        } else {
            training.sort_by_proxy_key();
            debug!(len = training.len(), "finished sort");
        }
        info!(strategy = self.name(), len = training.len(), window = self.window, "training proxy index");
        self.training = training;
        Ok(())
    }

    fn nearest(&self, query: &T) -> Result<Neighbor> {
        self.nearest_within(query, self.window)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.training.get(index)
    }

    fn name(&self) -> &'static str {
        "proxy"
    }

    fn len(&self) -> usize {
        self.training.len()
    }
}
