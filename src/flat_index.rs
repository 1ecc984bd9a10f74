//! Exhaustive index: computes the true distance to every training element

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::distance::Metric;
use crate::error::Result;
use crate::index::Index;
use crate::search::{self, Neighbor};
use crate::sequence::Sequence;

/// How the exhaustive scan is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// One pass on the calling thread.
    #[default]
    Serial,
    /// Four-way partitioned scan.
    Parallel,
}

/// A flat (brute-force) index. Ordering of the training set is irrelevant.
#[derive(Debug)]
pub struct FlatIndex<T, M> {
    training: Sequence<T>,
    metric: M,
    mode: ScanMode,
}

impl<T, M> FlatIndex<T, M> {
    /// Create a new empty flat index scanning serially.
    pub fn new(metric: M) -> Self {
        Self::with_mode(metric, ScanMode::Serial)
    }

    /// Create a new empty flat index using the four-way parallel scan.
    pub fn parallel(metric: M) -> Self {
        Self::with_mode(metric, ScanMode::Parallel)
    }

    pub fn with_mode(metric: M, mode: ScanMode) -> Self {
        Self {
            training: Sequence::new(),
            metric,
            mode,
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }
}

impl<T, M> Index<T> for FlatIndex<T, M>
where
    T: Sync,
    M: Metric<T> + Sync,
{
    fn train(&mut self, training: Sequence<T>) -> Result<()> {
        info!(strategy = self.name(), len = training.len(), "training flat index");
        self.training = training;
        Ok(())
    }

    fn nearest(&self, query: &T) -> Result<Neighbor> {
        match self.mode {
            ScanMode::Serial => search::find_closest_linear(self.training.as_slice(), query, &self.metric),
            ScanMode::Parallel => self.training.parallel_linear_search(query, &self.metric),
        }
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.training.get(index)
    }

    fn name(&self) -> &'static str {
        match self.mode {
            ScanMode::Serial => "linear",
            ScanMode::Parallel => "parallel",
        }
    }

    fn len(&self) -> usize {
        self.training.len()
    }
}
