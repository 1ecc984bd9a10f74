//! Search configuration, loadable from JSON

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::SampleMetric;
use crate::error::{Result, SearchError};
use crate::flat_index::FlatIndex;
use crate::index::Index;
use crate::proxy_index::{ProxyIndex, DEFAULT_WINDOW};
use crate::sample::Sample;

/// Which search strategy to classify with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Serial exhaustive scan.
    Linear,
    /// Four-way parallel exhaustive scan.
    Parallel,
    /// Sorted proxy key, anchor search, windowed refinement.
    #[default]
    Proxy,
}

/// An index usable behind the CLI and other dynamic callers.
pub type DynIndex = Box<dyn Index<Sample> + Send + Sync>;

/// Configuration for building a classification index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Refinement window width for the proxy strategy.
    pub window: usize,
    pub metric: SampleMetric,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Proxy,
            window: DEFAULT_WINDOW,
            metric: SampleMetric::SquaredEuclidean,
        }
    }
}

impl SearchConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let config: SearchConfig = serde_json::from_slice(&bytes)
            .map_err(|e| SearchError::SerializationError(e.to_string()))?;
        Ok(config)
    }

    /// Build an empty index for the configured strategy.
    pub fn build_index(&self) -> DynIndex {
        match self.strategy {
            Strategy::Linear => Box::new(FlatIndex::new(self.metric)),
            Strategy::Parallel => Box::new(FlatIndex::parallel(self.metric)),
            Strategy::Proxy => Box::new(ProxyIndex::with_window(self.metric, self.window)),
        }
    }
}
