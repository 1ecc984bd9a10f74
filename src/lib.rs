//! # Proxy Search
//!
//! Nearest-candidate search for classifying a query sample against a
//! labeled training set.
//!
//! This library provides:
//! - A growable container that tracks whether it is sorted by proxy key
//! - Partition-exchange sorting over a caller-supplied comparator
//! - Escalating-tolerance anchor search with windowed true-distance refinement
//! - Serial and four-way parallel exhaustive search
//! - Labeled classification, evaluation, and persistence of trained sets
//!
//! ## Example
//!
//! ```rust
//! use proxy_search::{Classifier, ProxyIndex, Sample, SampleMetric};
//!
//! let mut classifier =
//!     Classifier::with_index(ProxyIndex::with_window(SampleMetric::SquaredEuclidean, 4));
//!
//! classifier
//!     .train(vec![
//!         Sample::new(vec![0, 0, 0, 0], 2, 2).unwrap().with_label('0'),
//!         Sample::new(vec![255, 0, 0, 255], 2, 2).unwrap().with_label('1'),
//!     ])
//!     .unwrap();
//!
//! let query = Sample::new(vec![240, 10, 0, 250], 2, 2).unwrap();
//! assert_eq!(classifier.predict_label(&query).unwrap(), '1');
//! ```

pub mod classifier;
pub mod config;
pub mod distance;
pub mod error;
pub mod flat_index;
pub mod index;
pub mod metrics;
pub mod persistence;
pub mod proxy_index;
pub mod sample;
pub mod search;
pub mod sequence;

pub use classifier::{Classifier, Evaluation};
pub use config::{SearchConfig, Strategy};
pub use distance::{ByProxyKey, Comparator, Metric, ProxyKey, SampleMetric};
pub use error::{Result, SearchError};
pub use flat_index::{FlatIndex, ScanMode};
pub use index::Index;
pub use proxy_index::ProxyIndex;
pub use sample::Sample;
pub use search::{Anchor, Neighbor};
pub use sequence::Sequence;
