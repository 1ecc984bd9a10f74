//! Persistence layer: dataset files, trained-set snapshots, synthetic data.

pub mod dataset;
pub mod serialization;
pub mod snapshot;
pub mod synthetic;
