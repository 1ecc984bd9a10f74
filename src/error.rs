//! Error types for the search engine

use thiserror::Error;

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Error types that can occur while building or searching a training set
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Index out of range: {index} (size {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Container is empty")]
    EmptyContainer,

    #[error("Container is not sorted by proxy key")]
    NotSorted,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Search worker panicked: {0}")]
    WorkerPanicked(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Snapshot checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

impl SearchError {
    /// Whether this error belongs to the out-of-range class (empty container
    /// or an index past the current size).
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, SearchError::OutOfRange { .. } | SearchError::EmptyContainer)
    }

    /// Whether this error belongs to the invalid-argument class.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SearchError::NotSorted | SearchError::InvalidArgument(_)
        )
    }
}
