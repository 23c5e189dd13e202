//! Error types for Wayfinder

use thiserror::Error;

/// Main error type for Wayfinder operations.
///
/// Matching and query parsing never produce errors; these variants cover
/// taxonomy loading, the depth guard, and preference storage.
#[derive(Error, Debug)]
pub enum NavError {
    /// A filter in a taxonomy definition used a key outside the recognized set
    #[error("Unknown filter key `{key}` on node `{label}`")]
    UnknownFilterKey {
        /// The offending key
        key: String,
        /// Label of the node that declared it
        label: String,
    },

    /// The taxonomy nests deeper than the configured limit
    #[error("Navigation tree too deep: depth {depth} exceeds maximum {max}")]
    DepthExceeded {
        /// Depth that was reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// A taxonomy or config document could not be deserialized
    #[error("Invalid navigation config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// The persisted preference store rejected an operation
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for Wayfinder operations
pub type Result<T> = std::result::Result<T, NavError>;
