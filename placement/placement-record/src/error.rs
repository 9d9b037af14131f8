//! Error types for record persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from writing demonstration records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A record for this trial index already exists.
    ///
    /// The store is append-only; records are never overwritten or merged.
    #[error("record already exists: {path}")]
    AlreadyExists {
        /// Path of the existing record.
        path: PathBuf,
    },

    /// Filesystem failure.
    #[error("record I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure.
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;
