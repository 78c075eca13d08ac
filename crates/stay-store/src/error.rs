use std::path::PathBuf;

use stay_types::ModelError;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error reading or writing the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file exists but is not a parseable JSON object.
    #[error("corrupt snapshot {path}: {reason}")]
    CorruptSnapshot { path: PathBuf, reason: String },

    /// The table could not be serialized into snapshot form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A record failed to serialize for the snapshot.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
