//! Error types for storage, persistence and export.

use std::path::PathBuf;

/// A key-value backend failed to read or write.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read `{key}` from {}: {source}", path.display())]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write `{key}` to {}: {source}", path.display())]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
}

/// Saving or loading the project snapshot failed.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize projects: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The stored value exists but is not a valid project list.
    #[error("stored projects are malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// The domain store could not load or persist its state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to load projects: {0}")]
    Load(#[source] CodecError),

    #[error("failed to persist projects: {0}")]
    Persist(#[source] CodecError),
}

/// Writing a CSV export failed.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create CSV file {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write task `{title}`: {source}")]
    Row {
        title: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write CSV: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush CSV: {0}")]
    Flush(#[from] std::io::Error),
}
