//! Error types for the storage layer.

use podsync_types::SiteId;
use thiserror::Error;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Options column could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record addressed by identifier does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Site is not part of the network.
    #[error("site {0} does not exist")]
    SiteNotFound(SiteId),

    /// Stored row holds a value the model cannot represent.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A thread panicked while holding the connection.
    #[error("connection lock poisoned")]
    LockPoisoned,
}
