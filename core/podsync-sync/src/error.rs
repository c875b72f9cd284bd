//! Error types for the sync layer.

use podsync_store::StoreError;
use podsync_types::SiteId;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
///
/// Absence is not an error: a missing remote pod or field is a normal
/// outcome of a lookup. Only the source pod itself must exist.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The pod that triggered the sync could not be loaded.
    #[error("pod not found: {0}")]
    PodNotFound(String),

    /// Storage error from the bundled network store.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Storage error reported by a host-provided schema API.
    #[error("storage error: {0}")]
    Storage(String),

    /// The host refused to switch to a site.
    #[error("cannot switch to site {site}: {reason}")]
    SiteSwitch { site: SiteId, reason: String },
}
