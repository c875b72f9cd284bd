//! Core type definitions for Pods multisite sync.
//!
//! This crate defines the identifiers shared by every other crate in the
//! workspace:
//! - Site, Pod and Field identifiers (per-site integers, never portable)
//! - Target entries as they arrive from the "sites to sync to" option
//!
//! Schema records themselves live in `podsync-model`.

mod ids;
mod target;

pub use ids::{FieldId, PodId, SiteId};
pub use target::{SkipReason, TargetEntry};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("site id must be a positive integer, got {0}")]
    InvalidSite(String),
}
