//! Schema model for Pods multisite sync.
//!
//! Defines the records the sync core reads and writes:
//! - [`Pod`]: a content type with its ordered fields and options
//! - [`Field`]: one attribute of a pod, possibly a relation with a sister
//! - [`PodRef`] / [`FieldQuery`]: how collaborators are asked to look records up
//! - [`settings`]: the admin tab and option that drive the sync
//!
//! Identifiers on these records are only meaningful on the site they were
//! loaded from.

mod field;
mod pod;
pub mod settings;

pub use field::{Field, FieldQuery, FieldType};
pub use pod::{Pod, PodRef};

/// Option key holding a record's previous name after a rename.
pub const OLD_NAME_KEY: &str = "old_name";

/// Option key holding the list of sites a pod is synced to.
pub const SYNC_TARGETS_KEY: &str = "multisite_sync_to_sites";
