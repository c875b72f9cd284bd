use podsync_model::SYNC_TARGETS_KEY;
use serde::{Deserialize, Serialize};

/// Configuration for the pod syncer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Pod option holding the target site list.
    pub targets_key: String,
    /// Reconcile every target but skip the final save.
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            targets_key: SYNC_TARGETS_KEY.to_string(),
            dry_run: false,
        }
    }
}
