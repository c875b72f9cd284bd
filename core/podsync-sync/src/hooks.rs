//! Save-event wiring between the host and the syncer.
//!
//! The host fires [`PodHooks::dispatch_pod_saved`] after a pod is saved
//! through its admin. Handlers are registered explicitly; there is no
//! global registry.

use crate::syncer::PodSyncer;
use podsync_model::PodRef;
use std::sync::Arc;
use tracing::warn;

/// Reacts to a pod having been saved on the active site.
pub trait PodSavedHandler: Send + Sync {
    fn on_pod_saved(&self, pod: &PodRef);
}

/// Handlers for the pod-saved event, called in registration order.
#[derive(Default)]
pub struct PodHooks {
    handlers: Vec<Arc<dyn PodSavedHandler>>,
}

impl PodHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn PodSavedHandler>) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch_pod_saved(&self, pod: &PodRef) {
        for handler in &self.handlers {
            handler.on_pod_saved(pod);
        }
    }
}

impl PodSavedHandler for PodSyncer {
    /// Runs the sync. Save events have no caller to report to, so errors
    /// are logged and dropped.
    fn on_pod_saved(&self, pod: &PodRef) {
        if let Err(e) = self.sync_pod(pod) {
            warn!("Multisite sync of {} failed: {}", pod, e);
        }
    }
}
