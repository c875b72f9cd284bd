use podsync_model::Pod;
use podsync_types::{PodId, SiteId, SkipReason, TargetEntry};
use serde::Serialize;

/// What happened to one entry of a pod's target list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The pod was written to the target.
    Synced {
        site: SiteId,
        pod_id: PodId,
        /// No copy existed on the target before this sync.
        created: bool,
    },
    /// Dry run: the record that would have been written.
    Planned {
        site: SiteId,
        remote_id: Option<PodId>,
        pod: Pod,
    },
    /// The entry was not a usable target.
    Skipped {
        entry: TargetEntry,
        reason: SkipReason,
    },
    /// Switching, a lookup or the save failed on this target.
    Failed { site: SiteId, error: String },
}

/// Outcome of syncing one pod to all its targets, in target-list order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub pod: String,
    pub source_site: SiteId,
    pub outcomes: Vec<TargetOutcome>,
}

impl SyncReport {
    pub fn new(pod: impl Into<String>, source_site: SiteId) -> Self {
        Self {
            pod: pod.into(),
            source_site,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: TargetOutcome) {
        self.outcomes.push(outcome);
    }

    /// True if no target was even considered.
    pub fn is_noop(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn synced_sites(&self) -> Vec<SiteId> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TargetOutcome::Synced { site, .. } => Some(*site),
                _ => None,
            })
            .collect()
    }

    pub fn planned(&self) -> Vec<(SiteId, &Pod)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TargetOutcome::Planned { site, pod, .. } => Some((*site, pod)),
                _ => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<(&TargetEntry, SkipReason)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TargetOutcome::Skipped { entry, reason } => Some((entry, *reason)),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(SiteId, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                TargetOutcome::Failed { site, error } => Some((*site, error.as_str())),
                _ => None,
            })
            .collect()
    }
}
