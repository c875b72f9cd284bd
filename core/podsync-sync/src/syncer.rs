//! Pushes a saved pod to its target sites.

use crate::api::{PodApi, SiteSwitcher};
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::reconciler::{reconcile, Reconciled};
use crate::relations::{extract_relationships, Relationships};
use crate::relinker::relink;
use crate::report::{SyncReport, TargetOutcome};
use crate::site::SiteScope;
use podsync_model::{Pod, PodRef};
use podsync_types::SiteId;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Pushes pods from the active site to the sites listed in their options.
pub struct PodSyncer {
    api: Arc<dyn PodApi>,
    sites: Arc<dyn SiteSwitcher>,
    config: SyncConfig,
}

impl PodSyncer {
    /// Creates a syncer with the default configuration.
    pub fn new(api: Arc<dyn PodApi>, sites: Arc<dyn SiteSwitcher>) -> Self {
        Self::with_config(api, sites, SyncConfig::default())
    }

    pub fn with_config(
        api: Arc<dyn PodApi>,
        sites: Arc<dyn SiteSwitcher>,
        config: SyncConfig,
    ) -> Self {
        Self { api, sites, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Syncs the pod `pod`, as stored on the active site, to its targets.
    ///
    /// Targets are processed in list order, duplicates included. A target
    /// that is not a site ID or is the active site itself is skipped. A
    /// failure on one target is recorded and the next target still runs;
    /// only failing to load the source pod or its sister fields aborts.
    pub fn sync_pod(&self, pod: &PodRef) -> SyncResult<SyncReport> {
        let source_site = self.sites.current_site();

        let mut source = self
            .api
            .load_pod(source_site, pod)?
            .ok_or_else(|| SyncError::PodNotFound(pod.to_string()))?;

        let mut report = SyncReport::new(&source.name, source_site);
        let Some(targets) = source.sync_targets(&self.config.targets_key) else {
            debug!("Pod {} has no sync targets", source.name);
            return Ok(report);
        };

        source.strip_ids();
        let relationships = extract_relationships(self.api.as_ref(), source_site, &source)?;

        for entry in targets {
            let site = match entry.resolve(source_site) {
                Ok(site) => site,
                Err(reason) => {
                    debug!("Skipping target {} of {}: {}", entry, source.name, reason);
                    report.push(TargetOutcome::Skipped { entry, reason });
                    continue;
                }
            };

            let outcome = match self.sync_to(site, &source, &relationships) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Sync of {} to site {} failed: {}", source.name, site, e);
                    TargetOutcome::Failed {
                        site,
                        error: e.to_string(),
                    }
                }
            };
            report.push(outcome);
        }

        info!(
            "Synced {} from site {}: {} of {} targets",
            source.name,
            source_site,
            report.synced_sites().len(),
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Reconciles, relinks and saves `source` on one target.
    ///
    /// The site scope is dropped on every return path, so the source site
    /// is active again before the next target is considered.
    fn sync_to(
        &self,
        site: SiteId,
        source: &Pod,
        relationships: &Relationships,
    ) -> SyncResult<TargetOutcome> {
        let scope = SiteScope::enter(self.sites.as_ref(), site)?;
        let api = self.api.as_ref();

        let Reconciled { mut pod, remote } = reconcile(api, &scope, source)?;
        relink(api, &scope, relationships, &mut pod)?;

        let remote_id = remote.and_then(|r| r.id);
        if self.config.dry_run {
            debug!("Dry run: not saving {} on site {}", pod.name, site);
            return Ok(TargetOutcome::Planned {
                site,
                remote_id,
                pod,
            });
        }

        let pod_id = api.save_pod(scope.site(), &pod)?;
        info!("Saved {} as #{} on site {}", pod.name, pod_id, site);
        Ok(TargetOutcome::Synced {
            site,
            pod_id,
            created: remote_id.is_none(),
        })
    }
}
