//! Binds an outgoing pod to the identifiers of a target site.

use crate::api::PodApi;
use crate::error::SyncResult;
use crate::site::SiteScope;
use podsync_model::{Pod, PodRef};
use podsync_types::FieldId;
use std::collections::HashSet;
use tracing::debug;

/// Result of reconciling one pod against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// The record to persist on the target.
    pub pod: Pod,
    /// The target's existing copy, if one was found.
    pub remote: Option<Pod>,
}

/// Matches `source` against the pod already stored on the scope's site.
///
/// The remote pod is looked up by name, then by the source's previous name.
/// When found, the outgoing record takes the remote pod's identifier, and
/// each field takes the identifier of the remote field with the same name,
/// or failing that with the field's previous name. A previous name never
/// takes an identifier already bound to another field by its current name,
/// so no two outgoing fields share one. Unmatched fields carry no
/// identifier and are created by the save.
///
/// `source` is expected to have its identifiers stripped. Identifiers it
/// still carries are overwritten, never passed through.
pub fn reconcile(api: &dyn PodApi, scope: &SiteScope<'_>, source: &Pod) -> SyncResult<Reconciled> {
    let site = scope.site();

    let mut remote = api.load_pod(site, &PodRef::from(source.name.as_str()))?;
    if remote.is_none() {
        if let Some(old_name) = source.old_name() {
            remote = api.load_pod(site, &PodRef::from(old_name))?;
            if remote.is_some() {
                debug!("Found {} on site {} under previous name {}", source.name, site, old_name);
            }
        }
    }

    let mut pod = source.clone();
    match &remote {
        Some(remote) => {
            pod.id = remote.id;
            // Current names bind first; a previous name only takes an
            // identifier no other field has claimed.
            let mut claimed: HashSet<FieldId> = pod
                .fields
                .iter()
                .filter_map(|field| remote.field(&field.name).and_then(|f| f.id))
                .collect();
            for field in &mut pod.fields {
                field.pod_id = remote.id;
                field.id = match remote.field(&field.name) {
                    Some(matched) => matched.id,
                    None => field
                        .old_name()
                        .and_then(|old| remote.field(old))
                        .and_then(|f| f.id)
                        .filter(|id| claimed.insert(*id)),
                };
            }
            debug!("Reconciled {} against its copy on site {}", pod.name, site);
        }
        None => {
            pod.id = None;
            for field in &mut pod.fields {
                field.id = None;
                field.pod_id = None;
            }
            debug!("No {} on site {}, creating it", pod.name, site);
        }
    }

    Ok(Reconciled { pod, remote })
}
