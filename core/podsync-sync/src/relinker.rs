//! Re-resolves sister links on a target site.

use crate::api::PodApi;
use crate::error::SyncResult;
use crate::relations::Relationships;
use crate::site::SiteScope;
use podsync_model::{FieldQuery, Pod};
use tracing::debug;

/// Rebinds the sister link of every relation field in `relationships`.
///
/// The sister is looked up by name within the related pod on the scope's
/// site. When it cannot be found, or was never resolved on the source, the
/// link is cleared: a source-site identifier would point at an unrelated
/// field on the target.
pub fn relink(
    api: &dyn PodApi,
    scope: &SiteScope<'_>,
    relationships: &Relationships,
    pod: &mut Pod,
) -> SyncResult<()> {
    let site = scope.site();

    for (name, relationship) in relationships {
        let sister_id = match &relationship.sister {
            Some(sister) => api
                .load_field(site, &FieldQuery::named(&sister.name, &relationship.pod))?
                .and_then(|remote| remote.id),
            None => None,
        };

        if sister_id.is_none() {
            debug!(
                "No sister for {}.{} in {} on site {}, clearing link",
                pod.name, name, relationship.pod, site
            );
        }
        if let Some(field) = pod.field_mut(name) {
            field.sister_id = sister_id;
        }
    }

    Ok(())
}

