//! Collaborators the syncer needs from its host.
//!
//! The host owns schema storage and the notion of an "active" site. Every
//! lookup takes the site explicitly; the switcher exists for hosts whose
//! storage layer also reads an ambient site and must be kept in step.

use crate::error::{SyncError, SyncResult};
use podsync_model::{Field, FieldQuery, Pod, PodRef};
use podsync_store::NetworkStore;
use podsync_types::{PodId, SiteId};

/// Schema loading and persistence on any site of the network.
pub trait PodApi: Send + Sync {
    /// Loads a full pod. `Ok(None)` if no such pod exists on `site`.
    fn load_pod(&self, site: SiteId, pod: &PodRef) -> SyncResult<Option<Pod>>;

    /// Loads one field. `Ok(None)` if no such field exists on `site`.
    fn load_field(&self, site: SiteId, query: &FieldQuery) -> SyncResult<Option<Field>>;

    /// Inserts or updates `pod` on `site`, returning its identifier there.
    fn save_pod(&self, site: SiteId, pod: &Pod) -> SyncResult<PodId>;
}

/// The host's active-site state.
///
/// `switch_to` and `restore` nest: each restore returns to the site that
/// was active before the matching switch. Use [`crate::SiteScope`] rather
/// than calling these directly.
pub trait SiteSwitcher: Send + Sync {
    fn current_site(&self) -> SiteId;

    fn switch_to(&self, site: SiteId) -> SyncResult<()>;

    fn restore(&self);
}

impl PodApi for NetworkStore {
    fn load_pod(&self, site: SiteId, pod: &PodRef) -> SyncResult<Option<Pod>> {
        Ok(NetworkStore::load_pod(self, site, pod)?)
    }

    fn load_field(&self, site: SiteId, query: &FieldQuery) -> SyncResult<Option<Field>> {
        Ok(NetworkStore::load_field(self, site, query)?)
    }

    fn save_pod(&self, site: SiteId, pod: &Pod) -> SyncResult<PodId> {
        Ok(NetworkStore::save_pod(self, site, pod)?)
    }
}

impl SiteSwitcher for NetworkStore {
    fn current_site(&self) -> SiteId {
        NetworkStore::current_site(self)
    }

    fn switch_to(&self, site: SiteId) -> SyncResult<()> {
        NetworkStore::switch_to(self, site).map_err(|e| SyncError::SiteSwitch {
            site,
            reason: e.to_string(),
        })
    }

    fn restore(&self) {
        NetworkStore::restore(self);
    }
}
