//! Scoped site switching.

use crate::api::SiteSwitcher;
use crate::error::SyncResult;
use podsync_types::SiteId;
use tracing::debug;

/// An entered site. Restores the previously active site when dropped.
///
/// The scope is also the explicit context value for everything done on the
/// target: lookups take their site from [`SiteScope::site`], never from the
/// switcher's ambient state.
pub struct SiteScope<'a> {
    switcher: &'a dyn SiteSwitcher,
    site: SiteId,
}

impl<'a> SiteScope<'a> {
    /// Switches to `site`. If the switch fails nothing is entered and
    /// nothing will be restored.
    pub fn enter(switcher: &'a dyn SiteSwitcher, site: SiteId) -> SyncResult<Self> {
        switcher.switch_to(site)?;
        debug!("Entered site {}", site);
        Ok(Self { switcher, site })
    }

    pub fn site(&self) -> SiteId {
        self.site
    }
}

impl Drop for SiteScope<'_> {
    fn drop(&mut self) {
        self.switcher.restore();
        debug!("Left site {}", self.site);
    }
}
