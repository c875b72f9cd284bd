//! One-way pod schema sync for a Pods multisite network.
//!
//! When a pod is saved on one site, a copy is pushed to every site listed in
//! its "sites to sync to" option. Identifiers are per-site, so the copy is
//! reconciled against what already exists on each target before it is
//! written: repeated syncs update the remote pod instead of duplicating it.
//!
//! # Architecture
//!
//! - **Api**: the schema API and site switcher the host provides
//! - **Relations**: collects relation fields and their sister definitions
//! - **Reconciler**: binds the outgoing record to the target's identifiers
//! - **Relinker**: re-resolves sister links in the target's namespace
//! - **Syncer**: drives the above per target and reports the outcome
//!
//! ## Sync Process
//!
//! 1. **Load**: fetch the saved pod on the source site
//! 2. **Strip**: drop the pod and field identifiers
//! 3. **Extract**: resolve sister fields while still on the source site
//! 4. **Per target**: switch, reconcile, relink, save, restore
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use podsync_model::{Pod, PodRef, SYNC_TARGETS_KEY};
//! use podsync_store::NetworkStore;
//! use podsync_sync::PodSyncer;
//! use podsync_types::SiteId;
//! use serde_json::json;
//!
//! let main = SiteId::new(1).unwrap();
//! let store = Arc::new(NetworkStore::open_in_memory(main).unwrap());
//! store.add_site(SiteId::new(2).unwrap(), "two.example").unwrap();
//! store
//!     .save_pod(main, &Pod::new("event").with_option(SYNC_TARGETS_KEY, json!([2])))
//!     .unwrap();
//!
//! let syncer = PodSyncer::new(store.clone(), store.clone());
//! let report = syncer.sync_pod(&PodRef::from("event")).unwrap();
//! assert_eq!(report.synced_sites(), vec![SiteId::new(2).unwrap()]);
//! ```

pub mod api;
mod config;
mod error;
pub mod hooks;
pub mod reconciler;
pub mod relations;
pub mod relinker;
mod report;
pub mod site;
mod syncer;

pub use api::{PodApi, SiteSwitcher};
pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use hooks::{PodHooks, PodSavedHandler};
pub use reconciler::{reconcile, Reconciled};
pub use relations::{extract_relationships, Relationship, Relationships};
pub use relinker::relink;
pub use report::{SyncReport, TargetOutcome};
pub use site::SiteScope;
pub use syncer::PodSyncer;
