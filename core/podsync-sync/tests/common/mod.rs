//! Shared test helpers for sync tests.

#![allow(dead_code)]

use podsync_model::{Field, FieldQuery, FieldType, Pod, PodRef, SYNC_TARGETS_KEY};
use podsync_store::NetworkStore;
use podsync_sync::{PodApi, PodSyncer, SyncError, SyncResult};
use podsync_types::{FieldId, PodId, SiteId};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub fn site(id: u64) -> SiteId {
    SiteId::new(id).unwrap()
}

/// A network whose home (source) site is 1, with the given extra sites.
pub fn network(extra_sites: &[u64]) -> Arc<NetworkStore> {
    let store = NetworkStore::open_in_memory(site(1)).unwrap();
    for id in extra_sites {
        store.add_site(site(*id), &format!("site{id}.example")).unwrap();
    }
    Arc::new(store)
}

/// Which collaborator call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    LoadPod,
    LoadField,
    SavePod,
}

/// One recorded call: the operation, the site passed explicitly and the
/// site the store considered active at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub op: Op,
    pub site: SiteId,
    pub active: SiteId,
}

/// Schema API wrapper that records every call and can fail on demand.
pub struct RecordingApi {
    pub store: Arc<NetworkStore>,
    calls: Mutex<Vec<Call>>,
    fail_saves_on: Mutex<HashSet<SiteId>>,
    fail_loads_on: Mutex<HashSet<SiteId>>,
}

impl RecordingApi {
    pub fn new(store: Arc<NetworkStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            calls: Mutex::new(Vec::new()),
            fail_saves_on: Mutex::new(HashSet::new()),
            fail_loads_on: Mutex::new(HashSet::new()),
        })
    }

    pub fn fail_saves_on(&self, site: SiteId) {
        self.fail_saves_on.lock().unwrap().insert(site);
    }

    pub fn fail_loads_on(&self, site: SiteId) {
        self.fail_loads_on.lock().unwrap().insert(site);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_on(&self, site: SiteId) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.site == site).collect()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls().iter().filter(|c| c.op == op).count()
    }

    fn record(&self, op: Op, site: SiteId) {
        self.calls.lock().unwrap().push(Call {
            op,
            site,
            active: self.store.current_site(),
        });
    }

    fn check_load(&self, site: SiteId) -> SyncResult<()> {
        if self.fail_loads_on.lock().unwrap().contains(&site) {
            return Err(SyncError::Storage(format!("load refused on site {site}")));
        }
        Ok(())
    }
}

impl PodApi for RecordingApi {
    fn load_pod(&self, site: SiteId, pod: &PodRef) -> SyncResult<Option<Pod>> {
        self.record(Op::LoadPod, site);
        self.check_load(site)?;
        PodApi::load_pod(&*self.store, site, pod)
    }

    fn load_field(&self, site: SiteId, query: &FieldQuery) -> SyncResult<Option<Field>> {
        self.record(Op::LoadField, site);
        self.check_load(site)?;
        PodApi::load_field(&*self.store, site, query)
    }

    fn save_pod(&self, site: SiteId, pod: &Pod) -> SyncResult<PodId> {
        self.record(Op::SavePod, site);
        if self.fail_saves_on.lock().unwrap().contains(&site) {
            return Err(SyncError::Storage(format!("disk full on site {site}")));
        }
        PodApi::save_pod(&*self.store, site, pod)
    }
}

pub fn syncer(api: &Arc<RecordingApi>) -> PodSyncer {
    PodSyncer::new(api.clone(), api.store.clone())
}

pub fn load(store: &NetworkStore, site_id: u64, name: &str) -> Pod {
    store
        .load_pod(site(site_id), &PodRef::from(name))
        .unwrap()
        .unwrap_or_else(|| panic!("pod {name} missing on site {site_id}"))
}

pub fn field_id(store: &NetworkStore, site_id: u64, pod: &str, field: &str) -> FieldId {
    load(store, site_id, pod)
        .field(field)
        .and_then(|f| f.id)
        .unwrap_or_else(|| panic!("field {pod}.{field} missing on site {site_id}"))
}

/// Stores `venue` and `event` on a site, linked both ways through
/// `venue.events` and `event.location`, with `targets` as event's targets.
///
/// Returns the stored event pod.
pub fn seed_event_and_venue(store: &NetworkStore, site_id: u64, targets: Option<Value>) -> Pod {
    let s = site(site_id);
    store
        .save_pod(
            s,
            &Pod::new("venue")
                .with_field(Field::new("city", FieldType::Text))
                .with_field(Field::relation("events", "event")),
        )
        .unwrap();
    let events_id = field_id(store, site_id, "venue", "events");

    let mut event = Pod::new("event")
        .with_field(Field::new("title", FieldType::Text))
        .with_field(Field::relation("location", "venue").with_sister(events_id));
    if let Some(targets) = targets {
        event.options.insert(SYNC_TARGETS_KEY.to_string(), targets);
    }
    store.save_pod(s, &event).unwrap();
    let location_id = field_id(store, site_id, "event", "location");

    let mut venue = load(store, site_id, "venue");
    venue.field_mut("events").unwrap().sister_id = Some(location_id);
    store.save_pod(s, &venue).unwrap();

    load(store, site_id, "event")
}
