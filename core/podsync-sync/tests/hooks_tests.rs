mod common;

use common::*;
use podsync_model::PodRef;
use podsync_sync::{PodHooks, PodSavedHandler};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl PodSavedHandler for Recorder {
    fn on_pod_saved(&self, pod: &PodRef) {
        self.seen.lock().unwrap().push(pod.to_string());
    }
}

#[test]
fn handlers_run_in_registration_order() {
    let first = Arc::new(Recorder::default());
    let second = Arc::new(Recorder::default());
    let mut hooks = PodHooks::new();
    assert!(hooks.is_empty());
    hooks.register(first.clone());
    hooks.register(second.clone());
    assert_eq!(hooks.len(), 2);

    hooks.dispatch_pod_saved(&PodRef::from("event"));

    assert_eq!(*first.seen.lock().unwrap(), vec!["pod event"]);
    assert_eq!(*second.seen.lock().unwrap(), vec!["pod event"]);
}

#[test]
fn syncer_as_handler_pushes_saved_pod() {
    let store = network(&[2]);
    seed_event_and_venue(&store, 1, Some(json!([2])));
    let api = RecordingApi::new(store.clone());
    let mut hooks = PodHooks::new();
    hooks.register(Arc::new(syncer(&api)));

    hooks.dispatch_pod_saved(&PodRef::from("event"));

    assert_eq!(store.pod_names(site(2)).unwrap(), vec!["event".to_string()]);
}

#[test]
fn handler_errors_do_not_stop_dispatch() {
    let store = network(&[2]);
    let api = RecordingApi::new(store);
    let after = Arc::new(Recorder::default());
    let mut hooks = PodHooks::new();
    hooks.register(Arc::new(syncer(&api)));
    hooks.register(after.clone());

    hooks.dispatch_pod_saved(&PodRef::from("missing"));

    assert_eq!(*after.seen.lock().unwrap(), vec!["pod missing"]);
}
