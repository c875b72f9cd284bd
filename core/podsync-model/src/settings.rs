//! Admin settings surface for the multisite sync.
//!
//! The pod editor is extended with one tab holding one option: a
//! multi-select of the sites the pod is pushed to on save. Both are added
//! to the editor's existing definitions, which are free-form JSON maps.

use crate::SYNC_TARGETS_KEY;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Key of the pod editor tab.
pub const TAB_KEY: &str = "pods-multisite";

/// Visible label of the pod editor tab.
pub const TAB_LABEL: &str = "Multisite";

/// Definition of one option shown on a pod editor tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub label: String,
    pub help: String,
    pub description: String,
    #[serde(rename = "type")]
    pub option_type: String,
    pub default: Value,
    pub pick_object: String,
    pub pick_format_type: String,
}

impl OptionDefinition {
    /// The definition as the editor's option map stores it.
    pub fn to_json(&self) -> Value {
        json!({
            "label": self.label,
            "help": self.help,
            "description": self.description,
            "type": self.option_type,
            "default": self.default,
            "pick_object": self.pick_object,
            "pick_format_type": self.pick_format_type,
        })
    }
}

/// The "sites to sync to" option.
pub fn sync_targets_option() -> OptionDefinition {
    OptionDefinition {
        label: "Sync this Pod with other sites".to_string(),
        help: "This overwrites the the remote Pod data".to_string(),
        description: "Sync is not bi-directional by default. If you want to sync both ways \
                      you need to check the current site as well"
            .to_string(),
        option_type: "pick".to_string(),
        default: Value::String(String::new()),
        pick_object: "site".to_string(),
        pick_format_type: "multi".to_string(),
    }
}

/// Adds the multisite tab to the editor tabs.
pub fn register_tab(tabs: &mut Map<String, Value>) {
    tabs.insert(TAB_KEY.to_string(), Value::String(TAB_LABEL.to_string()));
}

/// Adds the multisite options, grouped under the tab key.
pub fn register_options(options: &mut Map<String, Value>) {
    let mut group = Map::new();
    group.insert(
        SYNC_TARGETS_KEY.to_string(),
        sync_targets_option().to_json(),
    );
    options.insert(TAB_KEY.to_string(), Value::Object(group));
}
