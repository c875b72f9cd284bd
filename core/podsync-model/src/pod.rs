use crate::{Field, OLD_NAME_KEY};
use podsync_types::{PodId, TargetEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A user-defined content type and its fields.
///
/// Field names are unique within a pod; `fields` keeps the admin-defined
/// order. Options are free-form and owned by the admin UI, apart from the
/// keys this workspace reads (`old_name`, the sync-target list).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PodId>,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl Pod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            fields: Vec::new(),
            options: Map::new(),
        }
    }

    pub fn with_id(mut self, id: PodId) -> Self {
        self.id = Some(id);
        self
    }

    /// Adds a field, replacing any existing field of the same name.
    pub fn with_field(mut self, field: Field) -> Self {
        self.insert_field(field);
        self
    }

    pub fn with_old_name(mut self, old_name: impl Into<String>) -> Self {
        self.options
            .insert(OLD_NAME_KEY.to_string(), Value::String(old_name.into()));
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Inserts a field, replacing the one with the same name in place.
    pub fn insert_field(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// The previous name, if the pod was renamed.
    pub fn old_name(&self) -> Option<&str> {
        self.options
            .get(OLD_NAME_KEY)
            .and_then(Value::as_str)
            .filter(|old| !old.is_empty() && *old != self.name)
    }

    /// Reads the sync-target list stored under `key`.
    ///
    /// Returns `None` unless the option holds a non-empty array.
    pub fn sync_targets(&self, key: &str) -> Option<Vec<TargetEntry>> {
        match self.options.get(key) {
            Some(Value::Array(entries)) if !entries.is_empty() => {
                Some(entries.iter().cloned().map(TargetEntry::from).collect())
            }
            _ => None,
        }
    }

    /// Clears the pod identifier and every field identifier.
    ///
    /// Relation data (`pick_val`, `sister_id`) and `pod_id` are left alone.
    pub fn strip_ids(&mut self) {
        self.id = None;
        for field in &mut self.fields {
            field.id = None;
        }
    }
}

/// How a pod is located through the schema API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PodRef {
    Id(PodId),
    Name(String),
}

impl From<PodId> for PodRef {
    fn from(id: PodId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for PodRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PodRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Pod> for PodRef {
    fn from(pod: &Pod) -> Self {
        match pod.id {
            Some(id) => Self::Id(id),
            None => Self::Name(pod.name.clone()),
        }
    }
}

impl fmt::Display for PodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "pod #{id}"),
            Self::Name(name) => write!(f, "pod {name}"),
        }
    }
}
