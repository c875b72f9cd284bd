use crate::OLD_NAME_KEY;
use podsync_types::{FieldId, PodId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One attribute definition within a pod.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Site-local identifier. `None` on a record that has not been stored yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldId>,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Identifier of the owning pod on the same site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_id: Option<PodId>,
    /// Name of the related pod. Only meaningful for relation fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_val: Option<String>,
    /// Paired field on the related pod. `None` means no bidirectional link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sister_id: Option<FieldId>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub options: Map<String, Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: None,
            name: name.into(),
            field_type,
            pod_id: None,
            pick_val: None,
            sister_id: None,
            options: Map::new(),
        }
    }

    /// Shorthand for a relation field pointing at `pod`.
    pub fn relation(name: impl Into<String>, pod: impl Into<String>) -> Self {
        Self {
            pick_val: Some(pod.into()),
            ..Self::new(name, FieldType::Pick)
        }
    }

    pub fn with_id(mut self, id: FieldId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_sister(mut self, sister: FieldId) -> Self {
        self.sister_id = Some(sister);
        self
    }

    /// Records `old_name` as the name this field had before a rename.
    pub fn with_old_name(mut self, old_name: impl Into<String>) -> Self {
        self.options
            .insert(OLD_NAME_KEY.to_string(), Value::String(old_name.into()));
        self
    }

    pub fn is_relation(&self) -> bool {
        self.field_type == FieldType::Pick
    }

    /// The previous name, if the field was renamed.
    ///
    /// Empty values and values equal to the current name do not count.
    pub fn old_name(&self) -> Option<&str> {
        self.options
            .get(OLD_NAME_KEY)
            .and_then(Value::as_str)
            .filter(|old| !old.is_empty() && *old != self.name)
    }

    /// The related pod name, if set and non-empty.
    pub fn related_pod(&self) -> Option<&str> {
        self.pick_val.as_deref().filter(|pod| !pod.is_empty())
    }
}

/// The storage/input type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Paragraph,
    Wysiwyg,
    Number,
    Currency,
    Boolean,
    Date,
    Datetime,
    Email,
    Website,
    File,
    /// Relationship to another pod.
    Pick,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Paragraph => "paragraph",
            Self::Wysiwyg => "wysiwyg",
            Self::Number => "number",
            Self::Currency => "currency",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Email => "email",
            Self::Website => "website",
            Self::File => "file",
            Self::Pick => "pick",
        };
        f.write_str(s)
    }
}

/// How a field is located through the schema API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldQuery {
    /// By site-local identifier. Unique across all pods of a site.
    Id(FieldId),
    /// By name within the pod with the given name.
    Named { name: String, pod: String },
}

impl FieldQuery {
    pub fn named(name: impl Into<String>, pod: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            pod: pod.into(),
        }
    }
}

impl fmt::Display for FieldQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "field #{id}"),
            Self::Named { name, pod } => write!(f, "field {pod}.{name}"),
        }
    }
}
