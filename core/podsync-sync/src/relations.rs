//! Relation fields and their sister definitions.
//!
//! Sister links are stored as field identifiers, which mean nothing on
//! another site. Before leaving the source site the syncer records, for each
//! bidirectional relation, the sister field's full definition so it can be
//! found again by name on every target.

use crate::api::PodApi;
use crate::error::SyncResult;
use podsync_model::{Field, FieldQuery, Pod};
use podsync_types::SiteId;
use std::collections::BTreeMap;
use tracing::debug;

/// A bidirectional relation of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// The sister field as loaded on the source site. `None` if its
    /// identifier no longer resolves there.
    pub sister: Option<Field>,
    /// Name of the related pod, which owns the sister field.
    pub pod: String,
}

/// Relationships keyed by the name of the relation field.
pub type Relationships = BTreeMap<String, Relationship>;

/// Collects every relation field that has both a sister and a related pod.
///
/// Must run against the site that issued the sister identifiers.
pub fn extract_relationships(
    api: &dyn PodApi,
    source: SiteId,
    pod: &Pod,
) -> SyncResult<Relationships> {
    let mut relationships = Relationships::new();

    for field in &pod.fields {
        if !field.is_relation() {
            continue;
        }
        let (Some(sister_id), Some(related)) = (field.sister_id, field.related_pod()) else {
            continue;
        };

        let sister = api.load_field(source, &FieldQuery::Id(sister_id))?;
        if sister.is_none() {
            debug!(
                "Sister field #{} of {}.{} not found on site {}",
                sister_id, pod.name, field.name, source
            );
        }

        relationships.insert(
            field.name.clone(),
            Relationship {
                sister,
                pod: related.to_string(),
            },
        );
    }

    Ok(relationships)
}
