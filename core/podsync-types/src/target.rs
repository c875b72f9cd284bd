//! Target entries from the "sites to sync to" option.
//!
//! The option is edited through an admin form, so entries arrive as loosely
//! typed JSON: numbers, numeric strings, or junk. An entry is usable only if
//! it denotes a positive integer site ID that is not the source site.

use crate::SiteId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One raw entry of a pod's sync-target list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetEntry(Value);

/// Why a target entry was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entry does not denote a positive integer.
    NotNumeric,
    /// The entry is the site the pod is being synced from.
    SourceSite,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumeric => write!(f, "not a site id"),
            Self::SourceSite => write!(f, "is the source site"),
        }
    }
}

impl TargetEntry {
    pub fn new(raw: impl Into<Value>) -> Self {
        Self(raw.into())
    }

    /// Returns the entry exactly as stored in the pod options.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Interprets the entry as a site ID.
    ///
    /// Accepts integers, integral floats and strings holding either, as long
    /// as the value is a positive integer. Everything else yields `None`.
    pub fn site(&self) -> Option<SiteId> {
        match &self.0 {
            Value::Number(n) => match n.as_u64() {
                Some(id) => SiteId::new(id),
                None => n.as_f64().and_then(integral_site),
            },
            Value::String(s) => {
                let s = s.trim();
                match s.parse::<u64>() {
                    Ok(id) => SiteId::new(id),
                    Err(_) => s.parse::<f64>().ok().and_then(integral_site),
                }
            }
            _ => None,
        }
    }

    /// Resolves the entry against the site the sync originates from.
    pub fn resolve(&self, source: SiteId) -> Result<SiteId, SkipReason> {
        match self.site() {
            None => Err(SkipReason::NotNumeric),
            Some(site) if site == source => Err(SkipReason::SourceSite),
            Some(site) => Ok(site),
        }
    }
}

fn integral_site(f: f64) -> Option<SiteId> {
    if f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f <= SiteId::MAX.get() as f64 {
        SiteId::new(f as u64)
    } else {
        None
    }
}

impl From<Value> for TargetEntry {
    fn from(raw: Value) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TargetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}
