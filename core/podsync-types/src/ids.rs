//! Identifier types used throughout the sync core.
//!
//! Every identifier is a per-site integer. The same logical pod or field
//! has different identifiers on different sites, so none of these types
//! carry any meaning outside the site that issued them.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a site (tenant) within a multisite network.
/// Always a positive integer no larger than [`SiteId::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SiteId(u64);

impl SiteId {
    /// Largest site ID: sites are keyed by signed 64-bit integers in storage.
    pub const MAX: Self = Self(i64::MAX as u64);

    /// Creates a site ID, rejecting zero and values above [`SiteId::MAX`].
    #[must_use]
    pub const fn new(id: u64) -> Option<Self> {
        if id == 0 || id > Self::MAX.0 { None } else { Some(Self(id)) }
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for SiteId {
    type Error = Error;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id).ok_or_else(|| Error::InvalidSite(id.to_string()))
    }
}

impl From<SiteId> for u64 {
    fn from(id: SiteId) -> Self {
        id.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SiteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSite(s.to_string()))?;
        Self::try_from(id)
    }
}

/// Identifier of a pod on one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodId(u64);

impl PodId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PodId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(Self)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}

/// Identifier of a field on one site.
///
/// Field identifiers share the site's namespace, not the pod's: a lookup
/// by field ID alone is unambiguous within a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(u64);

impl FieldId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FieldId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(Self)
            .map_err(|_| Error::InvalidId(s.to_string()))
    }
}
