//! SQLite storage layer for a Pods multisite network.
//!
//! Holds every site's pods and fields in one database, keyed by site.
//! Identifiers are allocated from a per-site sequence shared by pods and
//! fields, so the same logical record gets unrelated identifiers on
//! different sites.
//!
//! # Architecture
//!
//! - `sites` lists the network's sites; lookups against unknown sites fail
//! - `pods` / `fields` store schema records, options as JSON text
//! - The active-site stack models the host's switch/restore discipline

mod error;
mod network;

pub use error::{StoreError, StoreResult};
pub use network::NetworkStore;
