//! Multisite pod store backed by SQLite.

use crate::error::{StoreError, StoreResult};
use podsync_model::{Field, FieldQuery, FieldType, Pod, PodRef};
use podsync_types::{FieldId, PodId, SiteId};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

const FIELD_COLUMNS: &str =
    "f.id, f.pod_id, f.name, f.field_type, f.pick_val, f.sister_id, f.options";

/// Persistent store for every site's pods and fields.
pub struct NetworkStore {
    conn: Arc<Mutex<Connection>>,
    /// Site that is active when nothing has been switched.
    home: SiteId,
    /// Sites entered through `switch_to`, innermost last.
    active: Mutex<Vec<SiteId>>,
}

impl NetworkStore {
    /// Opens (or creates) a store at the given path.
    ///
    /// The home site is registered if it does not exist yet.
    pub fn open(path: impl AsRef<Path>, home: SiteId) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn, home)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory(home: SiteId) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, home)
    }

    fn with_connection(conn: Connection, home: SiteId) -> StoreResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            home,
            active: Mutex::new(Vec::new()),
        };
        store.init_schema()?;
        store.add_site(home, "main")?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS sites (
                id INTEGER PRIMARY KEY,
                domain TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS id_sequence (
                site_id INTEGER PRIMARY KEY,
                next_id INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pods (
                site_id INTEGER NOT NULL,
                id INTEGER NOT NULL,
                name TEXT NOT NULL,
                options TEXT NOT NULL,
                PRIMARY KEY (site_id, id),
                UNIQUE (site_id, name)
            );

            CREATE TABLE IF NOT EXISTS fields (
                site_id INTEGER NOT NULL,
                id INTEGER NOT NULL,
                pod_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                field_type TEXT NOT NULL,
                pick_val TEXT,
                sister_id INTEGER,
                options TEXT NOT NULL,
                weight INTEGER NOT NULL,
                PRIMARY KEY (site_id, id),
                UNIQUE (site_id, pod_id, name)
            );
            ",
        )?;
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    // ── Sites ────────────────────────────────────────────────────

    /// Registers a site. Registering an existing site is a no-op.
    pub fn add_site(&self, site: SiteId, domain: &str) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR IGNORE INTO sites (id, domain) VALUES (?1, ?2)",
            params![sql_id(site.get())?, domain],
        )?;
        Ok(())
    }

    /// Lists all sites in ascending order.
    pub fn sites(&self) -> StoreResult<Vec<SiteId>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id FROM sites ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        ids.into_iter()
            .map(|id| {
                SiteId::new(id as u64)
                    .ok_or_else(|| StoreError::InvalidData(format!("site id {id}")))
            })
            .collect()
    }

    pub fn has_site(&self, site: SiteId) -> StoreResult<bool> {
        let conn = self.lock()?;
        site_exists(&conn, site)
    }

    pub fn home_site(&self) -> SiteId {
        self.home
    }

    // ── Active site ──────────────────────────────────────────────

    /// The site lookups default to: the innermost switched site, or home.
    pub fn current_site(&self) -> SiteId {
        let active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.last().copied().unwrap_or(self.home)
    }

    /// Makes `site` the active site until the matching `restore`.
    pub fn switch_to(&self, site: SiteId) -> StoreResult<()> {
        if !self.has_site(site)? {
            return Err(StoreError::SiteNotFound(site));
        }
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        active.push(site);
        debug!("Switched to site {} (depth {})", site, active.len());
        Ok(())
    }

    /// Returns to the site active before the last `switch_to`.
    ///
    /// Returns the site that was left, or `None` if nothing was switched.
    pub fn restore(&self) -> Option<SiteId> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let left = active.pop();
        if let Some(site) = left {
            debug!("Restored from site {} (depth {})", site, active.len());
        }
        left
    }

    /// Number of `switch_to` calls not yet restored.
    pub fn switch_depth(&self) -> usize {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    // ── Pods ─────────────────────────────────────────────────────

    /// Loads a pod with its fields, in field order.
    pub fn load_pod(&self, site: SiteId, pod: &PodRef) -> StoreResult<Option<Pod>> {
        let conn = self.lock()?;
        let row = match pod {
            PodRef::Id(id) => conn
                .query_row(
                    "SELECT id, name, options FROM pods WHERE site_id = ?1 AND id = ?2",
                    params![sql_id(site.get())?, sql_id(id.get())?],
                    pod_row,
                )
                .optional()?,
            PodRef::Name(name) => conn
                .query_row(
                    "SELECT id, name, options FROM pods WHERE site_id = ?1 AND name = ?2",
                    params![sql_id(site.get())?, name],
                    pod_row,
                )
                .optional()?,
        };

        let Some((id, name, options)) = row else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
            "SELECT {FIELD_COLUMNS} FROM fields f
             WHERE f.site_id = ?1 AND f.pod_id = ?2
             ORDER BY f.weight, f.id"
        ))?;
        let rows = stmt
            .query_map(params![sql_id(site.get())?, id], FieldRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(Pod {
            id: Some(PodId::new(id as u64)),
            name,
            fields: rows
                .into_iter()
                .map(FieldRow::into_field)
                .collect::<StoreResult<_>>()?,
            options: parse_options(&options)?,
        }))
    }

    /// Loads a single field by identifier or by `{name, pod}`.
    pub fn load_field(&self, site: SiteId, query: &FieldQuery) -> StoreResult<Option<Field>> {
        let conn = self.lock()?;
        let row = match query {
            FieldQuery::Id(id) => conn
                .query_row(
                    &format!("SELECT {FIELD_COLUMNS} FROM fields f WHERE f.site_id = ?1 AND f.id = ?2"),
                    params![sql_id(site.get())?, sql_id(id.get())?],
                    FieldRow::from_row,
                )
                .optional()?,
            FieldQuery::Named { name, pod } => conn
                .query_row(
                    &format!(
                        "SELECT {FIELD_COLUMNS} FROM fields f
                         JOIN pods p ON p.site_id = f.site_id AND p.id = f.pod_id
                         WHERE f.site_id = ?1 AND p.name = ?2 AND f.name = ?3"
                    ),
                    params![sql_id(site.get())?, pod, name],
                    FieldRow::from_row,
                )
                .optional()?,
        };
        row.map(FieldRow::into_field).transpose()
    }

    /// Inserts or updates a pod and its fields.
    ///
    /// A pod or field carrying an identifier updates that record; one
    /// without gets a fresh identifier. Fields of the stored pod that are
    /// missing from `pod` are kept. Every saved field is bound to the saved
    /// pod regardless of its own `pod_id`.
    pub fn save_pod(&self, site: SiteId, pod: &Pod) -> StoreResult<PodId> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        if !site_exists(&tx, site)? {
            return Err(StoreError::SiteNotFound(site));
        }
        let site_key = sql_id(site.get())?;
        let options = serde_json::to_string(&pod.options)?;

        let pod_id = match pod.id {
            Some(id) => {
                let updated = tx.execute(
                    "UPDATE pods SET name = ?3, options = ?4 WHERE site_id = ?1 AND id = ?2",
                    params![site_key, sql_id(id.get())?, pod.name, options],
                )?;
                if updated == 0 {
                    return Err(StoreError::NotFound(format!("pod #{id} on site {site}")));
                }
                id
            }
            None => {
                let id = next_id(&tx, site)?;
                tx.execute(
                    "INSERT INTO pods (site_id, id, name, options) VALUES (?1, ?2, ?3, ?4)",
                    params![site_key, sql_id(id)?, pod.name, options],
                )?;
                PodId::new(id)
            }
        };

        for (weight, field) in pod.fields.iter().enumerate() {
            let options = serde_json::to_string(&field.options)?;
            let field_type = field.field_type.to_string();
            let sister = field.sister_id.map(|s| sql_id(s.get())).transpose()?;
            let updated = match field.id {
                Some(id) => tx.execute(
                    "UPDATE fields SET pod_id = ?3, name = ?4, field_type = ?5, pick_val = ?6,
                         sister_id = ?7, options = ?8, weight = ?9
                     WHERE site_id = ?1 AND id = ?2",
                    params![
                        site_key,
                        sql_id(id.get())?,
                        sql_id(pod_id.get())?,
                        field.name,
                        field_type,
                        field.pick_val,
                        sister,
                        options,
                        weight as i64,
                    ],
                )?,
                None => 0,
            };
            if updated == 0 {
                let id = next_id(&tx, site)?;
                tx.execute(
                    "INSERT INTO fields
                         (site_id, id, pod_id, name, field_type, pick_val, sister_id, options, weight)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        site_key,
                        sql_id(id)?,
                        sql_id(pod_id.get())?,
                        field.name,
                        field_type,
                        field.pick_val,
                        sister,
                        options,
                        weight as i64,
                    ],
                )?;
            }
        }

        tx.commit()?;
        debug!("Saved pod {} as #{} on site {}", pod.name, pod_id, site);
        Ok(pod_id)
    }

    /// Number of pods stored on a site.
    pub fn pod_count(&self, site: SiteId) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM pods WHERE site_id = ?1",
            params![sql_id(site.get())?],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Names of the pods stored on a site, alphabetically.
    pub fn pod_names(&self, site: SiteId) -> StoreResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT name FROM pods WHERE site_id = ?1 ORDER BY name")?;
        let names = stmt
            .query_map(params![sql_id(site.get())?], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }
}

/// Converts an identifier to SQLite's signed integer, rejecting values
/// that would wrap.
fn sql_id(id: u64) -> StoreResult<i64> {
    i64::try_from(id).map_err(|_| StoreError::InvalidData(format!("id {id} out of range")))
}

fn site_exists(conn: &Connection, site: SiteId) -> StoreResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sites WHERE id = ?1",
            params![sql_id(site.get())?],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Allocates the next identifier in a site's namespace.
fn next_id(tx: &Transaction<'_>, site: SiteId) -> StoreResult<u64> {
    let site_key = sql_id(site.get())?;
    tx.execute(
        "INSERT OR IGNORE INTO id_sequence (site_id, next_id) VALUES (?1, 1)",
        params![site_key],
    )?;
    let id: i64 = tx.query_row(
        "SELECT next_id FROM id_sequence WHERE site_id = ?1",
        params![site_key],
        |row| row.get(0),
    )?;
    tx.execute(
        "UPDATE id_sequence SET next_id = next_id + 1 WHERE site_id = ?1",
        params![site_key],
    )?;
    Ok(id as u64)
}

fn pod_row(row: &Row<'_>) -> rusqlite::Result<(i64, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn parse_options(raw: &str) -> StoreResult<Map<String, Value>> {
    match serde_json::from_str(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidData(format!("options must be an object, got {other}"))),
    }
}

/// Raw `fields` row, converted outside the rusqlite callback so option
/// parsing errors keep their own type.
struct FieldRow {
    id: i64,
    pod_id: i64,
    name: String,
    field_type: String,
    pick_val: Option<String>,
    sister_id: Option<i64>,
    options: String,
}

impl FieldRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            pod_id: row.get(1)?,
            name: row.get(2)?,
            field_type: row.get(3)?,
            pick_val: row.get(4)?,
            sister_id: row.get(5)?,
            options: row.get(6)?,
        })
    }

    fn into_field(self) -> StoreResult<Field> {
        let field_type: FieldType =
            serde_json::from_value(Value::String(self.field_type.clone())).map_err(|_| {
                StoreError::InvalidData(format!(
                    "unknown field type {} on field {}",
                    self.field_type, self.name
                ))
            })?;
        Ok(Field {
            id: Some(FieldId::new(self.id as u64)),
            name: self.name,
            field_type,
            pod_id: Some(PodId::new(self.pod_id as u64)),
            pick_val: self.pick_val,
            sister_id: self.sister_id.map(|id| FieldId::new(id as u64)),
            options: parse_options(&self.options)?,
        })
    }
}
