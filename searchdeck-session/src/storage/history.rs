//! SQLite-backed search history.
//!
//! An append-only log of past searches. Writes are gated by the
//! history-enabled flag; reads and clears are not. The connection lives
//! behind a mutex and every operation runs on the blocking pool.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};

use super::run_blocking;
use super::schema::{apply_schema, migrate_if_needed, read_schema_version};
use crate::category::Category;
use crate::error::{Result, SessionError};
use crate::types::HistoryEntry;

/// Database filename within the data directory.
pub const HISTORY_DB_FILENAME: &str = "history.db";

/// Persistent, versioned store of past searches.
#[derive(Debug)]
pub struct HistoryStore {
    conn: Arc<Mutex<Connection>>,
    enabled: AtomicBool,
    path: Option<PathBuf>,
}

impl HistoryStore {
    /// Open (or create) the database at `path` and apply the schema.
    ///
    /// Safe to call repeatedly against the same file.
    pub async fn open(path: &Path) -> Result<Self> {
        let db_path = path.to_path_buf();
        let conn = run_blocking(move || {
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SessionError::StorageUnavailable(format!(
                        "failed to create {}: {e}",
                        parent.display()
                    ))
                })?;
            }
            let conn = Connection::open(&db_path)?;
            apply_schema(&conn)?;
            migrate_if_needed(&conn)?;
            Ok(conn)
        })
        .await?;

        tracing::debug!(path = %path.display(), "history store opened");
        Ok(Self::from_connection(conn, Some(path.to_path_buf())))
    }

    /// Open the conventional database file inside `dir`.
    pub async fn open_in_dir(dir: &Path) -> Result<Self> {
        Self::open(&dir.join(HISTORY_DB_FILENAME)).await
    }

    /// An in-memory store that disappears with the process.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self::from_connection(conn, None))
    }

    fn from_connection(conn: Connection, path: Option<PathBuf>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            enabled: AtomicBool::new(true),
            path,
        }
    }

    /// Database file, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Re-apply the schema. Idempotent; existing rows are untouched.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.with_conn(|conn| {
            apply_schema(conn)?;
            migrate_if_needed(conn)?;
            Ok(())
        })
        .await
    }

    /// Schema version stamped in the database.
    pub async fn schema_version(&self) -> Result<Option<u32>> {
        self.with_conn(|conn| Ok(read_schema_version(conn)?)).await
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Append a search. Returns `Ok(None)` without writing when disabled.
    pub async fn add(&self, query: &str, category: &Category) -> Result<Option<HistoryEntry>> {
        if !self.is_enabled() {
            tracing::trace!("history disabled, not recording");
            return Ok(None);
        }

        let query = query.to_string();
        let category = category.clone();
        let timestamp = chrono::Utc::now().timestamp_millis();

        let entry = self
            .with_conn(move |conn| {
                conn.execute(
                    "INSERT INTO search_history (query, tab, timestamp) VALUES (?1, ?2, ?3)",
                    params![query, category.as_str(), timestamp],
                )?;
                Ok(HistoryEntry {
                    id: conn.last_insert_rowid(),
                    query,
                    category,
                    timestamp,
                })
            })
            .await?;
        tracing::debug!(id = entry.id, "history entry recorded");
        Ok(Some(entry))
    }

    /// All entries, most recent first.
    ///
    /// # Errors
    ///
    /// Any storage failure is reported as [`SessionError::HistoryUnavailable`].
    pub async fn list(&self) -> Result<Vec<HistoryEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, query, tab, timestamp FROM search_history ORDER BY id DESC",
            )?;
            let rows = stmt.query_map([], row_to_entry)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(|err| match err {
            SessionError::StorageUnavailable(msg) => SessionError::HistoryUnavailable(msg),
            other => SessionError::HistoryUnavailable(other.to_string()),
        })
    }

    /// Delete every entry, regardless of the enabled flag.
    ///
    /// Returns the number of rows removed.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self
            .with_conn(|conn| Ok(conn.execute("DELETE FROM search_history", [])?))
            .await?;
        tracing::debug!(removed, "history cleared");
        Ok(removed)
    }

    /// Number of stored entries.
    pub async fn len(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM search_history", [], |row| row.get(0))?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
        .await
    }

    async fn with_conn<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        run_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| SessionError::StorageUnavailable("history connection poisoned".into()))?;
            work(&guard)
        })
        .await
    }
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let tab: String = row.get(2)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        query: row.get(1)?,
        category: Category::from_tab(&tab),
        timestamp: row.get(3)?,
    })
}
