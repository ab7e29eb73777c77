//! SQLite DDL for the search history store.

use rusqlite::{params, Connection};

/// Version stamped into `schema_meta` for fresh databases.
pub(crate) const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Complete DDL for the history database.
///
/// Uses `IF NOT EXISTS` throughout so `apply_schema` is idempotent.
pub(crate) const SCHEMA_SQL: &str = r#"
-- Schema version tracking.
CREATE TABLE IF NOT EXISTS schema_meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- One row per recorded search; the category is stored as `tab`.
CREATE TABLE IF NOT EXISTS search_history (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    query     TEXT NOT NULL,
    tab       TEXT NOT NULL,
    timestamp INTEGER NOT NULL
);
"#;

/// Apply the full schema to an open connection.
///
/// Seeds the schema version on a fresh database and never overwrites an
/// existing stamp.
pub(crate) fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        params![CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}

/// Read the current schema version.
///
/// Returns `None` if the key is missing or not a number.
pub(crate) fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<u32>> {
    let mut stmt = conn.prepare("SELECT value FROM schema_meta WHERE key = 'schema_version'")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().ok())
        }
        None => Ok(None),
    }
}

/// Bring an older database up to [`CURRENT_SCHEMA_VERSION`].
///
/// Version 1 is the first layout, so there are no steps yet beyond the stamp.
pub(crate) fn migrate_if_needed(conn: &Connection) -> rusqlite::Result<()> {
    let current = read_schema_version(conn)?.unwrap_or(0);
    if current >= CURRENT_SCHEMA_VERSION {
        return Ok(());
    }
    tracing::debug!(from = current, to = CURRENT_SCHEMA_VERSION, "stamping history schema");
    conn.execute(
        "INSERT OR REPLACE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        params![CURRENT_SCHEMA_VERSION.to_string()],
    )?;
    Ok(())
}
