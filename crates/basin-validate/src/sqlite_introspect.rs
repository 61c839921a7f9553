//! Bounded, read-only introspection of embedded SQLite stores.
//!
//! Only the catalog (`sqlite_master`) and `PRAGMA table_info` are consulted;
//! no data rows are ever scanned.

use std::collections::BTreeSet;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};

/// Open a store read-only and probe the catalog so that a file which is not
/// a database fails here instead of on a later query.
pub(crate) fn open_readonly(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(()))?;
    Ok(conn)
}

/// Case-insensitive table or view existence.
pub(crate) fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type IN ('table','view') AND lower(name) = lower(?1)",
    )?;
    stmt.exists(params![name])
}

/// Table and view names with the given case-insensitive prefix, sorted,
/// at most `limit` of them.
pub(crate) fn tables_with_prefix(
    conn: &Connection,
    prefix: &str,
    limit: usize,
) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type IN ('table','view') \
         AND lower(name) LIKE lower(?1) ORDER BY name LIMIT ?2",
    )?;
    let names = stmt
        .query_map(params![format!("{prefix}%"), limit as i64], |row| {
            row.get::<_, String>(0)
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(names)
}

/// Lowercased column names of a table. Sorted so reports built from this
/// set are byte-identical across runs.
pub(crate) fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<BTreeSet<String>> {
    // PRAGMA does not take bound parameters; escape quotes by hand.
    let sql = format!("PRAGMA table_info('{}')", table.replace('\'', "''"));
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns
        .into_iter()
        .map(|name| name.to_ascii_lowercase())
        .collect())
}
