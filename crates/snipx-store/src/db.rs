//! Database connection management
//!
//! Every process (and every thread) opens its own connection. Contention
//! between them is handled by SQLite: WAL journaling, a busy timeout, and
//! the unique index on short codes.

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};
use crate::migrations::apply_migrations;

/// How long a writer waits for a competing lock before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection for concurrent use
pub fn configure(conn: &Connection) -> Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(from_rusqlite)?;

    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    // In-memory databases report "memory" and stay that way
    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(journal_mode = %mode, "configured sqlite connection");

    Ok(())
}

/// Open, configure and migrate a database file
pub fn open_store<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let mut conn = open(path)?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// In-memory counterpart of [`open_store`]
pub fn open_store_in_memory() -> Result<Connection> {
    let mut conn = open_in_memory()?;
    configure(&conn)?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_enables_foreign_keys() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_file_database_uses_wal() {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_store(dir.path().join("snipx.db")).unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
