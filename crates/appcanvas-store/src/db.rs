//! Database connection management

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::errors::{from_rusqlite, io_error, Result};

/// Connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// How long a statement waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Open (creating if needed) a SQLite database file
///
/// Missing parent directories are created. The connection is configured
/// and switched to WAL journaling.
///
/// # Errors
/// `Io` if the directory cannot be created, `Persistence` otherwise.
pub fn open<P: AsRef<Path>>(path: P, options: &StoreOptions) -> Result<Connection> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| io_error("open_store", e))?;
    }

    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn, options)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))
        .map_err(from_rusqlite)?;
    tracing::debug!(path = %path.display(), "opened store");
    Ok(conn)
}

/// Open a configured in-memory database (for tests and dry runs)
///
/// # Errors
/// `Persistence` if SQLite cannot allocate the database.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn, &StoreOptions::default())?;
    Ok(conn)
}

/// Apply per-connection settings
///
/// Foreign keys are off by default in SQLite and are required here: they
/// keep parents inside one project and drive the subtree cascade.
///
/// # Errors
/// `Persistence` if a pragma is rejected.
pub fn configure(conn: &Connection, options: &StoreOptions) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;
    conn.busy_timeout(options.busy_timeout)
        .map_err(from_rusqlite)?;
    Ok(())
}
