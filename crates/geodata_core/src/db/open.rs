//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Reject files that do not carry the reference-data schema.
//!
//! # Invariants
//! - Returned connections have `foreign_keys` set per `OpenOptions`.
//! - Missing files are never created unless `create_if_missing` is set.

use super::schema::{apply_schema, verify_schema};
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings applied by [`open_db`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOptions {
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout: Duration,
    /// Lets storage enforce declared `REFERENCES` clauses.
    pub foreign_keys: bool,
    /// Create the file and bundled schema when the path does not exist yet.
    pub create_if_missing: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            foreign_keys: true,
            create_if_missing: false,
        }
    }
}

/// Opens a SQLite database file and verifies the reference-data schema.
///
/// # Side effects
/// - Creates the file and schema when `options.create_if_missing` is set.
/// - Emits `db_open` logging events with duration and status.
///
/// # Errors
/// - [`DbError::EmptyPath`] for blank paths.
/// - [`DbError::Sqlite`] when the file is missing, unreadable or not a database.
/// - [`DbError::MissingRequiredTable`] / [`DbError::MissingRequiredColumn`]
///   when the schema does not match.
pub fn open_db(path: impl AsRef<Path>, options: &OpenOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    let path = path.as_ref();
    info!("event=db_open module=db status=start mode=file");

    if path.as_os_str().is_empty() {
        error!(
            "event=db_open module=db status=error mode=file duration_ms={} error_code=db_path_empty",
            started_at.elapsed().as_millis()
        );
        return Err(DbError::EmptyPath);
    }

    let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    if options.create_if_missing {
        flags |= OpenFlags::SQLITE_OPEN_CREATE;
    }

    let conn = match Connection::open_with_flags(path, flags) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite database with the bundled schema applied.
///
/// Every call yields an independent, empty database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    let options = OpenOptions {
        create_if_missing: true,
        ..OpenOptions::default()
    };
    match bootstrap_connection(&conn, &options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, options: &OpenOptions) -> DbResult<()> {
    let foreign_keys = if options.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(options.busy_timeout)?;
    if options.create_if_missing {
        apply_schema(conn)?;
    }
    verify_schema(conn)?;
    Ok(())
}
