//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Apply the pragmas described by `StoreOptions`.
//! - Reject files that are not SQLite databases before handing them out.
//!
//! # Invariants
//! - Every open attempt emits exactly one terminal `db_open` event.
//! - Open failures are returned to the caller; the `warn` event is the only
//!   failure this crate logs.

use super::{DbError, DbResult};
use crate::config::StoreOptions;
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens a SQLite database file and configures it for store use.
///
/// The file is created when missing; its parent directory must exist.
///
/// # Errors
/// - `DbError::Open` when SQLite cannot open the path.
/// - `DbError::Bootstrap` when pragmas fail or the file is not a database.
pub fn open_db(path: impl AsRef<Path>, options: &StoreOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let result = Connection::open(path)
        .map_err(DbError::Open)
        .and_then(|conn| bootstrap_connection(conn, options));
    report_open("file", started_at, result)
}

/// Opens a private in-memory database configured like a file-backed one.
pub fn open_db_in_memory(options: &StoreOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(DbError::Open)
        .and_then(|conn| bootstrap_connection(conn, options));
    report_open("memory", started_at, result)
}

fn bootstrap_connection(conn: Connection, options: &StoreOptions) -> DbResult<Connection> {
    conn.pragma_update(None, "foreign_keys", options.foreign_keys)
        .map_err(DbError::Bootstrap)?;
    conn.busy_timeout(options.busy_timeout())
        .map_err(DbError::Bootstrap)?;
    // Pragmas above do not touch the file header; this read does.
    conn.query_row("SELECT count(*) FROM sqlite_master;", [], |row| {
        row.get::<_, i64>(0)
    })
    .map_err(DbError::Bootstrap)?;
    Ok(conn)
}

fn report_open(
    mode: &str,
    started_at: Instant,
    result: DbResult<Connection>,
) -> DbResult<Connection> {
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => {
            let error_code = match err {
                DbError::Open(_) => "db_open_failed",
                DbError::Bootstrap(_) | DbError::Close(_) => "db_bootstrap_failed",
            };
            warn!(
                "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={error_code} error={err}"
            );
        }
    }
    result
}
