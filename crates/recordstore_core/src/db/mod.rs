//! SQLite connection bootstrap and schema introspection.
//!
//! # Responsibility
//! - Open and configure the single connection owned by a `RecordStore`.
//! - Resolve table and column names against the live schema.
//!
//! # Invariants
//! - A returned connection has its pragmas applied and its file header verified.
//! - This layer never creates or migrates application tables.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Connection lifecycle failure.
#[derive(Debug)]
pub enum DbError {
    /// The file could not be opened at all.
    Open(rusqlite::Error),
    /// The file opened but pragmas or the header probe failed.
    Bootstrap(rusqlite::Error),
    /// Closing the connection failed.
    Close(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "failed to open database: {err}"),
            Self::Bootstrap(err) => write!(f, "failed to initialize database: {err}"),
            Self::Close(err) => write!(f, "failed to close database: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Bootstrap(err) | Self::Close(err) => Some(err),
        }
    }
}
