//! Store error taxonomy.
//!
//! # Responsibility
//! - Give callers distinguishable failure kinds for every store operation.
//! - Classify raw SQLite failures into those kinds.
//!
//! # Invariants
//! - Constraint failures always surface as `ConstraintViolation`.
//! - Failures detected before execution leave the database untouched.

use crate::db::DbError;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

static SCHEMA_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:no such table|no such column|table \S+ has no column named)")
        .expect("schema message pattern is valid")
});

pub type StoreResult<T> = Result<T, StoreError>;

/// Reason a table or column reference was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    UnknownTable { table: String },
    UnknownColumn { table: String, column: String },
    /// Schema failure reported by SQLite during execution.
    Reported(String),
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTable { table } => write!(f, "no such table: {table}"),
            Self::UnknownColumn { table, column } => {
                write!(f, "table {table} has no column named {column}")
            }
            Self::Reported(message) => f.write_str(message),
        }
    }
}

/// Failure of a `RecordStore` operation.
#[derive(Debug)]
pub enum StoreError {
    Connection(DbError),
    Schema(SchemaError),
    ConstraintViolation(rusqlite::Error),
    QueryTranslation(String),
    WholeTableMutationRefused {
        table: String,
        operation: &'static str,
    },
    Sqlite(rusqlite::Error),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }

    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "{err}"),
            Self::Schema(err) => write!(f, "schema error: {err}"),
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::QueryTranslation(message) => write!(f, "invalid filter: {message}"),
            Self::WholeTableMutationRefused { table, operation } => write!(
                f,
                "refusing {operation} on every row of {table}: no filter given and whole-table mutation is disabled"
            ),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::ConstraintViolation(err) | Self::Sqlite(err) => Some(err),
            Self::Schema(_) | Self::QueryTranslation(_) | Self::WholeTableMutationRefused { .. } => {
                None
            }
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Connection(value)
    }
}

impl From<SchemaError> for StoreError {
    fn from(value: SchemaError) -> Self {
        Self::Schema(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        match &value {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Self::ConstraintViolation(value)
            }
            rusqlite::Error::SqliteFailure(_, Some(message))
                if SCHEMA_MESSAGE.is_match(message) =>
            {
                Self::Schema(SchemaError::Reported(message.clone()))
            }
            _ => Self::Sqlite(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SchemaError, StoreError};
    use rusqlite::Connection;

    fn fresh() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE);")
            .unwrap();
        conn
    }

    #[test]
    fn unique_failure_is_constraint_violation() {
        let conn = fresh();
        conn.execute("INSERT INTO t (name) VALUES ('a');", []).unwrap();
        let err = conn
            .execute("INSERT INTO t (name) VALUES ('a');", [])
            .unwrap_err();

        assert!(StoreError::from(err).is_constraint_violation());
    }

    #[test]
    fn not_null_failure_is_constraint_violation() {
        let conn = fresh();
        let err = conn.execute("INSERT INTO t (id) VALUES (1);", []).unwrap_err();

        assert!(StoreError::from(err).is_constraint_violation());
    }

    #[test]
    fn missing_objects_are_schema_errors() {
        let conn = fresh();
        let table_err = conn.execute("DELETE FROM ghost;", []).unwrap_err();
        let column_err = conn
            .execute("INSERT INTO t (nope) VALUES (1);", [])
            .unwrap_err();

        assert!(matches!(
            StoreError::from(table_err),
            StoreError::Schema(SchemaError::Reported(message)) if message.contains("ghost")
        ));
        assert!(StoreError::from(column_err).is_schema());
    }

    #[test]
    fn other_failures_stay_sqlite_errors() {
        let conn = fresh();
        let err = conn.execute("NOT SQL AT ALL", []).unwrap_err();

        assert!(matches!(StoreError::from(err), StoreError::Sqlite(_)));
    }
}
