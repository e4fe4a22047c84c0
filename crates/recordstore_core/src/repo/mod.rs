//! Repository layer abstractions and the SQLite record store.
//!
//! # Responsibility
//! - Define the table-scoped CRUD contract consumed by collaborators.
//! - Keep SQL generation and execution inside the core persistence boundary.
//!
//! # Invariants
//! - Table and column names are validated against the live schema before use.
//! - Filter values reach SQLite only as bound parameters.

pub mod record_store;

use crate::error::{StoreError, StoreResult};
use crate::model::filter::FilterSpec;
use crate::model::record::Record;

/// Table-scoped CRUD contract.
///
/// `update` and `delete` treat an absent or empty filter as "every row".
/// Implementations may refuse that case through configuration, but must never
/// silently narrow it.
pub trait RecordRepository {
    /// Inserts `record` into `table` and returns the new row id.
    fn create(&self, table: &str, record: &Record) -> StoreResult<i64>;

    /// Returns all rows of `table` matching `filter`, in engine order.
    fn read(&self, table: &str, filter: Option<&FilterSpec>) -> StoreResult<Vec<Record>>;

    /// Sets every column of `data` on rows matching `filter`; returns rows changed.
    fn update(&self, table: &str, data: &Record, filter: Option<&FilterSpec>)
        -> StoreResult<usize>;

    /// Deletes rows matching `filter`; returns rows removed.
    fn delete(&self, table: &str, filter: Option<&FilterSpec>) -> StoreResult<usize>;

    /// Inserts `record` unless a constraint rejects it.
    ///
    /// Returns `false` on `ConstraintViolation`; other failures propagate.
    fn create_if_absent(&self, table: &str, record: &Record) -> StoreResult<bool> {
        match self.create(table, record) {
            Ok(_) => Ok(true),
            Err(StoreError::ConstraintViolation(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Inserts `record`, then reads back the last row equal to it on every
    /// non-null supplied column.
    ///
    /// Picks up store-generated defaults such as autoincrement ids. When the
    /// supplied columns are not unique, the returned row is whichever matching
    /// row the engine yields last.
    fn create_and_read(&self, table: &str, record: &Record) -> StoreResult<Option<Record>> {
        self.create(table, record)?;

        let filter = FilterSpec::and(
            record
                .iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(column, value)| (column, value.clone())),
        );
        let mut rows = self.read(table, Some(&filter))?;
        Ok(rows.pop())
    }
}

