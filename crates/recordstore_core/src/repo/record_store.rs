//! SQLite-backed record store.
//!
//! # Responsibility
//! - Own the single connection used for all CRUD calls.
//! - Generate per-call SQL from the live table schema and caller filters.
//!
//! # Invariants
//! - A `RecordStore` value is always open; `close` consumes it and `Drop`
//!   releases the connection on every other path.
//! - Multi-column updates run as one statement inside one transaction.
//! - Whole-table `update`/`delete` follow `StoreOptions::whole_table_mutation`.

use crate::config::{StoreOptions, WholeTableMutation};
use crate::db::schema::{quote_identifier, TableSchema};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::error::{SchemaError, StoreError, StoreResult};
use crate::model::filter::{is_unrestricted, FilterSpec};
use crate::model::record::Record;
use crate::model::value::Scalar;
use crate::query::predicate::FilterTranslator;
use crate::repo::RecordRepository;
use log::{debug, warn};
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use std::time::Instant;

/// Generic CRUD access to caller-provisioned tables over one SQLite connection.
///
/// The store is `Send` but not `Sync`; share it across threads behind a mutex.
#[derive(Debug)]
pub struct RecordStore {
    conn: Connection,
    options: StoreOptions,
}

impl RecordStore {
    /// Opens the database at `path` with default options.
    ///
    /// # Errors
    /// - `StoreError::Connection` when the path is inaccessible or not a database.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_options(path, StoreOptions::default())
    }

    pub fn open_with_options(path: impl AsRef<Path>, options: StoreOptions) -> StoreResult<Self> {
        let conn = open_db(path, &options)?;
        Ok(Self { conn, options })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_in_memory_with_options(StoreOptions::default())
    }

    pub fn open_in_memory_with_options(options: StoreOptions) -> StoreResult<Self> {
        let conn = open_db_in_memory(&options)?;
        Ok(Self { conn, options })
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Underlying connection, for provisioning schema out of band.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, reporting failures that `Drop` would swallow.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Connection(DbError::Close(err)))?;
        debug!("event=db_close module=repo status=ok");
        Ok(())
    }

    fn schema(&self, table: &str) -> StoreResult<TableSchema> {
        TableSchema::load(&self.conn, table)?.ok_or_else(|| {
            StoreError::from(SchemaError::UnknownTable {
                table: table.to_string(),
            })
        })
    }

    fn guard_whole_table(
        &self,
        table: &str,
        operation: &'static str,
        filter: Option<&FilterSpec>,
    ) -> StoreResult<()> {
        if !is_unrestricted(filter) {
            return Ok(());
        }

        match self.options.whole_table_mutation {
            WholeTableMutation::Refuse => Err(StoreError::WholeTableMutationRefused {
                table: table.to_string(),
                operation,
            }),
            WholeTableMutation::Allow => {
                warn!(
                    "event=whole_table_mutation module=repo status=allowed operation={operation} table={table}"
                );
                Ok(())
            }
        }
    }
}

impl RecordRepository for RecordStore {
    fn create(&self, table: &str, record: &Record) -> StoreResult<i64> {
        let started_at = Instant::now();
        let schema = self.schema(table)?;

        let sql = if record.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES;", schema.quoted_table())
        } else {
            let columns = quoted_columns(&schema, record.columns())?;
            let marks = vec!["?"; columns.len()].join(", ");
            format!(
                "INSERT INTO {} ({}) VALUES ({marks});",
                schema.quoted_table(),
                columns.join(", ")
            )
        };

        self.conn.execute(&sql, params_from_iter(record.values()))?;
        let row_id = self.conn.last_insert_rowid();

        debug!(
            "event=record_create module=repo status=ok table={table} columns={} duration_ms={}",
            record.len(),
            started_at.elapsed().as_millis()
        );
        Ok(row_id)
    }

    fn read(&self, table: &str, filter: Option<&FilterSpec>) -> StoreResult<Vec<Record>> {
        let started_at = Instant::now();
        let schema = self.schema(table)?;
        let predicate = FilterTranslator::new(&schema).translate(filter)?;

        let sql = format!("SELECT * FROM {}{};", schema.quoted_table(), predicate.clause());
        let mut stmt = self.conn.prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params_from_iter(predicate.params()))?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Record::new();
            for (index, column) in columns.iter().enumerate() {
                record.insert(column.as_str(), row.get::<_, Scalar>(index)?);
            }
            records.push(record);
        }

        debug!(
            "event=record_read module=repo status=ok table={table} filters={} rows={} duration_ms={}",
            filter.map_or(0, FilterSpec::len),
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    fn update(
        &self,
        table: &str,
        data: &Record,
        filter: Option<&FilterSpec>,
    ) -> StoreResult<usize> {
        let started_at = Instant::now();
        let schema = self.schema(table)?;
        self.guard_whole_table(table, "update", filter)?;
        if data.is_empty() {
            return Ok(0);
        }

        let assignments: Vec<String> = quoted_columns(&schema, data.columns())?
            .into_iter()
            .map(|column| format!("{column} = ?"))
            .collect();
        let predicate = FilterTranslator::new(&schema).translate(filter)?;
        let sql = format!(
            "UPDATE {} SET {}{};",
            schema.quoted_table(),
            assignments.join(", "),
            predicate.clause()
        );

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            &sql,
            params_from_iter(data.values().chain(predicate.params())),
        )?;
        tx.commit()?;

        debug!(
            "event=record_update module=repo status=ok table={table} columns={} rows={changed} duration_ms={}",
            data.len(),
            started_at.elapsed().as_millis()
        );
        Ok(changed)
    }

    fn delete(&self, table: &str, filter: Option<&FilterSpec>) -> StoreResult<usize> {
        let started_at = Instant::now();
        let schema = self.schema(table)?;
        self.guard_whole_table(table, "delete", filter)?;

        let predicate = FilterTranslator::new(&schema).translate(filter)?;
        let sql = format!("DELETE FROM {}{};", schema.quoted_table(), predicate.clause());
        let changed = self
            .conn
            .execute(&sql, params_from_iter(predicate.params()))?;

        debug!(
            "event=record_delete module=repo status=ok table={table} rows={changed} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(changed)
    }
}

fn quoted_columns<'a>(
    schema: &TableSchema,
    columns: impl Iterator<Item = &'a str>,
) -> StoreResult<Vec<String>> {
    columns
        .map(|column| {
            schema.resolve(column).map(quote_identifier).ok_or_else(|| {
                StoreError::from(SchemaError::UnknownColumn {
                    table: schema.table().to_string(),
                    column: column.to_string(),
                })
            })
        })
        .collect()
}
