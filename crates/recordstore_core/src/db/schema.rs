//! Live table schema lookup.
//!
//! # Responsibility
//! - Report the columns of a table as SQLite currently sees them, generated
//!   columns included.
//! - Provide the column allow-list used to validate caller-supplied names.
//! - Quote identifiers for inclusion in generated SQL.
//!
//! # Invariants
//! - Names emitted into SQL are always schema-resolved and quoted.
//! - Lookups bind the table name as a parameter.

use rusqlite::Connection;

/// Column allow-list for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    table: String,
    columns: Vec<String>,
}

impl TableSchema {
    pub fn new(table: impl Into<String>, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads the column list of `table`, or `None` when no such table or view exists.
    pub fn load(conn: &Connection, table: &str) -> rusqlite::Result<Option<Self>> {
        // hidden: 0 plain, 1 hidden virtual-table column, 2/3 generated column.
        let mut stmt = conn.prepare_cached(
            "SELECT name FROM pragma_table_xinfo(?1) WHERE hidden IN (0, 2, 3) ORDER BY cid;",
        )?;
        let columns = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::new(table, columns)))
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Resolves `column` to its declared spelling using SQLite's case-insensitive match.
    pub fn resolve(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|declared| declared.eq_ignore_ascii_case(column))
            .map(String::as_str)
    }

    pub fn quoted_table(&self) -> String {
        quote_identifier(&self.table)
    }
}

/// Wraps `name` in double quotes, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
