//! Filter-to-predicate translation.
//!
//! # Responsibility
//! - Turn a `FilterSpec` into a `WHERE` clause plus ordered bind parameters.
//! - Validate filter columns against the target table's allow-list.
//!
//! # Invariants
//! - Filter values only ever appear in `Predicate::params`, never in clause text.
//! - Clause text contains only quoted, schema-resolved columns and the join keyword.
//! - An empty filter yields an empty clause (no restriction).

use crate::db::schema::{quote_identifier, TableSchema};
use crate::error::{SchemaError, StoreError, StoreResult};
use crate::model::filter::FilterSpec;
use crate::model::value::Scalar;

/// Translated restriction: clause text and the values bound to its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    clause: String,
    params: Vec<Scalar>,
}

impl Predicate {
    /// The no-op predicate.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Clause text starting with ` WHERE`, or empty when unrestricted.
    pub fn clause(&self) -> &str {
        &self.clause
    }

    pub fn params(&self) -> &[Scalar] {
        &self.params
    }

    pub fn is_unrestricted(&self) -> bool {
        self.clause.is_empty()
    }
}

/// Translates filter specifications for one table.
pub struct FilterTranslator<'schema> {
    schema: &'schema TableSchema,
}

impl<'schema> FilterTranslator<'schema> {
    pub fn new(schema: &'schema TableSchema) -> Self {
        Self { schema }
    }

    /// Translates `filter`; `None` and empty specs both mean "no restriction".
    ///
    /// # Errors
    /// - `StoreError::Schema` when a filter column is not part of the table.
    /// - `StoreError::QueryTranslation` when a value is `NULL`, which `=` can never match.
    pub fn translate(&self, filter: Option<&FilterSpec>) -> StoreResult<Predicate> {
        let Some(filter) = filter.filter(|spec| !spec.is_empty()) else {
            return Ok(Predicate::unrestricted());
        };

        let mut comparisons = Vec::with_capacity(filter.len());
        let mut params = Vec::with_capacity(filter.len());
        for (column, value) in filter.entries() {
            let resolved = self.schema.resolve(column).ok_or_else(|| {
                StoreError::from(SchemaError::UnknownColumn {
                    table: self.schema.table().to_string(),
                    column: column.to_string(),
                })
            })?;
            if value.is_null() {
                return Err(StoreError::QueryTranslation(format!(
                    "column `{resolved}` cannot be matched against NULL with equality"
                )));
            }
            comparisons.push(format!("{} = ?", quote_identifier(resolved)));
            params.push(value.clone());
        }

        let separator = format!(" {} ", filter.mode().keyword());
        Ok(Predicate {
            clause: format!(" WHERE ({})", comparisons.join(&separator)),
            params,
        })
    }
}
