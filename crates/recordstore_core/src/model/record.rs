//! Row representation shared by write inputs and read results.
//!
//! # Responsibility
//! - Hold one row as an ordered column -> value mapping.
//! - Preserve caller insertion order so generated SQL is deterministic.
//!
//! # Invariants
//! - Column names are unique under SQLite's ASCII case-insensitive rules.
//! - Records read from the store carry exactly the columns the query reported.

use crate::model::value::Scalar;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One table row as ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Scalar)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, see [`Record::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.insert(column, value);
        self
    }

    /// Sets `column` to `value`.
    ///
    /// Replaces the existing value in place when the column is already present,
    /// returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Option<Scalar> {
        let column = column.into();
        let value = value.into();
        match self.position(&column) {
            Some(index) => Some(std::mem::replace(&mut self.fields[index].1, value)),
            None => {
                self.fields.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.position(column).map(|index| &self.fields[index].1)
    }

    pub fn remove(&mut self, column: &str) -> Option<Scalar> {
        self.position(column)
            .map(|index| self.fields.remove(index).1)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(column, _)| column.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Scalar> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns true when every column of `other` is present here with an equal value.
    pub fn contains_all(&self, other: &Record) -> bool {
        other
            .iter()
            .all(|(column, value)| self.get(column) == Some(value))
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(column))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Scalar);
    type IntoIter = std::vec::IntoIter<(String, Scalar)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

// Serialized as a JSON-style object so collaborators can forward rows as-is.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (column, value) in &self.fields {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}
