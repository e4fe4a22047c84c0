//! Equality filter specification.
//!
//! # Invariants
//! - One join mode applies uniformly to every entry.
//! - An empty spec means "no restriction".

use crate::model::record::Record;
use crate::model::value::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Boolean connective joining filter entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinMode {
    #[default]
    And,
    Or,
}

impl JoinMode {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl Display for JoinMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Column equality constraints plus the mode joining them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    entries: Record,
    mode: JoinMode,
}

impl FilterSpec {
    pub fn new(mode: JoinMode) -> Self {
        Self {
            entries: Record::new(),
            mode,
        }
    }

    /// Conjunctive filter over `(column, value)` pairs.
    pub fn and<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        Self {
            entries: entries.into_iter().collect(),
            mode: JoinMode::And,
        }
    }

    /// Disjunctive filter over `(column, value)` pairs.
    pub fn or<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        Self {
            entries: entries.into_iter().collect(),
            mode: JoinMode::Or,
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.entries.insert(column, value);
        self
    }

    pub fn mode(&self) -> JoinMode {
        self.mode
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exact-match filter on every field of `record`, joined with `AND`.
impl From<&Record> for FilterSpec {
    fn from(record: &Record) -> Self {
        Self {
            entries: record.clone(),
            mode: JoinMode::And,
        }
    }
}

/// Returns true when `filter` restricts nothing.
pub(crate) fn is_unrestricted(filter: Option<&FilterSpec>) -> bool {
    filter.map_or(true, FilterSpec::is_empty)
}
