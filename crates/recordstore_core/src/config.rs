//! Store configuration.
//!
//! # Responsibility
//! - Describe connection pragmas applied at open time.
//! - Carry the whole-table mutation policy consulted by `update`/`delete`.
//!
//! # Invariants
//! - `StoreOptions::default()` preserves unrestricted whole-table mutation.
//! - Every field has a default, so partial config documents deserialize.

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Policy for `update`/`delete` calls that carry no filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WholeTableMutation {
    /// An absent or empty filter affects every row of the table.
    #[default]
    Allow,
    /// An absent or empty filter fails with `WholeTableMutationRefused`.
    Refuse,
}

/// Options applied when opening a `RecordStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    pub foreign_keys: bool,
    pub busy_timeout_ms: u64,
    pub whole_table_mutation: WholeTableMutation,
}

impl StoreOptions {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn with_whole_table_mutation(mut self, policy: WholeTableMutation) -> Self {
        self.whole_table_mutation = policy;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            foreign_keys: true,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            whole_table_mutation: WholeTableMutation::Allow,
        }
    }
}
