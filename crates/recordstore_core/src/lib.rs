//! Generic CRUD data-access layer over SQLite tables.
//! Callers own the schema; this crate owns query generation and execution.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;

pub use config::{StoreOptions, WholeTableMutation};
pub use error::{SchemaError, StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::filter::{FilterSpec, JoinMode};
pub use model::record::Record;
pub use model::value::Scalar;
pub use query::predicate::{FilterTranslator, Predicate};
pub use repo::record_store::RecordStore;
pub use repo::RecordRepository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
