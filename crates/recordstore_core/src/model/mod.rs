//! Caller-facing data shapes.
//!
//! # Responsibility
//! - Define the row, value and filter types passed across the store boundary.
//! - Stay free of connection state so values can be built anywhere.
//!
//! # Invariants
//! - Records are plain values; they never hold a reference back to the store.

pub mod filter;
pub mod record;
pub mod value;
