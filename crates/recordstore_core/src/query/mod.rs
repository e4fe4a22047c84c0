//! Query construction helpers.
//!
//! # Responsibility
//! - Translate caller filters into engine-consumable predicates.
//! - Keep value binding separate from generated SQL text.

pub mod predicate;
