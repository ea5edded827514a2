//! Bulk CSV import into the record store.
//!
//! # Responsibility
//! - Parse header-row CSV into ordered row mappings.
//! - Check for the expected artifact columns and hand the proceed/abort
//!   decision to the caller when some are missing.
//! - Feed each row to [`crate::RecordStore::add`].
//!
//! # Invariants
//! - Rows are committed one by one; there is no batch transaction.
//! - A parse failure writes nothing.

pub mod parser;
pub mod reconcile;
