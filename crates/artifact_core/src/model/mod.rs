//! Domain model for catalogued artifacts.
//!
//! # Responsibility
//! - Define the record shape shared by the store, the importer and callers.
//!
//! # Invariants
//! - Every persisted artifact is identified by a store-assigned `ArtifactId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod artifact;
