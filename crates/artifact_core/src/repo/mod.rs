//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for artifacts.
//! - Isolate SQLite query details from store orchestration.
//!
//! # Invariants
//! - Repositories borrow a connection; they never open or close one.
//! - Repository APIs report storage failures only. Missing rows are
//!   `None`/`false`, never errors.

pub mod artifact_repo;
