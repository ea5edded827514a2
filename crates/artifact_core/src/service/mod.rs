//! Core use-case services.
//!
//! # Responsibility
//! - Turn repository calls into plain caller-facing operations.
//! - Keep CLI and other front ends decoupled from SQLite details.

pub mod record_store;
