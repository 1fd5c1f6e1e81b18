//! Persistence layer: the append-only SQLite log of switch state changes.
//!
//! [`SqliteEventLog`] owns a `sqlx::SqlitePool` capped at a single
//! connection, so every statement against the log is executed by one
//! writer at a time.

pub mod models;
pub mod sqlite;

pub use models::StateChangeEvent;
pub use sqlite::SqliteEventLog;
