//! Database model for stored state changes.

use serde::{Deserialize, Serialize};

/// A row of the `switch_state_change` table.
///
/// Rows are never updated or deleted. Consecutive rows, ordered by
/// `timestamp`, always carry different `state` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StateChangeEvent {
    /// Nanoseconds since the Unix epoch. Primary key, unique and ascending.
    pub timestamp: i64,
    /// Nanoseconds since the previous observation seen by the recording
    /// process; `0` if it had seen none.
    pub interval: i64,
    /// State the switch transitioned to (`true` = open).
    pub state: bool,
}
