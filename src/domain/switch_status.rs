//! Read-side view of the most recent recorded state.

use serde::Serialize;

/// Latest switch state as reported to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SwitchStatus {
    /// Whether the switch is open.
    pub open: bool,
    /// Timestamp (ns) of the transition into `open`.
    pub since: i64,
    /// Timestamp (ns) of the last observation received by this process,
    /// changed or not. Zero if none since startup.
    pub last_keepalive: i64,
}
