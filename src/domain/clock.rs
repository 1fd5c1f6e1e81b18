//! Time source for stamping state changes.

use std::fmt;

use chrono::Utc;

/// Wall-clock source with nanosecond resolution.
///
/// Injected into the recorder so that tests can control time.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Nanoseconds since the Unix epoch.
    fn now_nanos(&self) -> i64;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        // `None` only past the year 2262.
        Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX)
    }
}
