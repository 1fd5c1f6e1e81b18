//! State recorder: append-if-changed over the state-change log.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::Mutex;

use crate::domain::{Clock, SwitchStatus, SystemClock};
use crate::error::SwitchifierError;
use crate::persistence::{SqliteEventLog, StateChangeEvent};

/// Result of recording one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The observation was a transition and was stored.
    Appended(StateChangeEvent),
    /// The observation matched the latest stored state; nothing was written.
    Unchanged,
}

/// Records switch observations and serves the latest state.
///
/// Writes are serialized twice over: `write_guard` is held across the whole
/// read-compare-insert sequence, and the underlying pool has a single
/// connection. Reads never take `write_guard`.
///
/// `last_observed_at` is process-local. It starts at zero, advances on
/// every successful observation, and is never persisted.
#[derive(Debug)]
pub struct StateRecorder {
    log: SqliteEventLog,
    clock: Arc<dyn Clock>,
    write_guard: Mutex<()>,
    last_observed_at: AtomicI64,
}

impl StateRecorder {
    /// Creates a recorder stamping events with the system clock.
    #[must_use]
    pub fn new(log: SqliteEventLog) -> Self {
        Self::with_clock(log, Arc::new(SystemClock))
    }

    /// Creates a recorder with an explicit time source.
    #[must_use]
    pub fn with_clock(log: SqliteEventLog, clock: Arc<dyn Clock>) -> Self {
        Self {
            log,
            clock,
            write_guard: Mutex::new(()),
            last_observed_at: AtomicI64::new(0),
        }
    }

    /// Returns the underlying log.
    #[must_use]
    pub fn event_log(&self) -> &SqliteEventLog {
        &self.log
    }

    /// Timestamp (ns) of the last successful observation, or zero.
    #[must_use]
    pub fn last_observed_at(&self) -> i64 {
        self.last_observed_at.load(Ordering::Acquire)
    }

    /// Records an observed switch state, storing it only if it differs
    /// from the latest stored state (or the log is empty).
    ///
    /// The stored `interval` is measured from this process's previous
    /// observation, not from the previous stored event. The stored
    /// `timestamp` is always later than the latest stored one, even if the
    /// wall clock has stepped back.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchifierError::Storage`] if the log cannot be read or
    /// written. The keepalive marker is left untouched in that case.
    pub async fn record_observed_state(
        &self,
        state: bool,
    ) -> Result<RecordOutcome, SwitchifierError> {
        let _writer = self.write_guard.lock().await;

        let latest = self.log.latest_event().await?;
        if latest.is_some_and(|event| event.state == state) {
            let now = self.clock.now_nanos();
            self.last_observed_at.store(now, Ordering::Release);
            tracing::debug!(state, "switch state unchanged");
            return Ok(RecordOutcome::Unchanged);
        }

        let now = self.clock.now_nanos();
        let timestamp = match latest {
            Some(event) => now.max(event.timestamp.saturating_add(1)),
            None => now,
        };
        let previous = self.last_observed_at.load(Ordering::Acquire);
        let interval = if previous == 0 {
            0
        } else {
            timestamp.saturating_sub(previous).max(0)
        };

        let event = StateChangeEvent {
            timestamp,
            interval,
            state,
        };
        self.log.append_event(&event).await?;
        self.last_observed_at.store(timestamp, Ordering::Release);

        tracing::info!(state, timestamp, interval, "stored switch state change");
        Ok(RecordOutcome::Appended(event))
    }

    /// Returns the most recent stored state plus the keepalive marker.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchifierError::NoData`] if nothing has been recorded
    /// yet, or [`SwitchifierError::Storage`] if the log cannot be read.
    pub async fn latest_state(&self) -> Result<SwitchStatus, SwitchifierError> {
        let event = self
            .log
            .latest_event()
            .await?
            .ok_or(SwitchifierError::NoData)?;

        Ok(SwitchStatus {
            open: event.state,
            since: event.timestamp,
            last_keepalive: self.last_observed_at(),
        })
    }
}
