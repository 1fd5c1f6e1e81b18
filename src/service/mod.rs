//! Service layer: the state recorder.
//!
//! [`StateRecorder`] decides whether an observation is a transition,
//! appends transitions to the [`crate::persistence::SqliteEventLog`], and
//! answers latest-state queries.

pub mod state_recorder;

pub use state_recorder::{RecordOutcome, StateRecorder};
