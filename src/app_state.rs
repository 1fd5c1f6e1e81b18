//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::SharedSecret;
use crate::service::StateRecorder;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Recorder owning the state-change log and keepalive marker.
    pub recorder: Arc<StateRecorder>,
    /// Credential required by the update endpoint.
    pub secret: SharedSecret,
}

impl AppState {
    /// Bundles the recorder and the update secret.
    #[must_use]
    pub fn new(recorder: Arc<StateRecorder>, secret: SharedSecret) -> Self {
        Self { recorder, secret }
    }
}
