//! Status envelope returned by `GET /api/1/switchifier/status`.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SwitchStatus;
use crate::error::SwitchifierError;

/// Envelope wrapping the latest switch state.
///
/// When `okay` is `false`, `error` explains why and `data` is zero-valued.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Whether `data` holds a real state.
    pub okay: bool,
    /// Non-sensitive error message; empty on success.
    pub error: String,
    /// Latest state.
    pub data: StatusData,
}

/// Latest switch state payload.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
    /// Whether the switch is open.
    pub open: bool,
    /// Timestamp (ns since epoch) of the transition into `open`.
    pub since: i64,
    /// Timestamp (ns since epoch) of the last observation received.
    pub last_keepalive: i64,
}

impl From<SwitchStatus> for StatusResponse {
    fn from(status: SwitchStatus) -> Self {
        Self {
            okay: true,
            error: String::new(),
            data: StatusData {
                open: status.open,
                since: status.since,
                last_keepalive: status.last_keepalive,
            },
        }
    }
}

impl From<&SwitchifierError> for StatusResponse {
    fn from(err: &SwitchifierError) -> Self {
        Self {
            okay: false,
            error: err.public_message().to_string(),
            data: StatusData::default(),
        }
    }
}
