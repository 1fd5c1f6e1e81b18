//! Switch endpoints: update (authorized write) and status (public read).

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{StatusResponse, UpdateParams};
use crate::app_state::AppState;
use crate::domain::parse_switch_value;
use crate::error::{ErrorResponse, SwitchifierError};
use crate::service::RecordOutcome;

/// `POST /api/1/switchifier/update` — Record an observed switch state.
///
/// # Errors
///
/// Returns [`SwitchifierError::Unauthorized`] on a wrong secret,
/// [`SwitchifierError::Validation`] on an empty value, and
/// [`SwitchifierError::Storage`] if the state cannot be recorded.
#[utoipa::path(
    post,
    path = "/api/1/switchifier/update",
    tag = "Switch",
    summary = "Record an observed switch state",
    description = "Stores the observation if it differs from the latest recorded state. `secret` and `value` may be sent as query parameters or as a form-encoded body.",
    params(UpdateParams),
    request_body(
        content = UpdateParams,
        content_type = "application/x-www-form-urlencoded",
        description = "Same fields as the query parameters; body values take precedence"
    ),
    responses(
        (status = 200, description = "Observation recorded"),
        (status = 400, description = "Missing value", body = ErrorResponse),
        (status = 403, description = "Wrong secret or method", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn update_state(
    State(state): State<AppState>,
    params: UpdateParams,
) -> Result<impl IntoResponse, SwitchifierError> {
    let secret = params.secret.unwrap_or_default();
    if !state.secret.verify(&secret) {
        tracing::warn!("rejected update with wrong secret");
        return Err(SwitchifierError::Unauthorized("wrong secret"));
    }

    let open = parse_switch_value(params.value.as_deref().unwrap_or_default())?;
    tracing::info!(open, "switch state observed");

    match state.recorder.record_observed_state(open).await? {
        RecordOutcome::Appended(event) => {
            tracing::debug!(timestamp = event.timestamp, "transition stored");
        }
        RecordOutcome::Unchanged => {}
    }

    Ok(StatusCode::OK)
}

/// Fallback for non-`POST` requests to the update endpoint.
pub async fn reject_method(method: Method) -> SwitchifierError {
    tracing::warn!(%method, "rejected update with wrong method");
    SwitchifierError::Unauthorized("wrong method")
}

/// `GET /api/1/switchifier/status` — Latest switch state.
#[utoipa::path(
    get,
    path = "/api/1/switchifier/status",
    tag = "Switch",
    summary = "Latest switch state",
    description = "Returns the latest recorded state, when it was entered, and when the last observation arrived. Errors are reported inside the envelope with `okay: false`.",
    responses(
        (status = 200, description = "Status envelope", body = StatusResponse),
    )
)]
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let response = match state.recorder.latest_state().await {
        Ok(status) => StatusResponse::from(status),
        Err(err) => {
            if matches!(err, SwitchifierError::Storage(_)) {
                tracing::error!(error = %err, "cannot read switch state");
            }
            StatusResponse::from(&err)
        }
    };
    (StatusCode::OK, Json(response))
}

/// Switch routes, relative to `/api/1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/switchifier/update",
            post(update_state).fallback(reject_method),
        )
        .route("/switchifier/status", get(get_status))
}
