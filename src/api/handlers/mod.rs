//! HTTP endpoint handlers.

pub mod switch;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all versioned routes mounted under `/api/1`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(switch::routes())
}
