//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use crate::api::dto::{StatusData, StatusResponse};
use crate::api::handlers::{switch, system};
use crate::error::ErrorResponse;

/// Generated OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "switchifier",
        description = "Records and reports the open/closed state of a physical switch."
    ),
    paths(switch::update_state, switch::get_status, system::health_handler),
    components(schemas(StatusResponse, StatusData, ErrorResponse, system::HealthResponse)),
    tags(
        (name = "Switch", description = "Switch state updates and queries"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;
