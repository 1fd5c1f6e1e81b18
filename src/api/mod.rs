//! HTTP API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Switch endpoints are mounted under `/api/1`, matching the paths used
//! by existing sensor bridges and status clients.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the API router with every endpoint, still awaiting its state.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .nest("/api/1", handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
        )
    };

    router
}

/// Builds the complete application: routes, tracing, CORS, and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
