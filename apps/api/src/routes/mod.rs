pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::layout::handlers as layout;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session content
        .route(
            "/api/v1/infographics/generate",
            post(extraction::handle_generate),
        )
        .route(
            "/api/v1/infographics/:session_id",
            get(extraction::handle_get_session),
        )
        // Element layout
        .route(
            "/api/v1/infographics/:session_id/elements/:kind",
            post(layout::handle_session_element),
        )
        .route("/api/v1/layout/:kind", post(layout::handle_layout))
        .with_state(state)
}
