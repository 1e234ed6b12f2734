use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Reports service version, whether text analysis is configured, and the
/// number of live sessions.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let sessions = state.sessions.len().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "infographic-api",
        "extraction_configured": state.config.anthropic_api_key.is_some(),
        "sessions": sessions,
    }))
}
