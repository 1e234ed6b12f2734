//! Axum route handlers for generating and reading session content.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::{ElementKind, StructuredContent};
use crate::sessions::GeneratedContent;
use crate::state::AppState;

/// Longest accepted input, in characters.
pub const MAX_INPUT_CHARS: usize = 20_000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub text: String,
    /// Reuse a session; a new one is created when absent.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub session_id: Uuid,
    pub content: StructuredContent,
    pub available_elements: Vec<ElementKind>,
    pub generated_at: DateTime<Utc>,
}

impl ContentResponse {
    fn new(session_id: Uuid, generated: GeneratedContent) -> Self {
        Self {
            session_id,
            available_elements: generated.content.available_elements(),
            content: generated.content,
            generated_at: generated.generated_at,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/infographics/generate
///
/// Extracts structured content from the submitted text and makes it the
/// session's current content. On failure the session keeps what it had.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<ContentResponse>, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    if text.chars().count() > MAX_INPUT_CHARS {
        return Err(AppError::Validation(format!(
            "text exceeds {MAX_INPUT_CHARS} characters"
        )));
    }

    let content = state
        .extractor
        .extract(text)
        .await?
        .normalized()
        .map_err(|e| AppError::ExtractionParseFailed(e.to_string()))?;

    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    let generated = state.sessions.replace(session_id, content).await;
    info!(%session_id, "Session content replaced");

    Ok(Json(ContentResponse::new(session_id, generated)))
}

/// GET /api/v1/infographics/:session_id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ContentResponse>, AppError> {
    let generated = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;

    Ok(Json(ContentResponse::new(session_id, generated)))
}
