//! Axum route handlers for laying out and drawing single elements.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::engine::{ElementLayout, LayoutEngine};
use crate::layout::metrics::{
    resolve_metrics, CanvasDimensions, CanvasMetrics, CanvasProbe, RequestCanvasProbe,
};
use crate::models::content::{ElementKind, StructuredContent};
use crate::render::{draw_plan, render_element, DrawCommand, RecordingSurface};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ElementRequest {
    /// Host canvas size. Missing or partial dimensions fall back to the
    /// reference canvas.
    #[serde(default)]
    pub canvas: Option<CanvasDimensions>,
}

impl ElementRequest {
    /// An empty body means "no canvas reported"; anything else must be a
    /// well-formed request.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("invalid request body: {e}")))
    }
}

#[derive(Debug, Deserialize)]
pub struct LayoutRequest {
    pub content: StructuredContent,
    #[serde(default)]
    pub canvas: Option<CanvasDimensions>,
}

#[derive(Debug, Serialize)]
pub struct ElementResponse {
    pub kind: ElementKind,
    pub metrics: CanvasMetrics,
    pub layout: ElementLayout,
    /// Primitive calls in the order the host must issue them.
    pub commands: Vec<DrawCommand>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/infographics/:session_id/elements/:kind
///
/// Lays out one element of the session's current content.
pub async fn handle_session_element(
    State(state): State<AppState>,
    Path((session_id, kind)): Path<(Uuid, ElementKind)>,
    body: Bytes,
) -> Result<Json<ElementResponse>, AppError> {
    let request = ElementRequest::from_body(&body)?;
    let generated = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("session {session_id}")))?;

    let response = build_element(&state.layout, kind, generated.content, request.canvas).await?;
    Ok(Json(response))
}

/// POST /api/v1/layout/:kind
///
/// Stateless variant: the caller supplies the content, which goes through
/// the same normalization as extracted content.
pub async fn handle_layout(
    State(state): State<AppState>,
    Path(kind): Path<ElementKind>,
    Json(request): Json<LayoutRequest>,
) -> Result<Json<ElementResponse>, AppError> {
    let content = request
        .content
        .normalized()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let response = build_element(&state.layout, kind, content, request.canvas).await?;
    Ok(Json(response))
}

/// Probe → metrics → layout → draw plan → recorded draw.
pub async fn build_element(
    engine: &LayoutEngine,
    kind: ElementKind,
    content: StructuredContent,
    canvas: Option<CanvasDimensions>,
) -> Result<ElementResponse, AppError> {
    let probe = RequestCanvasProbe::new(canvas);
    let metrics = resolve_metrics(Some(&probe as &dyn CanvasProbe)).await;

    // Layout is CPU-bound; keep it off the async workers.
    let engine = engine.clone();
    let layout = tokio::task::spawn_blocking(move || engine.layout(kind, &content, &metrics))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("layout task failed: {e}")))??;

    let plan = draw_plan(&layout);
    let mut surface = RecordingSurface::default();
    render_element(&mut surface, &plan).await?;

    Ok(ElementResponse {
        kind: layout.kind(),
        metrics,
        layout,
        commands: surface.into_commands(),
    })
}
