use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// No credential configured for the completion endpoint; no request was made.
    #[error("Content extraction unavailable: {0}")]
    ExtractionUnavailable(String),

    /// The completion endpoint answered with a failure or could not be reached.
    #[error("Content extraction request failed: {0}")]
    ExtractionRequestFailed(String),

    /// The completion response was not valid JSON or lacked mandatory fields.
    #[error("Content extraction returned unusable output: {0}")]
    ExtractionParseFailed(String),

    /// A drawing primitive rejected a step of the element pipeline.
    #[error("Draw failed at step {step}: {message}")]
    DrawFailed { step: usize, message: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => AppError::ExtractionUnavailable(err.to_string()),
            LlmError::Http(_) | LlmError::Api { .. } => {
                AppError::ExtractionRequestFailed(err.to_string())
            }
            LlmError::Parse(_) | LlmError::EmptyContent => {
                AppError::ExtractionParseFailed(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ExtractionUnavailable(msg) => {
                tracing::warn!("Extraction unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EXTRACTION_UNAVAILABLE",
                    "Text analysis is not configured on this server".to_string(),
                )
            }
            AppError::ExtractionRequestFailed(msg) => {
                tracing::error!("Extraction request failed: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_REQUEST_FAILED",
                    "The text analysis service returned an error".to_string(),
                )
            }
            AppError::ExtractionParseFailed(msg) => {
                tracing::error!("Extraction parse failed: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_PARSE_FAILED",
                    "The text analysis result could not be understood".to_string(),
                )
            }
            AppError::DrawFailed { step, message } => {
                tracing::error!(step, "Draw failed: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DRAW_FAILED",
                    format!("Drawing stopped at step {step}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
