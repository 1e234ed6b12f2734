//! Content extraction: turns raw text into `StructuredContent`.
//!
//! Pluggable through the `ContentExtractor` trait. `AppState` carries an
//! `Arc<dyn ContentExtractor>`; the default backend is `LlmContentExtractor`,
//! tests swap in fixed fakes.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::models::content::{FlowchartNode, StructuredContent};

#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, raw_text: &str) -> Result<StructuredContent, AppError>;
}

/// Extracts content with a single completion call.
pub struct LlmContentExtractor {
    llm: LlmClient,
}

impl LlmContentExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentExtractor for LlmContentExtractor {
    async fn extract(&self, raw_text: &str) -> Result<StructuredContent, AppError> {
        let prompt = EXTRACT_PROMPT_TEMPLATE.replace("{raw_text}", raw_text);
        let system = format!("{EXTRACT_SYSTEM}\n\n{JSON_ONLY_SYSTEM}");

        let text = self.llm.call_text(&prompt, &system).await?;
        let content = parse_structured_content(&text)?;

        info!(
            title = %content.title,
            statistics = content.statistics.as_ref().map_or(0, Vec::len),
            flowchart_nodes = content.flowchart.as_ref().map_or(0, Vec::len),
            "Extracted infographic content"
        );
        Ok(content)
    }
}

/// Shape of the model's answer before validation. Every field is optional here
/// so that a missing mandatory field becomes a parse failure with a clear
/// message instead of a generic serde error.
#[derive(Debug, Deserialize)]
struct RawContent {
    title: Option<String>,
    overview: Option<String>,
    #[serde(default)]
    statistics: Option<Vec<String>>,
    #[serde(default)]
    flowchart: Option<Vec<FlowchartNode>>,
}

/// Parses a completion response into validated content.
///
/// Code fences are stripped first. `title` and `overview` must be present and
/// non-blank; the rest of the rules are `StructuredContent::normalized`.
pub fn parse_structured_content(text: &str) -> Result<StructuredContent, AppError> {
    let json = strip_json_fences(text);
    let raw: RawContent = serde_json::from_str(json)
        .map_err(|e| AppError::ExtractionParseFailed(format!("invalid JSON: {e}")))?;

    StructuredContent {
        title: raw.title.unwrap_or_default(),
        overview: raw.overview.unwrap_or_default(),
        statistics: raw.statistics,
        flowchart: raw.flowchart,
    }
    .normalized()
    .map_err(|e| AppError::ExtractionParseFailed(e.to_string()))
}
