use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ContentExtractor;
use crate::layout::LayoutEngine;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable extractor. Default: LlmContentExtractor.
    pub extractor: Arc<dyn ContentExtractor>,
    pub layout: LayoutEngine,
    pub sessions: SessionStore,
    pub config: Config,
}
