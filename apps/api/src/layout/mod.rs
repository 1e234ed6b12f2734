// Adaptive layout and typography for infographic elements.
// Everything here is a pure function of canvas metrics, layout params and
// content, except `resolve_metrics`, which asks a canvas probe.

pub mod engine;
pub mod flowchart;
pub mod fonts;
pub mod handlers;
pub mod metrics;
pub mod regions;
pub mod statistics;
pub mod text_wrap;

use serde::{Deserialize, Serialize};

pub use engine::LayoutEngine;

/// Tunable design parameters. The defaults reproduce the reference layout;
/// changing them changes every region and wrap point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutParams {
    /// Margin as a fraction of the smaller canvas dimension, before scaling.
    pub margin_fraction: f32,
    /// Title band height as a fraction of canvas height.
    pub title_height_fraction: f32,
    /// Average glyph advance as a fraction of font size.
    pub char_width_factor: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            margin_fraction: 0.05,
            title_height_fraction: 0.10,
            char_width_factor: text_wrap::CHAR_WIDTH_FACTOR,
        }
    }
}
