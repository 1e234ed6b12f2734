//! Font planning. Every size is a fixed multiple of one base size derived from
//! the canvas, so all elements scale together.

use serde::{Deserialize, Serialize};

use crate::layout::metrics::CanvasMetrics;

/// Base font size as a fraction of the smaller canvas dimension, before scaling.
pub const BASE_FONT_FRACTION: f32 = 0.02;

/// Text roles that get their own size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    Overview,
    Statistics,
    NodeTitle,
    NodeDescription,
    SectionHeader,
}

impl FontRole {
    /// Multiplier applied to the base size.
    ///
    /// ```text
    /// title             2.10
    /// overview          1.10
    /// statistics        1.40   (×0.9 again with exactly 3 statistics)
    /// node title        0.90
    /// node description  0.74
    /// section header    2.00
    /// ```
    pub const fn multiplier(self) -> f32 {
        match self {
            FontRole::Title => 2.1,
            FontRole::Overview => 1.1,
            FontRole::Statistics => 1.4,
            FontRole::NodeTitle => 0.9,
            FontRole::NodeDescription => 0.74,
            FontRole::SectionHeader => 2.0,
        }
    }
}

/// Font sizes for one render pass, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPlan {
    pub base: f32,
    pub title: f32,
    pub overview: f32,
    pub statistics: f32,
    pub node_title: f32,
    pub node_description: f32,
    pub section_header: f32,
}

pub fn plan_fonts(metrics: &CanvasMetrics) -> FontPlan {
    let base = metrics.min_dimension() * BASE_FONT_FRACTION * metrics.scale_factor;
    let sized = |role: FontRole| base * role.multiplier();

    FontPlan {
        base,
        title: sized(FontRole::Title),
        overview: sized(FontRole::Overview),
        statistics: sized(FontRole::Statistics),
        node_title: sized(FontRole::NodeTitle),
        node_description: sized(FontRole::NodeDescription),
        section_header: sized(FontRole::SectionHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_canvas_base_size() {
        let plan = plan_fonts(&CanvasMetrics::default());
        assert!((plan.base - 21.6).abs() < 1e-4);
        assert!((plan.title - 21.6 * 2.1).abs() < 1e-3);
        assert!((plan.section_header - 43.2).abs() < 1e-3);
    }

    #[test]
    fn test_sizes_follow_multiplier_table() {
        let plan = plan_fonts(&CanvasMetrics::default());
        for (size, role) in [
            (plan.title, FontRole::Title),
            (plan.overview, FontRole::Overview),
            (plan.statistics, FontRole::Statistics),
            (plan.node_title, FontRole::NodeTitle),
            (plan.node_description, FontRole::NodeDescription),
            (plan.section_header, FontRole::SectionHeader),
        ] {
            assert!((size - plan.base * role.multiplier()).abs() < 1e-4);
        }
    }

    #[test]
    fn test_half_size_canvas_quarters_base() {
        // min dimension halves and scale halves
        let metrics = CanvasMetrics::from_dimensions(540.0, 960.0).unwrap();
        let plan = plan_fonts(&metrics);
        assert!((plan.base - 21.6 / 4.0).abs() < 1e-4);
    }
}
