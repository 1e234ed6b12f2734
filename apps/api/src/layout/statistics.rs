//! Statistics formatting: bulleted, independently wrapped blocks.

use serde::{Deserialize, Serialize};

use crate::layout::text_wrap::{wrap_text, WrappedText};
use crate::models::content::EXPECTED_STATISTICS;

pub const BULLET: &str = "•";

/// Count-dependent sizing and placement of the statistics body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsStyle {
    /// Applied on top of the planned statistics font size.
    pub font_multiplier: f32,
    /// Where the body starts, as a fraction of the statistics region height.
    pub start_offset: f32,
}

/// Three statistics (the designed-for count) get a slightly smaller font and
/// start higher in the region; any other count uses the defaults.
pub fn statistics_style(count: usize) -> StatisticsStyle {
    if count == EXPECTED_STATISTICS {
        StatisticsStyle {
            font_multiplier: 0.9,
            start_offset: 0.3,
        }
    } else {
        StatisticsStyle {
            font_multiplier: 1.0,
            start_offset: 0.4,
        }
    }
}

/// Prefixes each statistic with a bullet and wraps it on its own.
/// Blank statistics are skipped.
pub fn format_statistics(statistics: &[String], max_chars: usize) -> Vec<WrappedText> {
    statistics
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| wrap_text(&format!("{BULLET} {s}"), max_chars))
        .collect()
}

/// All statistic blocks as one wrapped text, blocks separated by a blank line.
pub fn format_statistics_text(statistics: &[String], max_chars: usize) -> WrappedText {
    WrappedText::join_blocks(&format_statistics(statistics, max_chars))
}
