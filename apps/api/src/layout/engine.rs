//! Layout Engine: computes regions, font sizes and wrapped text for one
//! element of an infographic.
//!
//! # Per element
//! - title: adaptive size on one line, wrapped only if the minimum size still
//!   does not fit, centered vertically in the title band
//! - overview: section header + underline + wrapped body
//! - statistics: section header + underline + bulleted blocks, placement
//!   depends on the number of statistics
//! - flowchart: section header + underline + up to five node layouts
//!
//! Body text that is too tall for its region is re-wrapped at smaller sizes
//! (see `fit_to_height`). Anything that still does not fit is flagged
//! `overflow` and reported to the observer; it is never an error.
//!
//! Nothing is cached: every call recomputes regions and fonts from the metrics
//! it is given.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::layout::flowchart::{layout_nodes, NodeLayout};
use crate::layout::fonts::{plan_fonts, FontPlan};
use crate::layout::metrics::CanvasMetrics;
use crate::layout::regions::{plan_regions, Region, RegionPlan};
use crate::layout::statistics::{format_statistics_text, statistics_style, StatisticsStyle};
use crate::layout::text_wrap::{
    estimate_text_width, fit_font_size, fit_to_height, max_chars_per_line, wrap_text,
    FittedText, TextBlock, BODY_LINE_HEIGHT, HEADING_LINE_HEIGHT,
};
use crate::layout::LayoutParams;
use crate::models::content::{ElementKind, StructuredContent};

pub const OVERVIEW_HEADER: &str = "Overview";
pub const STATISTICS_HEADER: &str = "Key Statistics";
pub const FLOWCHART_HEADER: &str = "Flowchart";

/// Smallest size body text may shrink to, relative to its planned size.
pub const MIN_FONT_RATIO: f32 = 0.6;
/// Inner padding of section regions, relative to the canvas margin.
const SECTION_PADDING_RATIO: f32 = 0.5;
/// Share of an overview/statistics region a section header may take.
const HEADER_HEIGHT_SHARE: f32 = 0.25;
/// Underline thickness relative to the base font size.
const UNDERLINE_THICKNESS_RATIO: f32 = 0.15;

// ────────────────────────────────────────────────────────────────────────────
// Observer
// ────────────────────────────────────────────────────────────────────────────

/// Receives layout diagnostics. All methods default to no-ops.
pub trait LayoutObserver: Send + Sync {
    /// A block was drawn at a different size than planned.
    fn font_adjusted(&self, _block: &str, _planned: f32, _fitted: f32) {}

    /// A block is taller than its space even at the minimum size.
    fn overflow(&self, _block: &str, _required_height: f32, _available_height: f32) {}

    /// A flowchart node had no title and was left out.
    fn node_skipped(&self, _index: usize) {}
}

/// Default observer: forwards diagnostics to `tracing`.
pub struct TracingObserver;

impl LayoutObserver for TracingObserver {
    fn font_adjusted(&self, block: &str, planned: f32, fitted: f32) {
        debug!(block, planned, fitted, "Font size adjusted to fit");
    }

    fn overflow(&self, block: &str, required_height: f32, available_height: f32) {
        warn!(
            block,
            required_height, available_height, "Text block overflows its region"
        );
    }

    fn node_skipped(&self, index: usize) {
        warn!(index, "Flowchart node has no title; skipping");
    }
}

pub(crate) fn report_fit(
    observer: &dyn LayoutObserver,
    block: &str,
    planned: f32,
    fitted: &FittedText,
    available_height: f32,
) {
    if (fitted.font_size - planned).abs() > f32::EPSILON {
        observer.font_adjusted(block, planned, fitted.font_size);
    }
    if fitted.overflow {
        observer.overflow(block, fitted.height, available_height);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A section label with the thin rule drawn beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    pub label: String,
    pub block: TextBlock,
    pub underline: Region,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleLayout {
    pub region: Region,
    pub block: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    pub region: Region,
    pub header: SectionHeader,
    pub body: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsLayout {
    pub region: Region,
    pub header: SectionHeader,
    pub style: StatisticsStyle,
    pub body: TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowchartLayout {
    pub region: Region,
    pub header: SectionHeader,
    pub nodes: Vec<NodeLayout>,
}

/// Everything needed to draw one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementLayout {
    Title(TitleLayout),
    Overview(SectionLayout),
    Statistics(StatisticsLayout),
    Flowchart(FlowchartLayout),
}

impl ElementLayout {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementLayout::Title(_) => ElementKind::Title,
            ElementLayout::Overview(_) => ElementKind::Overview,
            ElementLayout::Statistics(_) => ElementKind::Statistics,
            ElementLayout::Flowchart(_) => ElementKind::Flowchart,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LayoutEngine {
    params: LayoutParams,
    observer: Arc<dyn LayoutObserver>,
}

impl LayoutEngine {
    pub fn new(params: LayoutParams) -> Self {
        Self::with_observer(params, Arc::new(TracingObserver))
    }

    pub fn with_observer(params: LayoutParams, observer: Arc<dyn LayoutObserver>) -> Self {
        Self { params, observer }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Lays out `kind` for `content` on a canvas described by `metrics`.
    ///
    /// Fails only when the content has nothing for the requested kind
    /// (statistics or flowchart missing).
    pub fn layout(
        &self,
        kind: ElementKind,
        content: &StructuredContent,
        metrics: &CanvasMetrics,
    ) -> Result<ElementLayout, AppError> {
        let regions = plan_regions(metrics, &self.params);
        let fonts = plan_fonts(metrics);

        let layout = match kind {
            ElementKind::Title => ElementLayout::Title(self.layout_title(content, &regions, &fonts)),
            ElementKind::Overview => {
                ElementLayout::Overview(self.layout_overview(content, &regions, &fonts))
            }
            ElementKind::Statistics => {
                ElementLayout::Statistics(self.layout_statistics(content, &regions, &fonts)?)
            }
            ElementKind::Flowchart => {
                ElementLayout::Flowchart(self.layout_flowchart(content, &regions, &fonts)?)
            }
        };

        debug!(
            %kind,
            width = metrics.width,
            height = metrics.height,
            scale = metrics.scale_factor,
            "Element laid out"
        );
        Ok(layout)
    }

    fn layout_title(
        &self,
        content: &StructuredContent,
        regions: &RegionPlan,
        fonts: &FontPlan,
    ) -> TitleLayout {
        let factor = self.params.char_width_factor;
        let region = regions.title;
        let title = content.title.as_str();

        let sized = fit_font_size(title, region.width, fonts.title, fonts.base, factor);
        let fitted = fit_to_height(sized, fonts.base, region.height, HEADING_LINE_HEIGHT, |size| {
            wrap_text(title, max_chars_per_line(region.width, size, factor))
        });
        report_fit(self.observer.as_ref(), "title", fonts.title, &fitted, region.height);

        let y = region.y + ((region.height - fitted.height) / 2.0).max(0.0);
        TitleLayout {
            region,
            block: TextBlock {
                frame: Region::new(region.x, y, region.width, fitted.height),
                font_size: fitted.font_size,
                line_height: HEADING_LINE_HEIGHT,
                text: fitted.text,
                overflow: fitted.overflow,
            },
        }
    }

    fn layout_overview(
        &self,
        content: &StructuredContent,
        regions: &RegionPlan,
        fonts: &FontPlan,
    ) -> SectionLayout {
        let region = regions.overview;
        let padding = regions.margin * SECTION_PADDING_RATIO;
        let header = self.section_header(
            OVERVIEW_HEADER,
            &region,
            padding,
            region.height * HEADER_HEIGHT_SHARE,
            fonts,
        );

        let top = header.underline.bottom() + padding;
        let body = self.body_block(
            "overview",
            &content.overview,
            &region,
            padding,
            top,
            fonts.overview,
        );

        SectionLayout {
            region,
            header,
            body,
        }
    }

    fn layout_statistics(
        &self,
        content: &StructuredContent,
        regions: &RegionPlan,
        fonts: &FontPlan,
    ) -> Result<StatisticsLayout, AppError> {
        let statistics: Vec<String> = content
            .statistics
            .iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if statistics.is_empty() {
            return Err(AppError::Validation("content has no statistics".to_string()));
        }

        let factor = self.params.char_width_factor;
        let region = regions.statistics;
        let padding = regions.margin * SECTION_PADDING_RATIO;
        let header = self.section_header(
            STATISTICS_HEADER,
            &region,
            padding,
            region.height * HEADER_HEIGHT_SHARE,
            fonts,
        );

        let style = statistics_style(statistics.len());
        let planned = fonts.statistics * style.font_multiplier;
        let top = (region.y + region.height * style.start_offset)
            .max(header.underline.bottom() + padding);
        let width = region.width - 2.0 * padding;
        let available = (region.bottom() - padding - top).max(0.0);

        let fitted = fit_to_height(
            planned,
            planned * MIN_FONT_RATIO,
            available,
            BODY_LINE_HEIGHT,
            |size| format_statistics_text(&statistics, max_chars_per_line(width, size, factor)),
        );
        report_fit(self.observer.as_ref(), "statistics", planned, &fitted, available);

        Ok(StatisticsLayout {
            region,
            header,
            style,
            body: TextBlock {
                frame: Region::new(region.x + padding, top, width, fitted.height),
                font_size: fitted.font_size,
                line_height: BODY_LINE_HEIGHT,
                text: fitted.text,
                overflow: fitted.overflow,
            },
        })
    }

    fn layout_flowchart(
        &self,
        content: &StructuredContent,
        regions: &RegionPlan,
        fonts: &FontPlan,
    ) -> Result<FlowchartLayout, AppError> {
        let nodes = content
            .flowchart
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("content has no flowchart".to_string()))?;

        let region = regions.flowchart;
        let padding = regions.margin * SECTION_PADDING_RATIO;
        // The header lives in the band reserved above the first node.
        let reserved = regions.nodes[0].y - region.y;
        let header = self.section_header(
            FLOWCHART_HEADER,
            &region,
            padding,
            (reserved - 2.0 * padding).max(0.0),
            fonts,
        );

        let nodes = layout_nodes(
            nodes,
            &regions.nodes,
            fonts,
            self.params.char_width_factor,
            self.observer.as_ref(),
        );

        Ok(FlowchartLayout {
            region,
            header,
            nodes,
        })
    }

    /// Header label at the top-left of `region`, sized to fit its width and
    /// `max_height`, with an underline as wide as the estimated label.
    fn section_header(
        &self,
        label: &str,
        region: &Region,
        padding: f32,
        max_height: f32,
        fonts: &FontPlan,
    ) -> SectionHeader {
        let factor = self.params.char_width_factor;
        let width = region.width - 2.0 * padding;

        let font_size = fit_font_size(label, width, fonts.section_header, fonts.base, factor)
            .min(max_height / HEADING_LINE_HEIGHT);
        let frame = Region::new(
            region.x + padding,
            region.y + padding,
            width,
            font_size * HEADING_LINE_HEIGHT,
        );

        let thickness = (fonts.base * UNDERLINE_THICKNESS_RATIO)
            .max(1.0)
            .min(padding * 0.5);
        let underline = Region::new(
            frame.x,
            frame.bottom() + padding * 0.25,
            estimate_text_width(label, font_size, factor).min(width),
            thickness,
        );

        SectionHeader {
            label: label.to_string(),
            block: TextBlock {
                frame,
                font_size,
                line_height: HEADING_LINE_HEIGHT,
                text: wrap_text(label, max_chars_per_line(width, font_size, factor)),
                overflow: false,
            },
            underline,
        }
    }

    /// Wrapped body text from `top` down to the bottom padding of `region`.
    fn body_block(
        &self,
        name: &str,
        text: &str,
        region: &Region,
        padding: f32,
        top: f32,
        planned: f32,
    ) -> TextBlock {
        let factor = self.params.char_width_factor;
        let width = region.width - 2.0 * padding;
        let available = (region.bottom() - padding - top).max(0.0);

        let fitted = fit_to_height(
            planned,
            planned * MIN_FONT_RATIO,
            available,
            BODY_LINE_HEIGHT,
            |size| wrap_text(text, max_chars_per_line(width, size, factor)),
        );
        report_fit(self.observer.as_ref(), name, planned, &fitted, available);

        TextBlock {
            frame: Region::new(region.x + padding, top, width, fitted.height),
            font_size: fitted.font_size,
            line_height: BODY_LINE_HEIGHT,
            text: fitted.text,
            overflow: fitted.overflow,
        }
    }
}
