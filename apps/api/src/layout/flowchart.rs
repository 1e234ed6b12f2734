//! Flowchart node layout. One node per slot; nodes without a title leave
//! their slot empty.

use serde::{Deserialize, Serialize};

use crate::layout::engine::{report_fit, LayoutObserver, MIN_FONT_RATIO};
use crate::layout::fonts::FontPlan;
use crate::layout::regions::Region;
use crate::layout::text_wrap::{
    fit_to_height, max_chars_per_line, wrap_text, TextBlock, BODY_LINE_HEIGHT,
    HEADING_LINE_HEIGHT,
};
use crate::models::content::FlowchartNode;

/// Horizontal inset of the node title, per side, relative to node width.
pub const TITLE_INSET_FRACTION: f32 = 0.10;
/// Horizontal inset of the node description, per side. Narrower than the
/// title inset so descriptions get more room per line.
pub const DESCRIPTION_INSET_FRACTION: f32 = 0.05;
/// Vertical padding inside a node, relative to node height.
const NODE_PADDING_FRACTION: f32 = 0.12;
/// Share of the node's inner height the title may use when a description follows.
const TITLE_HEIGHT_SHARE: f32 = 0.45;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeLayout {
    /// Position of the node in the flowchart, 0-based.
    pub index: usize,
    pub region: Region,
    pub title: TextBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TextBlock>,
}

/// Lays out every drawable node. Slots past the end of `nodes` stay blank;
/// nodes past the last slot are ignored.
pub fn layout_nodes(
    nodes: &[FlowchartNode],
    slots: &[Region],
    fonts: &FontPlan,
    char_width_factor: f32,
    observer: &dyn LayoutObserver,
) -> Vec<NodeLayout> {
    slots
        .iter()
        .zip(nodes)
        .enumerate()
        .filter_map(|(index, (slot, node))| {
            let Some(title) = node.usable_title() else {
                observer.node_skipped(index);
                return None;
            };
            Some(layout_node(
                index,
                slot,
                title,
                node.usable_description(),
                fonts,
                char_width_factor,
                observer,
            ))
        })
        .collect()
}

fn layout_node(
    index: usize,
    slot: &Region,
    title: &str,
    description: Option<&str>,
    fonts: &FontPlan,
    factor: f32,
    observer: &dyn LayoutObserver,
) -> NodeLayout {
    let padding = slot.height * NODE_PADDING_FRACTION;
    let inner_height = (slot.height - 2.0 * padding).max(0.0);
    let title_max_height = if description.is_some() {
        inner_height * TITLE_HEIGHT_SHARE
    } else {
        inner_height
    };

    let title_inset = slot.width * TITLE_INSET_FRACTION;
    let title_width = slot.width - 2.0 * title_inset;
    let fitted = fit_to_height(
        fonts.node_title,
        fonts.node_title * MIN_FONT_RATIO,
        title_max_height,
        HEADING_LINE_HEIGHT,
        |size| wrap_text(title, max_chars_per_line(title_width, size, factor)),
    );
    report_fit(
        observer,
        &format!("flowchart node {index} title"),
        fonts.node_title,
        &fitted,
        title_max_height,
    );

    // A lone title is centered vertically; with a description it sits on top.
    let title_y = if description.is_some() {
        slot.y + padding
    } else {
        slot.y + ((slot.height - fitted.height) / 2.0).max(0.0)
    };
    let title_block = TextBlock {
        frame: Region::new(slot.x + title_inset, title_y, title_width, fitted.height),
        font_size: fitted.font_size,
        line_height: HEADING_LINE_HEIGHT,
        text: fitted.text,
        overflow: fitted.overflow,
    };

    let description_block = description.map(|text| {
        let inset = slot.width * DESCRIPTION_INSET_FRACTION;
        let width = slot.width - 2.0 * inset;
        let top = title_block.frame.bottom() + padding * 0.5;
        let available = (slot.bottom() - padding - top).max(0.0);

        let fitted = fit_to_height(
            fonts.node_description,
            fonts.node_description * MIN_FONT_RATIO,
            available,
            BODY_LINE_HEIGHT,
            |size| wrap_text(text, max_chars_per_line(width, size, factor)),
        );
        report_fit(
            observer,
            &format!("flowchart node {index} description"),
            fonts.node_description,
            &fitted,
            available,
        );

        TextBlock {
            frame: Region::new(slot.x + inset, top, width, fitted.height),
            font_size: fitted.font_size,
            line_height: BODY_LINE_HEIGHT,
            text: fitted.text,
            overflow: fitted.overflow,
        }
    });

    NodeLayout {
        index,
        region: *slot,
        title: title_block,
        description: description_block,
    }
}
