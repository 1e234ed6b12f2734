//! Draw plans: the ordered primitive calls for each element layout.
//!
//! Sections draw background → header → underline → body. The flowchart then
//! adds, per node, background → title → description.

use crate::layout::engine::{
    ElementLayout, FlowchartLayout, SectionHeader, SectionLayout, StatisticsLayout, TitleLayout,
};
use crate::layout::flowchart::NodeLayout;
use crate::layout::regions::Region;
use crate::layout::text_wrap::TextBlock;
use crate::render::{DrawCommand, FontWeight, RectangleSpec, TextAlign, TextSpec};

pub const FONT_FAMILY: &str = "Inter";

const TITLE_HEX: &str = "#111827";
const SECTION_FILL_HEX: &str = "#F3F6FB";
const HEADER_HEX: &str = "#1F2A44";
const ACCENT_HEX: &str = "#3B82F6";
const BODY_HEX: &str = "#374151";
const NODE_FILL_HEX: &str = "#2563EB";
const NODE_TEXT_HEX: &str = "#FFFFFF";

/// Builds the ordered draw commands for one element.
pub fn draw_plan(layout: &ElementLayout) -> Vec<DrawCommand> {
    match layout {
        ElementLayout::Title(title) => title_plan(title),
        ElementLayout::Overview(section) => section_plan(section),
        ElementLayout::Statistics(stats) => statistics_plan(stats),
        ElementLayout::Flowchart(flow) => flowchart_plan(flow),
    }
}

fn title_plan(layout: &TitleLayout) -> Vec<DrawCommand> {
    text_command(&layout.block, FontWeight::Bold, TextAlign::Center, TITLE_HEX)
        .into_iter()
        .collect()
}

fn section_plan(layout: &SectionLayout) -> Vec<DrawCommand> {
    framed_body(&layout.region, &layout.header, &layout.body)
}

fn statistics_plan(layout: &StatisticsLayout) -> Vec<DrawCommand> {
    framed_body(&layout.region, &layout.header, &layout.body)
}

fn framed_body(region: &Region, header: &SectionHeader, body: &TextBlock) -> Vec<DrawCommand> {
    let mut commands = section_frame(region, header);
    commands.extend(text_command(
        body,
        FontWeight::Normal,
        TextAlign::Left,
        BODY_HEX,
    ));
    commands
}

fn flowchart_plan(layout: &FlowchartLayout) -> Vec<DrawCommand> {
    let mut commands = section_frame(&layout.region, &layout.header);
    for node in &layout.nodes {
        commands.extend(node_plan(node));
    }
    commands
}

fn node_plan(node: &NodeLayout) -> Vec<DrawCommand> {
    let mut commands = vec![rectangle(&node.region, NODE_FILL_HEX)];
    commands.extend(text_command(
        &node.title,
        FontWeight::Bold,
        TextAlign::Center,
        NODE_TEXT_HEX,
    ));
    if let Some(description) = &node.description {
        commands.extend(text_command(
            description,
            FontWeight::Normal,
            TextAlign::Center,
            NODE_TEXT_HEX,
        ));
    }
    commands
}

/// Background, header text and header underline of a section.
fn section_frame(region: &Region, header: &SectionHeader) -> Vec<DrawCommand> {
    let mut commands = vec![rectangle(region, SECTION_FILL_HEX)];
    commands.extend(text_command(
        &header.block,
        FontWeight::Bold,
        TextAlign::Left,
        HEADER_HEX,
    ));
    commands.push(rectangle(&header.underline, ACCENT_HEX));
    commands
}

fn rectangle(region: &Region, color_hex: &str) -> DrawCommand {
    DrawCommand::CreateRectangle(RectangleSpec {
        x: region.x,
        y: region.y,
        width: region.width,
        height: region.height,
        color_hex: color_hex.to_string(),
    })
}

/// `None` for blocks with no lines.
fn text_command(
    block: &TextBlock,
    weight: FontWeight,
    align: TextAlign,
    color_hex: &str,
) -> Option<DrawCommand> {
    if block.text.is_empty() {
        return None;
    }
    Some(DrawCommand::CreateText(TextSpec {
        text: block.text.to_text(),
        x: block.frame.x,
        y: block.frame.y,
        font_size: block.font_size,
        font_weight: Some(weight),
        text_align: align,
        color_hex: color_hex.to_string(),
        width: block.frame.width,
        line_height: Some(block.line_height),
        text_decoration: None,
        font_family: FONT_FAMILY.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::engine::{LayoutEngine, FLOWCHART_HEADER, OVERVIEW_HEADER};
    use crate::layout::metrics::CanvasMetrics;
    use crate::layout::LayoutParams;
    use crate::models::content::{ElementKind, FlowchartNode, StructuredContent};

    fn content() -> StructuredContent {
        StructuredContent {
            title: "Coffee Supply Chain".to_string(),
            overview: "Coffee travels a long way before it reaches a cup.".to_string(),
            statistics: Some(vec![
                "70% arabica".to_string(),
                "2.25B cups a day".to_string(),
                "12.5M farms".to_string(),
            ]),
            flowchart: Some(vec![
                FlowchartNode {
                    title: Some("Harvest".to_string()),
                    description: Some("Cherries are picked".to_string()),
                },
                FlowchartNode {
                    title: Some("Process".to_string()),
                    description: None,
                },
                FlowchartNode {
                    title: None,
                    description: Some("Should never be drawn".to_string()),
                },
                FlowchartNode {
                    title: Some("Roast".to_string()),
                    description: Some("Beans are roasted".to_string()),
                },
                FlowchartNode {
                    title: Some("Brew".to_string()),
                    description: Some("Grounds meet water".to_string()),
                },
            ]),
        }
    }

    fn plan_for(kind: ElementKind) -> Vec<DrawCommand> {
        let engine = LayoutEngine::new(LayoutParams::default());
        let layout = engine
            .layout(kind, &content(), &CanvasMetrics::default())
            .unwrap();
        draw_plan(&layout)
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::CreateText(t) => Some(t.text.as_str()),
                DrawCommand::CreateRectangle(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_title_is_single_centered_text() {
        let commands = plan_for(ElementKind::Title);
        assert_eq!(commands.len(), 1);
        let DrawCommand::CreateText(spec) = &commands[0] else {
            panic!("expected text command");
        };
        assert_eq!(spec.text, "Coffee Supply Chain");
        assert_eq!(spec.text_align, TextAlign::Center);
        assert_eq!(spec.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_section_order_background_header_underline_body() {
        let commands = plan_for(ElementKind::Overview);
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::CreateRectangle(_)));
        match &commands[1] {
            DrawCommand::CreateText(t) => assert_eq!(t.text, OVERVIEW_HEADER),
            other => panic!("expected header text, got {other:?}"),
        }
        assert!(matches!(commands[2], DrawCommand::CreateRectangle(_)));
        assert!(matches!(commands[3], DrawCommand::CreateText(_)));
    }

    #[test]
    fn test_statistics_body_is_bulleted() {
        let commands = plan_for(ElementKind::Statistics);
        let body = texts(&commands)[1];
        assert_eq!(body.matches('•').count(), 3);
        assert!(body.contains("\n\n"));
    }

    #[test]
    fn test_flowchart_skips_untitled_node() {
        let commands = plan_for(ElementKind::Flowchart);
        // frame (3) + harvest (3) + process (2) + roast (3) + brew (3)
        assert_eq!(commands.len(), 14);
        let all_text = texts(&commands);
        assert_eq!(all_text[0], FLOWCHART_HEADER);
        assert!(!all_text.iter().any(|t| t.contains("Should never be drawn")));
        let node_fills = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::CreateRectangle(r) if r.color_hex == NODE_FILL_HEX))
            .count();
        assert_eq!(node_fills, 4);
    }
}
