//! Region planning: splits the canvas into the title band, the
//! overview/statistics column, and the flowchart column with its five node
//! slots.
//!
//! ```text
//! +---------------------------+
//! |          title            |
//! +-------------+-------------+
//! |  overview   |  flowchart  |
//! |             |   [node 0]  |
//! +-------------+   [node 1]  |
//! | statistics  |   [node 2]  |
//! |             |   [node 3]  |
//! |             |   [node 4]  |
//! +-------------+-------------+
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::metrics::CanvasMetrics;
use crate::layout::LayoutParams;
use crate::models::content::FLOWCHART_NODE_COUNT;

/// Upper bound on the margin, as a fraction of the smaller canvas dimension.
/// Keeps every region non-empty on very large canvases.
pub const MAX_MARGIN_FRACTION: f32 = 0.08;
/// Vertical gap between node slots, relative to node height.
pub const NODE_SPACING_RATIO: f32 = 0.1;
/// Space above the first node, in margins, reserved for the flowchart header.
const FLOWCHART_HEADER_MARGINS: f32 = 3.0;
/// Margins subtracted from the flowchart height before dividing it among nodes.
const NODE_HEIGHT_MARGINS: f32 = 6.0;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True if the two regions share any area. Touching edges do not count.
    pub fn overlaps(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains(&self, other: &Region) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// All regions of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionPlan {
    pub margin: f32,
    pub title: Region,
    pub overview: Region,
    pub statistics: Region,
    pub flowchart: Region,
    pub nodes: [Region; FLOWCHART_NODE_COUNT],
}

impl RegionPlan {
    /// Title, overview, statistics and flowchart, in drawing order.
    pub fn sections(&self) -> [Region; 4] {
        [self.title, self.overview, self.statistics, self.flowchart]
    }
}

/// Margin for a canvas: `min(w, h) × margin_fraction × scale`, capped at
/// `MAX_MARGIN_FRACTION` of the smaller dimension.
pub fn margin_for(metrics: &CanvasMetrics, params: &LayoutParams) -> f32 {
    let min_dim = metrics.min_dimension();
    (min_dim * params.margin_fraction * metrics.scale_factor).min(min_dim * MAX_MARGIN_FRACTION)
}

pub fn plan_regions(metrics: &CanvasMetrics, params: &LayoutParams) -> RegionPlan {
    let (width, height) = (metrics.width, metrics.height);
    let m = margin_for(metrics, params);
    let half_width = width / 2.0;
    let half_height = height / 2.0;

    let title = Region::new(m, m, width - 2.0 * m, height * params.title_height_fraction);

    let body_top = title.bottom() + m;
    let body_bottom = height - m;
    let column_width = half_width - 1.5 * m;

    let overview = Region::new(m, body_top, column_width, half_height - body_top - m / 2.0);
    let statistics_top = half_height + m / 2.0;
    let statistics = Region::new(m, statistics_top, column_width, body_bottom - statistics_top);
    let flowchart = Region::new(
        half_width + m / 2.0,
        body_top,
        width - m - (half_width + m / 2.0),
        body_bottom - body_top,
    );

    let nodes = plan_nodes(&flowchart, m);

    let plan = RegionPlan {
        margin: m,
        title,
        overview,
        statistics,
        flowchart,
        nodes,
    };
    debug_assert!(
        plan.sections()
            .iter()
            .enumerate()
            .all(|(i, a)| plan.sections()[i + 1..].iter().all(|b| !a.overlaps(b))),
        "section regions overlap: {plan:?}"
    );
    plan
}

/// Stacks the node slots inside the flowchart region. Node height follows
/// `(flow_h - 6m) / 5`; on tall canvases, where the spaced stack would run
/// past the region's bottom margin, it shrinks just enough to fit.
fn plan_nodes(flowchart: &Region, m: f32) -> [Region; FLOWCHART_NODE_COUNT] {
    let count = FLOWCHART_NODE_COUNT as f32;
    let stack_top = flowchart.y + FLOWCHART_HEADER_MARGINS * m;
    let stack_limit = flowchart.bottom() - m;
    let stack_factor = count + (count - 1.0) * NODE_SPACING_RATIO;

    let mut node_height = (flowchart.height - NODE_HEIGHT_MARGINS * m) / count;
    if stack_top + node_height * stack_factor > stack_limit {
        node_height = (stack_limit - stack_top) / stack_factor;
    }
    let node_height = node_height.max(0.0);
    let spacing = node_height * NODE_SPACING_RATIO;

    std::array::from_fn(|i| {
        Region::new(
            flowchart.x + m,
            stack_top + i as f32 * (node_height + spacing),
            flowchart.width - 2.0 * m,
            node_height,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_for(width: f32, height: f32) -> (CanvasMetrics, RegionPlan) {
        let metrics = CanvasMetrics::from_dimensions(width, height).unwrap();
        (metrics, plan_regions(&metrics, &LayoutParams::default()))
    }

    fn assert_valid(metrics: &CanvasMetrics, plan: &RegionPlan) {
        let canvas = Region::new(0.0, 0.0, metrics.width, metrics.height);
        let sections = plan.sections();

        for region in sections.iter().chain(plan.nodes.iter()) {
            assert!(region.width > 0.0 && region.height > 0.0, "empty region {region:?}");
            assert!(canvas.contains(region), "{region:?} outside canvas {canvas:?}");
        }
        for (i, a) in sections.iter().enumerate() {
            for b in sections.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
        for (i, a) in plan.nodes.iter().enumerate() {
            assert!(plan.flowchart.contains(a), "node {i} outside flowchart");
            for b in plan.nodes.iter().skip(i + 1) {
                assert!(!a.overlaps(b), "node {a:?} overlaps node {b:?}");
            }
        }
    }

    #[test]
    fn test_reference_canvas_margin_and_title() {
        let (_, plan) = plan_for(1080.0, 1920.0);
        assert!((plan.margin - 54.0).abs() < 1e-3);
        assert!((plan.title.height - 192.0).abs() < 1e-3);
        assert!((plan.title.x - 54.0).abs() < 1e-3);
        assert!((plan.title.width - 972.0).abs() < 1e-3);
    }

    #[test]
    fn test_reference_canvas_columns() {
        let (_, plan) = plan_for(1080.0, 1920.0);
        // body starts one margin below the title band
        assert!((plan.overview.y - 300.0).abs() < 1e-3);
        assert!((plan.flowchart.y - 300.0).abs() < 1e-3);
        assert!((plan.overview.width - 459.0).abs() < 1e-3);
        assert!((plan.flowchart.x - 567.0).abs() < 1e-3);
        assert!((plan.statistics.bottom() - 1866.0).abs() < 1e-3);
    }

    #[test]
    fn test_reference_canvas_nodes_follow_formula() {
        let (_, plan) = plan_for(1080.0, 1920.0);
        let expected_height = (1566.0 - 54.0 * 6.0) / 5.0;
        let spacing = expected_height * NODE_SPACING_RATIO;
        for (i, node) in plan.nodes.iter().enumerate() {
            assert!((node.height - expected_height).abs() < 1e-2);
            let expected_y = 300.0 + 54.0 * 3.0 + i as f32 * (expected_height + spacing);
            assert!((node.y - expected_y).abs() < 1e-2, "node {i} y={}", node.y);
            assert!((node.x - 621.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_regions_valid_across_canvas_shapes() {
        for (w, h) in [
            (1080.0, 1920.0),
            (540.0, 960.0),
            (1920.0, 1080.0),
            (1000.0, 1000.0),
            (300.0, 4000.0),
            (4000.0, 300.0),
            (1080.0, 10000.0),
            (20000.0, 20000.0),
            (64.0, 64.0),
        ] {
            let (metrics, plan) = plan_for(w, h);
            assert_valid(&metrics, &plan);
        }
    }

    #[test]
    fn test_margin_capped_on_huge_canvas() {
        let metrics = CanvasMetrics::from_dimensions(20000.0, 20000.0).unwrap();
        let m = margin_for(&metrics, &LayoutParams::default());
        assert!((m - 20000.0 * MAX_MARGIN_FRACTION).abs() < 1e-2);
    }

    #[test]
    fn test_overlaps_ignores_touching_edges() {
        let a = Region::new(0.0, 0.0, 10.0, 10.0);
        let b = Region::new(10.0, 0.0, 10.0, 10.0);
        let c = Region::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
