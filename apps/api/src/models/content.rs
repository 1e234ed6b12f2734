//! Structured content produced by text analysis, and the element kinds that
//! can be placed on the canvas from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::warn;

/// Number of statistics the layout is designed around.
pub const EXPECTED_STATISTICS: usize = 3;
/// Number of flowchart steps; the flowchart region always has this many node slots.
pub const FLOWCHART_NODE_COUNT: usize = 5;

/// One step of the flowchart. A node without a title is kept in sequence but
/// never drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowchartNode {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlowchartNode {
    /// Title with surrounding whitespace removed, or `None` if missing or blank.
    pub fn usable_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn usable_description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Parsed result of text analysis. Read-only once created; a new generation
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub title: String,
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowchart: Option<Vec<FlowchartNode>>,
}

impl StructuredContent {
    /// True if at least one statistic has visible text.
    pub fn has_statistics(&self) -> bool {
        self.statistics
            .as_ref()
            .is_some_and(|s| s.iter().any(|stat| !stat.trim().is_empty()))
    }

    pub fn has_flowchart(&self) -> bool {
        self.flowchart.as_ref().is_some_and(|f| !f.is_empty())
    }

    /// The elements a host may add to its canvas for this content.
    /// Title and overview are always offered.
    pub fn available_elements(&self) -> Vec<ElementKind> {
        let mut kinds = vec![ElementKind::Title, ElementKind::Overview];
        if self.has_statistics() {
            kinds.push(ElementKind::Statistics);
        }
        if self.has_flowchart() {
            kinds.push(ElementKind::Flowchart);
        }
        kinds
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
}

impl StructuredContent {
    /// Trims every field and enforces the content rules.
    ///
    /// `title` and `overview` must be non-blank. Blank statistics are dropped
    /// and an empty list becomes `None`; flowcharts longer than the number of
    /// node slots are truncated.
    pub fn normalized(self) -> Result<Self, ContentError> {
        let title = required(self.title, "title")?;
        let overview = required(self.overview, "overview")?;

        let statistics = self
            .statistics
            .map(|stats| {
                stats
                    .into_iter()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|stats| !stats.is_empty());
        if let Some(stats) = &statistics {
            if stats.len() != EXPECTED_STATISTICS {
                warn!(
                    count = stats.len(),
                    expected = EXPECTED_STATISTICS,
                    "Unexpected number of statistics; layout will adapt"
                );
            }
        }

        let flowchart = self
            .flowchart
            .map(|mut nodes| {
                if nodes.len() > FLOWCHART_NODE_COUNT {
                    warn!(
                        count = nodes.len(),
                        kept = FLOWCHART_NODE_COUNT,
                        "Flowchart has more steps than node slots; truncating"
                    );
                    nodes.truncate(FLOWCHART_NODE_COUNT);
                }
                nodes
            })
            .filter(|nodes| !nodes.is_empty());

        Ok(Self {
            title,
            overview,
            statistics,
            flowchart,
        })
    }
}

fn required(value: String, name: &'static str) -> Result<String, ContentError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContentError::MissingField(name));
    }
    Ok(value.to_string())
}

/// The four content blocks an infographic is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Title,
    Overview,
    Statistics,
    Flowchart,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Title => "title",
            ElementKind::Overview => "overview",
            ElementKind::Statistics => "statistics",
            ElementKind::Flowchart => "flowchart",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> StructuredContent {
        StructuredContent {
            title: "T".to_string(),
            overview: "O".to_string(),
            statistics: None,
            flowchart: None,
        }
    }

    #[test]
    fn test_minimal_content_offers_title_and_overview_only() {
        assert_eq!(
            minimal().available_elements(),
            vec![ElementKind::Title, ElementKind::Overview]
        );
    }

    #[test]
    fn test_empty_optional_lists_are_not_offered() {
        let content = StructuredContent {
            statistics: Some(vec![]),
            flowchart: Some(vec![]),
            ..minimal()
        };
        assert_eq!(content.available_elements().len(), 2);
    }

    #[test]
    fn test_full_content_offers_all_four() {
        let content = StructuredContent {
            statistics: Some(vec!["a".into(), "b".into(), "c".into()]),
            flowchart: Some(vec![FlowchartNode::default()]),
            ..minimal()
        };
        assert_eq!(
            content.available_elements(),
            vec![
                ElementKind::Title,
                ElementKind::Overview,
                ElementKind::Statistics,
                ElementKind::Flowchart
            ]
        );
    }

    #[test]
    fn test_element_kind_serde_is_lowercase() {
        let kind: ElementKind = serde_json::from_str(r#""flowchart""#).unwrap();
        assert_eq!(kind, ElementKind::Flowchart);
        assert_eq!(serde_json::to_string(&ElementKind::Title).unwrap(), r#""title""#);
        assert_eq!(ElementKind::Statistics.to_string(), "statistics");
    }

    #[test]
    fn test_blank_node_title_is_not_usable() {
        let node = FlowchartNode {
            title: Some("   ".to_string()),
            description: Some("desc".to_string()),
        };
        assert!(node.usable_title().is_none());
        assert_eq!(node.usable_description(), Some("desc"));
    }

    #[test]
    fn test_blank_statistics_are_not_offered() {
        let content = StructuredContent {
            statistics: Some(vec!["  ".into(), String::new()]),
            ..minimal()
        };
        assert!(!content.has_statistics());
        assert_eq!(content.available_elements().len(), 2);
    }

    #[test]
    fn test_normalized_trims_and_drops_blank_statistics() {
        let content = StructuredContent {
            title: "  Tides ".to_string(),
            statistics: Some(vec!["one".into(), " two ".into(), "   ".into()]),
            ..minimal()
        }
        .normalized()
        .unwrap();
        assert_eq!(content.title, "Tides");
        assert_eq!(
            content.statistics,
            Some(vec!["one".to_string(), "two".to_string()])
        );

        let content = StructuredContent {
            statistics: Some(vec!["  ".into()]),
            ..minimal()
        }
        .normalized()
        .unwrap();
        assert!(content.statistics.is_none());
    }

    #[test]
    fn test_normalized_rejects_blank_title_or_overview() {
        let err = StructuredContent {
            title: "   ".to_string(),
            ..minimal()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err, ContentError::MissingField("title"));

        let err = StructuredContent {
            overview: String::new(),
            ..minimal()
        }
        .normalized()
        .unwrap_err();
        assert_eq!(err, ContentError::MissingField("overview"));
    }

    #[test]
    fn test_normalized_truncates_long_flowchart() {
        let content = StructuredContent {
            flowchart: Some(vec![FlowchartNode::default(); 8]),
            ..minimal()
        }
        .normalized()
        .unwrap();
        assert_eq!(content.flowchart.unwrap().len(), FLOWCHART_NODE_COUNT);
    }
}
