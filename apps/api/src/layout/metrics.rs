//! Canvas metrics: the resolved canvas size plus a uniform scale factor
//! relative to the 1080×1920 reference design.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const REFERENCE_WIDTH: f32 = 1080.0;
pub const REFERENCE_HEIGHT: f32 = 1920.0;

/// Resolved canvas size. `width`, `height` and `scale_factor` are always > 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasMetrics {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for CanvasMetrics {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            scale_factor: 1.0,
        }
    }
}

impl CanvasMetrics {
    /// Derives metrics for a canvas. Returns `None` unless both dimensions are
    /// finite and positive.
    ///
    /// A canvas relatively wider than the reference scales by height, anything
    /// else scales by width.
    pub fn from_dimensions(width: f32, height: f32) -> Option<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return None;
        }

        let reference_ratio = REFERENCE_WIDTH / REFERENCE_HEIGHT;
        let scale_factor = if width / height > reference_ratio {
            height / REFERENCE_HEIGHT
        } else {
            width / REFERENCE_WIDTH
        };

        Some(Self {
            width,
            height,
            scale_factor,
        })
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Raw answer of a canvas probe. Either field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[cfg(test)]
impl CanvasDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("canvas unavailable: {0}")]
    Unavailable(String),
}

/// Reports the host canvas size.
#[async_trait]
pub trait CanvasProbe: Send + Sync {
    async fn dimensions(&self) -> Result<CanvasDimensions, ProbeError>;
}

/// Probe backed by the dimensions a host sent along with its request.
pub struct RequestCanvasProbe {
    reported: Option<CanvasDimensions>,
}

impl RequestCanvasProbe {
    pub fn new(reported: Option<CanvasDimensions>) -> Self {
        Self { reported }
    }
}

#[async_trait]
impl CanvasProbe for RequestCanvasProbe {
    async fn dimensions(&self) -> Result<CanvasDimensions, ProbeError> {
        self.reported
            .ok_or_else(|| ProbeError::Unavailable("no canvas size reported".to_string()))
    }
}

/// Resolves canvas metrics from a probe. Never fails: a missing probe, a probe
/// error, or an incomplete/invalid answer all degrade to the reference canvas.
pub async fn resolve_metrics(probe: Option<&dyn CanvasProbe>) -> CanvasMetrics {
    let Some(probe) = probe else {
        debug!("No canvas probe; using reference canvas");
        return CanvasMetrics::default();
    };

    let dimensions = match probe.dimensions().await {
        Ok(d) => d,
        Err(e) => {
            debug!(error = %e, "Canvas probe failed; using reference canvas");
            return CanvasMetrics::default();
        }
    };

    match (dimensions.width, dimensions.height) {
        (Some(w), Some(h)) => CanvasMetrics::from_dimensions(w, h).unwrap_or_else(|| {
            debug!(width = w, height = h, "Invalid canvas size; using reference canvas");
            CanvasMetrics::default()
        }),
        _ => {
            debug!("Canvas probe answer incomplete; using reference canvas");
            CanvasMetrics::default()
        }
    }
}
