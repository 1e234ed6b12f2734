//! Element Renderer: turns an element layout into drawing primitive calls.
//!
//! `draw_plan` builds the ordered command list; `render_element` executes it
//! against a `DrawingSurface` one step at a time and stops at the first
//! failure. Steps already drawn stay on the canvas.

pub mod plan;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::errors::AppError;

pub use plan::draw_plan;

// ────────────────────────────────────────────────────────────────────────────
// Primitive payloads
// ────────────────────────────────────────────────────────────────────────────

/// Arguments of the host's `createRectangle` primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectangleSpec {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_hex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDecoration {
    None,
    Underline,
}

/// Arguments of the host's `createText` primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpec {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    pub text_align: TextAlign,
    pub color_hex: String,
    pub width: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    pub font_family: String,
}

/// One step of an element's draw pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", content = "args", rename_all = "camelCase")]
pub enum DrawCommand {
    CreateRectangle(RectangleSpec),
    CreateText(TextSpec),
}

// ────────────────────────────────────────────────────────────────────────────
// Surface
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("{0}")]
pub struct DrawError(pub String);

/// The host's drawing primitives.
#[async_trait]
pub trait DrawingSurface: Send {
    async fn create_rectangle(&mut self, spec: &RectangleSpec) -> Result<(), DrawError>;
    async fn create_text(&mut self, spec: &TextSpec) -> Result<(), DrawError>;
}

/// Surface that accepts every call and keeps the commands in order, for hosts
/// that replay them on their own canvas.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

#[async_trait]
impl DrawingSurface for RecordingSurface {
    async fn create_rectangle(&mut self, spec: &RectangleSpec) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::CreateRectangle(spec.clone()));
        Ok(())
    }

    async fn create_text(&mut self, spec: &TextSpec) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::CreateText(spec.clone()));
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub steps_completed: usize,
}

/// Executes `commands` in order. The first failing step aborts the rest and
/// is returned as `AppError::DrawFailed` with its 0-based index.
pub async fn render_element<S>(
    surface: &mut S,
    commands: &[DrawCommand],
) -> Result<RenderReport, AppError>
where
    S: DrawingSurface + ?Sized,
{
    for (step, command) in commands.iter().enumerate() {
        let result = match command {
            DrawCommand::CreateRectangle(spec) => surface.create_rectangle(spec).await,
            DrawCommand::CreateText(spec) => surface.create_text(spec).await,
        };

        if let Err(e) = result {
            error!(step, total = commands.len(), error = %e, "Draw step failed; aborting element");
            return Err(AppError::DrawFailed {
                step,
                message: e.to_string(),
            });
        }
    }

    debug!(steps = commands.len(), "Element drawn");
    Ok(RenderReport {
        steps_completed: commands.len(),
    })
}
