use anyhow::{bail, Context, Result};
use std::str::FromStr;

use crate::layout::LayoutParams;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Completion endpoint credential. Absent means extraction is unavailable,
    /// but the layout endpoints still work.
    pub anthropic_api_key: Option<String>,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub layout: LayoutParams,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LayoutParams::default();

        let layout = LayoutParams {
            margin_fraction: parse_or(&lookup, "LAYOUT_MARGIN_FRACTION", defaults.margin_fraction)?,
            title_height_fraction: parse_or(
                &lookup,
                "LAYOUT_TITLE_HEIGHT_FRACTION",
                defaults.title_height_fraction,
            )?,
            char_width_factor: parse_or(
                &lookup,
                "LAYOUT_CHAR_WIDTH_FACTOR",
                defaults.char_width_factor,
            )?,
        };
        validate_layout(&layout)?;

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 120)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            layout,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn validate_layout(params: &LayoutParams) -> Result<()> {
    if !(params.margin_fraction > 0.0 && params.margin_fraction <= 0.08) {
        bail!(
            "LAYOUT_MARGIN_FRACTION must be in (0, 0.08], got {}",
            params.margin_fraction
        );
    }
    if !(params.title_height_fraction > 0.0 && params.title_height_fraction <= 0.2) {
        bail!(
            "LAYOUT_TITLE_HEIGHT_FRACTION must be in (0, 0.2], got {}",
            params.title_height_fraction
        );
    }
    if !(params.char_width_factor > 0.0 && params.char_width_factor.is_finite()) {
        bail!(
            "LAYOUT_CHAR_WIDTH_FACTOR must be a positive number, got {}",
            params.char_width_factor
        );
    }
    Ok(())
}
