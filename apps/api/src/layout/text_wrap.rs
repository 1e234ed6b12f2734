//! Character-budget text wrapping and font fitting.
//!
//! Widths are estimated, not measured: every glyph is assumed to advance
//! `CHAR_WIDTH_FACTOR × font_size`. The same estimate drives the title sizer
//! and every wrap budget, so both agree on what fits.

use serde::{Deserialize, Serialize};

use crate::layout::regions::Region;

/// Average glyph advance as a fraction of font size.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;
/// Line height as a multiple of font size for body text.
pub const BODY_LINE_HEIGHT: f32 = 1.4;
/// Line height as a multiple of font size for titles and headers.
pub const HEADING_LINE_HEIGHT: f32 = 1.2;

/// Each vertical-fit pass shrinks the font to this fraction of the previous size.
const FIT_SHRINK_STEP: f32 = 0.9;
const MAX_FIT_PASSES: u8 = 5;

// ────────────────────────────────────────────────────────────────────────────
// Wrapped text
// ────────────────────────────────────────────────────────────────────────────

/// Text pre-split into display lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrappedText {
    lines: Vec<String>,
}

impl WrappedText {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines joined with `\n`, ready for a multi-line text primitive.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Joins independently wrapped blocks with one blank line between them.
    pub fn join_blocks(blocks: &[WrappedText]) -> WrappedText {
        let mut lines = Vec::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(block.lines.iter().cloned());
        }
        WrappedText { lines }
    }
}

/// Greedy word wrap on whitespace.
///
/// Words are added to the current line while `line + 1 + word <= max_chars`.
/// A word longer than `max_chars` is never split; it gets a line of its own.
/// A budget of 0 is treated as 1.
pub fn wrap_text(text: &str, max_chars: usize) -> WrappedText {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    WrappedText { lines }
}

/// Character budget for a line of `usable_width` pixels at `font_size`.
/// Always at least 1.
pub fn max_chars_per_line(usable_width: f32, font_size: f32, char_width_factor: f32) -> usize {
    let advance = font_size * char_width_factor;
    if advance <= 0.0 || usable_width <= 0.0 {
        return 1;
    }
    ((usable_width / advance).floor() as usize).max(1)
}

/// Estimated rendered width of a single line.
pub fn estimate_text_width(text: &str, font_size: f32, char_width_factor: f32) -> f32 {
    text.chars().count() as f32 * font_size * char_width_factor
}

/// Largest font size in `[min_size, base_size]` at which `text` is estimated
/// to fit on one line of `max_width`.
///
/// Returns `base_size` when it already fits or the text is empty. Otherwise
/// shrinks to `floor((max_width / chars) / factor)`, never below `min_size`.
/// A `min_size` above `base_size` is clamped to `base_size`.
pub fn fit_font_size(
    text: &str,
    max_width: f32,
    base_size: f32,
    min_size: f32,
    char_width_factor: f32,
) -> f32 {
    let chars = text.chars().count();
    if chars == 0 {
        return base_size;
    }

    let min_size = min_size.min(base_size);
    if estimate_text_width(text, base_size, char_width_factor) <= max_width {
        return base_size;
    }

    let shrunk = ((max_width / chars as f32) / char_width_factor).floor();
    shrunk.max(min_size)
}

// ────────────────────────────────────────────────────────────────────────────
// Positioned blocks
// ────────────────────────────────────────────────────────────────────────────

/// A wrapped block of text placed on the canvas. `frame.height` is the
/// estimated height of the lines, not the height of the enclosing region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub frame: Region,
    pub font_size: f32,
    pub line_height: f32,
    pub text: WrappedText,
    /// Still taller than its available space after shrinking to the minimum size.
    pub overflow: bool,
}

/// Outcome of fitting wrapped text into a fixed height.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_size: f32,
    pub text: WrappedText,
    pub height: f32,
    pub overflow: bool,
}

pub fn block_height(text: &WrappedText, font_size: f32, line_height: f32) -> f32 {
    text.line_count() as f32 * font_size * line_height
}

/// Wraps text at `planned_size`, then shrinks the font a step at a time until
/// the wrapped lines fit `max_height` or `min_size` / the pass limit is reached.
///
/// `wrap_at` re-wraps the content for a candidate font size; a smaller font
/// means a larger character budget and usually fewer lines.
pub fn fit_to_height<F>(
    planned_size: f32,
    min_size: f32,
    max_height: f32,
    line_height: f32,
    mut wrap_at: F,
) -> FittedText
where
    F: FnMut(f32) -> WrappedText,
{
    let min_size = min_size.min(planned_size);
    let mut font_size = planned_size;
    let mut passes = 0u8;

    loop {
        let text = wrap_at(font_size);
        let height = block_height(&text, font_size, line_height);

        if height <= max_height {
            return FittedText {
                font_size,
                text,
                height,
                overflow: false,
            };
        }
        if passes >= MAX_FIT_PASSES || font_size <= min_size {
            return FittedText {
                font_size,
                text,
                height,
                overflow: true,
            };
        }

        font_size = (font_size * FIT_SHRINK_STEP).max(min_size);
        passes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    // ── wrap_text ───────────────────────────────────────────────────────────

    #[test]
    fn test_wrap_empty_is_no_lines() {
        assert!(wrap_text("", 10).is_empty());
        assert!(wrap_text("   \n\t ", 10).is_empty());
    }

    #[test]
    fn test_wrap_greedy_fill() {
        let wrapped = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(
            wrapped.lines(),
            &["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
    }

    #[test]
    fn test_wrap_exact_budget_stays_on_line() {
        // "ab cd" is exactly 5 chars
        let wrapped = wrap_text("ab cd ef", 5);
        assert_eq!(wrapped.lines(), &["ab cd", "ef"]);
    }

    #[test]
    fn test_long_word_kept_whole() {
        let wrapped = wrap_text("aaaaaaaaaaaaaaaaaaaa", 10);
        assert_eq!(wrapped.line_count(), 1);
        assert_eq!(wrapped.lines()[0].chars().count(), 20);
    }

    #[test]
    fn test_long_word_gets_own_line_between_short_words() {
        let wrapped = wrap_text("go supercalifragilistic now", 6);
        assert_eq!(wrapped.lines(), &["go", "supercalifragilistic", "now"]);
    }

    #[test]
    fn test_zero_budget_treated_as_one() {
        let wrapped = wrap_text("a b c", 0);
        assert_eq!(wrapped.lines(), &["a", "b", "c"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        // each word is 5 chars but 10 bytes
        let wrapped = wrap_text("ééééé ééééé", 11);
        assert_eq!(wrapped.line_count(), 1);
    }

    #[test]
    fn test_wrap_lines_respect_budget_and_rejoin_losslessly() {
        let samples = [
            "Coffee moves from farm to cup through harvest, processing, export, roasting and brewing.",
            "  leading and   trailing\twhitespace\n everywhere  ",
            "one",
            "internationalization localization a b c d e f",
        ];
        for text in samples {
            for budget in [1usize, 3, 8, 12, 25, 80] {
                let wrapped = wrap_text(text, budget);
                for line in wrapped.lines() {
                    let len = line.chars().count();
                    assert!(
                        len <= budget || !line.contains(' '),
                        "line {line:?} exceeds budget {budget} and is not a single word"
                    );
                }
                assert_eq!(wrapped.lines().join(" "), normalized(text));
            }
        }
    }

    #[test]
    fn test_join_blocks_inserts_blank_line() {
        let blocks = vec![wrap_text("a b", 3), wrap_text("c", 3)];
        let joined = WrappedText::join_blocks(&blocks);
        assert_eq!(joined.lines(), &["a b", "", "c"]);
        assert_eq!(joined.to_text(), "a b\n\nc");
    }

    // ── max_chars_per_line ──────────────────────────────────────────────────

    #[test]
    fn test_max_chars_per_line_floor() {
        // 100 / (10 * 0.6) = 16.67
        assert_eq!(max_chars_per_line(100.0, 10.0, CHAR_WIDTH_FACTOR), 16);
    }

    #[test]
    fn test_max_chars_per_line_never_zero() {
        assert_eq!(max_chars_per_line(1.0, 100.0, CHAR_WIDTH_FACTOR), 1);
        assert_eq!(max_chars_per_line(-5.0, 10.0, CHAR_WIDTH_FACTOR), 1);
        assert_eq!(max_chars_per_line(100.0, 0.0, CHAR_WIDTH_FACTOR), 1);
    }

    // ── fit_font_size ───────────────────────────────────────────────────────

    #[test]
    fn test_fit_font_size_empty_returns_base() {
        assert_eq!(fit_font_size("", 100.0, 40.0, 10.0, CHAR_WIDTH_FACTOR), 40.0);
    }

    #[test]
    fn test_fit_font_size_fitting_text_keeps_base() {
        // 5 chars * 40 * 0.6 = 120 <= 200
        assert_eq!(fit_font_size("Hello", 200.0, 40.0, 10.0, CHAR_WIDTH_FACTOR), 40.0);
    }

    #[test]
    fn test_fit_font_size_shrinks_proportionally() {
        // 20 chars * 40 * 0.6 = 480 > 300 → floor((300/20)/0.6) = 25
        let text = "a".repeat(20);
        assert_eq!(fit_font_size(&text, 300.0, 40.0, 10.0, CHAR_WIDTH_FACTOR), 25.0);
    }

    #[test]
    fn test_fit_font_size_clamped_to_min() {
        let text = "a".repeat(200);
        assert_eq!(fit_font_size(&text, 300.0, 40.0, 18.0, CHAR_WIDTH_FACTOR), 18.0);
    }

    #[test]
    fn test_fit_font_size_always_within_bounds() {
        for len in [1usize, 5, 17, 40, 99, 400] {
            for width in [0.0f32, 10.0, 150.0, 972.0, 5000.0] {
                let text = "x".repeat(len);
                let size = fit_font_size(&text, width, 45.36, 21.6, CHAR_WIDTH_FACTOR);
                assert!((21.6..=45.36).contains(&size), "size {size} out of bounds");
            }
        }
    }

    #[test]
    fn test_fit_font_size_min_above_base_clamped() {
        let text = "a".repeat(200);
        assert_eq!(fit_font_size(&text, 10.0, 20.0, 30.0, CHAR_WIDTH_FACTOR), 20.0);
    }

    // ── fit_to_height ───────────────────────────────────────────────────────

    #[test]
    fn test_fit_to_height_keeps_planned_size_when_it_fits() {
        let fitted = fit_to_height(20.0, 12.0, 1000.0, BODY_LINE_HEIGHT, |size| {
            wrap_text("short text", max_chars_per_line(300.0, size, CHAR_WIDTH_FACTOR))
        });
        assert_eq!(fitted.font_size, 20.0);
        assert!(!fitted.overflow);
        assert!(fitted.height <= 1000.0);
    }

    #[test]
    fn test_fit_to_height_shrinks_until_fit() {
        let text = "word ".repeat(60);
        let fitted = fit_to_height(20.0, 12.0, 200.0, BODY_LINE_HEIGHT, |size| {
            wrap_text(&text, max_chars_per_line(300.0, size, CHAR_WIDTH_FACTOR))
        });
        assert!(fitted.font_size < 20.0);
        assert!(fitted.font_size >= 12.0);
        if !fitted.overflow {
            assert!(fitted.height <= 200.0);
        }
    }

    #[test]
    fn test_fit_to_height_flags_overflow_at_min() {
        let text = "word ".repeat(500);
        let fitted = fit_to_height(20.0, 12.0, 50.0, BODY_LINE_HEIGHT, |size| {
            wrap_text(&text, max_chars_per_line(300.0, size, CHAR_WIDTH_FACTOR))
        });
        assert!(fitted.overflow);
        assert!(fitted.font_size >= 12.0);
    }
}
