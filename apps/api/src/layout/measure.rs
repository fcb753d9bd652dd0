//! Text measurement capability used by the fit solver.
//!
//! A [`TextMeasurer`] answers one question: how many pixels would this string
//! occupy at a given font size, in the display's style, optionally inside a
//! width-constrained flow. Wrapping is word-safe: lines break only at
//! whitespace, never inside a word, and a word wider than the constraint
//! overflows its own line.
//!
//! Whitespace is collapsed the way a rendered text block collapses it, so
//! `"a \n  b"` measures the same as `"a b"`.

use serde::Serialize;
use thiserror::Error;

use crate::layout::font_metrics::{get_metrics, StyleParams};
use crate::layout::probe::ProbeLedger;

// ────────────────────────────────────────────────────────────────────────────
// Request / result types
// ────────────────────────────────────────────────────────────────────────────

/// One measurement query.
#[derive(Debug, Clone, Copy)]
pub struct MeasureRequest<'a> {
    pub content: &'a str,
    pub font_size_px: f32,
    /// Maximum line width in px. `None` measures a single line.
    pub constrained_width: Option<f32>,
    pub style: &'a StyleParams,
}

impl<'a> MeasureRequest<'a> {
    pub fn new(content: &'a str, font_size_px: f32, style: &'a StyleParams) -> Self {
        Self {
            content,
            font_size_px,
            constrained_width: None,
            style,
        }
    }

    pub fn constrained(mut self, width: f32) -> Self {
        self.constrained_width = Some(width);
        self
    }
}

/// Rendered extent in px.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("font size must be finite and positive, got {0}")]
    InvalidFontSize(f32),

    #[error("failed to load font: {0}")]
    FontLoad(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Measurement backend. Implement this to swap the metrics source without
/// touching the solver.
///
/// Carried in `AppState` as `Arc<dyn TextMeasurer>`. Every `measure` call must
/// acquire exactly one probe from [`TextMeasurer::ledger`] and release it
/// before returning, on success and on failure.
pub trait TextMeasurer: Send + Sync {
    fn measure(&self, request: &MeasureRequest<'_>) -> Result<TextExtent, MeasureError>;

    /// Short backend identifier for logs and diagnostics.
    fn backend(&self) -> &'static str;

    fn ledger(&self) -> &ProbeLedger;
}

pub(crate) fn check_font_size(font_size_px: f32) -> Result<(), MeasureError> {
    if font_size_px.is_finite() && font_size_px > 0.0 {
        Ok(())
    } else {
        Err(MeasureError::InvalidFontSize(font_size_px))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Word-safe wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Lines and widest line (in em) produced by greedy word-safe wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WrapOutcome {
    pub lines: usize,
    pub widest_em: f32,
}

impl WrapOutcome {
    /// Converts to px. `scale` maps em to px horizontally; height is the line
    /// count times the line box.
    pub fn extent(&self, scale: f32, font_size_px: f32, line_height: f32) -> TextExtent {
        TextExtent {
            width: self.widest_em * scale,
            height: self.lines as f32 * line_height * font_size_px,
        }
    }
}

/// Greedy word-wrap over em widths.
///
/// Line fit is decided as `line_em * scale <= limit_px`, so the result is
/// monotone in both `scale` and `limit_px`. A word that alone exceeds the limit
/// is placed on its own line. With no limit everything lands on one line.
pub(crate) fn wrap_words<F>(
    words: &[&str],
    space_em: f32,
    word_em: F,
    scale: f32,
    limit_px: Option<f32>,
) -> WrapOutcome
where
    F: Fn(&str) -> f32,
{
    let mut lines = 0usize;
    let mut widest_em = 0.0_f32;
    let mut current: Option<f32> = None;

    for word in words {
        let width = word_em(word);
        current = Some(match current {
            None => width,
            Some(line) => {
                let extended = line + space_em + width;
                match limit_px {
                    Some(limit) if extended * scale > limit => {
                        widest_em = widest_em.max(line);
                        lines += 1;
                        width
                    }
                    _ => extended,
                }
            }
        });
    }

    if let Some(line) = current {
        widest_em = widest_em.max(line);
        lines += 1;
    }

    WrapOutcome { lines, widest_em }
}

// ────────────────────────────────────────────────────────────────────────────
// TableMeasurer — static metric tables
// ────────────────────────────────────────────────────────────────────────────

/// Measurer backed by the static width tables in `font_metrics`.
///
/// Deterministic and always available. Weight is applied as a uniform width
/// factor on top of the regular-weight tables.
#[derive(Debug, Default)]
pub struct TableMeasurer {
    ledger: ProbeLedger,
}

impl TableMeasurer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextMeasurer for TableMeasurer {
    fn measure(&self, request: &MeasureRequest<'_>) -> Result<TextExtent, MeasureError> {
        let _probe = self.ledger.acquire();
        check_font_size(request.font_size_px)?;

        let table = get_metrics(&request.style.family);
        let words: Vec<&str> = request.content.split_whitespace().collect();
        let scale = request.font_size_px * request.style.weight.width_factor();

        let outcome = wrap_words(
            &words,
            table.space_width,
            |word| table.measure_str(word),
            scale,
            request.constrained_width,
        );
        Ok(outcome.extent(scale, request.font_size_px, request.style.line_height))
    }

    fn backend(&self) -> &'static str {
        "static-table"
    }

    fn ledger(&self) -> &ProbeLedger {
        &self.ledger
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
