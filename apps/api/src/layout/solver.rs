//! Fit Solver — picks the largest font size at which text fills the container
//! without overflowing it and without splitting a word across lines.
//!
//! # Algorithm
//! Decreasing linear scan from `min(width, height) × 0.8` in 3px steps, down to
//! a 20px floor. A candidate is accepted when
//! - every word, measured alone, is at most 90% of the container width, and
//! - the whole text block is at most 90% of the container height.
//!
//! The first accepted candidate is the largest. If none is accepted the floor
//! is returned and the text is allowed to overflow.
//!
//! Candidates sit on multiples of the step, so two containers always probe
//! the same sizes and a smaller container can never land on a larger result.
//!
//! The solver is pure for a deterministic measurer and never fails: a
//! measurement error degrades to the default size.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::font_metrics::StyleParams;
use crate::layout::measure::{MeasureError, MeasureRequest, TextMeasurer};

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Display area in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

/// Largest accepted container side. Far beyond any real display, and small
/// enough that every scan stays short and exact in `f32`.
pub const MAX_DIMENSION_PX: f32 = 100_000.0;

impl Container {
    /// Rejects non-finite, negative and oversized dimensions.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let valid = |v: f32| v.is_finite() && (0.0..=MAX_DIMENSION_PX).contains(&v);
        (valid(width) && valid(height)).then_some(Container { width, height })
    }

    pub fn shorter_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// Which wrapping the height probe assumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightProbe {
    /// Word-safe wrapping at the usable width, as the display lays the text out.
    Wrapped,
    /// The whole text on one line.
    SingleLine,
}

#[derive(Debug, Error)]
#[error("unknown height probe '{0}' (expected wrapped or single_line)")]
pub struct UnknownHeightProbe(String);

impl FromStr for HeightProbe {
    type Err = UnknownHeightProbe;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "wrapped" => Ok(HeightProbe::Wrapped),
            "single_line" => Ok(HeightProbe::SingleLine),
            other => Err(UnknownHeightProbe(other.to_string())),
        }
    }
}

/// Tuning of the scan. `Default` is the display's behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct FitParams {
    /// First candidate as a fraction of the container's shorter side.
    pub start_ratio: f32,
    /// Usable fraction of container width and height.
    pub fill_ratio: f32,
    pub floor_px: f32,
    pub step_px: f32,
    /// Size used when there is nothing to fit, or measuring failed.
    pub default_px: f32,
    pub height_probe: HeightProbe,
}

pub const FLOOR_PX: f32 = 20.0;
pub const STEP_PX: f32 = 3.0;
pub const DEFAULT_FONT_SIZE_PX: f32 = 100.0;

impl Default for FitParams {
    fn default() -> Self {
        FitParams {
            start_ratio: 0.8,
            fill_ratio: 0.9,
            floor_px: FLOOR_PX,
            step_px: STEP_PX,
            default_px: DEFAULT_FONT_SIZE_PX,
            height_probe: HeightProbe::Wrapped,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitOutcome {
    /// Blank text; nothing was measured.
    Empty,
    /// A candidate satisfied both constraints.
    Fitted,
    /// No candidate above the floor fit; the floor is returned and may overflow.
    Degenerate,
    /// The measurer failed; the default size is returned.
    MeasureFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub font_size_px: f32,
    pub outcome: FitOutcome,
    pub candidates_tried: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Solver
// ────────────────────────────────────────────────────────────────────────────

/// Computes the largest acceptable font size for `text` in `container`.
pub fn solve(
    text: &str,
    container: Container,
    style: &StyleParams,
    measurer: &dyn TextMeasurer,
    params: &FitParams,
) -> FitResult {
    if text.trim().is_empty() {
        return FitResult {
            font_size_px: params.default_px,
            outcome: FitOutcome::Empty,
            candidates_tried: 0,
        };
    }

    let start = first_candidate(container, params);
    match scan(text, container, style, measurer, params, start) {
        Ok(result) => {
            debug!(
                font_size_px = result.font_size_px,
                outcome = ?result.outcome,
                candidates = result.candidates_tried,
                width = container.width,
                height = container.height,
                "fit computed"
            );
            result
        }
        Err((error, candidates_tried)) => {
            let fallback = params.default_px.min(start).max(params.floor_px);
            warn!(
                backend = measurer.backend(),
                error = %error,
                fallback_px = fallback,
                "text measurement failed; using default size"
            );
            FitResult {
                font_size_px: fallback,
                outcome: FitOutcome::MeasureFailed,
                candidates_tried,
            }
        }
    }
}

/// `min(w, h) × start_ratio`, snapped down onto the step lattice.
///
/// The side is clamped to `MAX_DIMENSION_PX` since `Container`'s fields are
/// public and may bypass `Container::new`.
fn first_candidate(container: Container, params: &FitParams) -> f32 {
    let side = container.shorter_side().min(MAX_DIMENSION_PX);
    let ceiling = side * params.start_ratio;
    (ceiling / params.step_px).floor() * params.step_px
}

/// Number of candidates strictly above the floor: `start - k × step` for
/// `k in 0..steps`.
fn candidate_count(start: f32, params: &FitParams) -> u32 {
    if start > params.floor_px && params.step_px > 0.0 {
        ((start - params.floor_px) / params.step_px).ceil() as u32
    } else {
        0
    }
}

fn scan(
    text: &str,
    container: Container,
    style: &StyleParams,
    measurer: &dyn TextMeasurer,
    params: &FitParams,
    start: f32,
) -> Result<FitResult, (MeasureError, u32)> {
    let max_width = container.width * params.fill_ratio;
    let max_height = container.height * params.fill_ratio;
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut tried = 0u32;

    for k in 0..candidate_count(start, params) {
        let candidate = start - k as f32 * params.step_px;
        tried += 1;

        let block = match params.height_probe {
            HeightProbe::Wrapped => {
                MeasureRequest::new(text, candidate, style).constrained(max_width)
            }
            HeightProbe::SingleLine => MeasureRequest::new(text, candidate, style),
        };
        let text_height = measurer.measure(&block).map_err(|e| (e, tried))?.height;

        let mut word_too_big = false;
        for word in &words {
            let extent = measurer
                .measure(&MeasureRequest::new(word, candidate, style))
                .map_err(|e| (e, tried))?;
            if extent.width > max_width {
                word_too_big = true;
                break;
            }
        }

        if !word_too_big && text_height <= max_height {
            return Ok(FitResult {
                font_size_px: candidate,
                outcome: FitOutcome::Fitted,
                candidates_tried: tried,
            });
        }
    }

    Ok(FitResult {
        font_size_px: params.floor_px,
        outcome: FitOutcome::Degenerate,
        candidates_tried: tried,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
