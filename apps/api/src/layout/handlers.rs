//! Axum route handlers for the stateless fit API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::font_metrics::StyleParams;
use crate::layout::solver::{Container, FitResult, MAX_DIMENSION_PX};
use crate::state::AppState;

/// Longest text accepted by the fit endpoints, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct FitRequest {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct StyleResponse {
    pub style: StyleParams,
    /// CSS `font-family` the renderer must use for parity with measurement.
    pub css_font_family: &'static str,
    pub measurer: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Validation
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn validate_container(width: f32, height: f32) -> Result<Container, AppError> {
    Container::new(width, height).ok_or_else(|| {
        AppError::Validation(format!(
            "width and height must be finite and between 0 and {MAX_DIMENSION_PX}, got {width}x{height}"
        ))
    })
}

pub(crate) fn validate_text(text: &str) -> Result<(), AppError> {
    let chars = text.chars().count();
    if chars > MAX_TEXT_CHARS {
        return Err(AppError::Validation(format!(
            "text is {chars} characters; the limit is {MAX_TEXT_CHARS}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/fit
///
/// Returns the largest font size at which `text` fits a `width`×`height` area.
/// Blank text is valid and yields the default size.
pub async fn handle_fit(
    State(state): State<AppState>,
    Json(request): Json<FitRequest>,
) -> Result<Json<FitResult>, AppError> {
    let container = validate_container(request.width, request.height)?;
    validate_text(&request.text)?;

    let result = state.engine.fit_blocking(request.text, container).await?;
    Ok(Json(result))
}

/// GET /api/v1/style
///
/// The fixed style the fit is computed for.
pub async fn handle_get_style(State(state): State<AppState>) -> Json<StyleResponse> {
    let style = state.engine.style().clone();
    Json(StyleResponse {
        css_font_family: style.family.css_stack(),
        measurer: state.engine.measurer().backend(),
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_container_rejects_nan() {
        assert!(matches!(
            validate_container(f32::NAN, 100.0),
            Err(AppError::Validation(_))
        ));
        assert!(validate_container(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_validate_container_rejects_oversized() {
        assert!(matches!(
            validate_container(1e8, 1e8),
            Err(AppError::Validation(_))
        ));
        assert!(validate_container(MAX_DIMENSION_PX, 1.0).is_ok());
    }

    #[test]
    fn test_validate_text_limit() {
        assert!(validate_text(&"x".repeat(MAX_TEXT_CHARS)).is_ok());
        assert!(validate_text(&"x".repeat(MAX_TEXT_CHARS + 1)).is_err());
    }
}
