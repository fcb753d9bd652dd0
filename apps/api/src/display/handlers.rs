//! Axum route handlers for the display screen.

use axum::{extract::State, Json};
use tracing::debug;

use crate::display::controller::{DisplayEvent, DisplaySnapshot};
use crate::errors::AppError;
use crate::layout::handlers::{validate_container, validate_text};
use crate::state::AppState;

/// GET /api/v1/display
///
/// Current view, theme, text and the font size to render it at.
pub async fn handle_get_display(State(state): State<AppState>) -> Json<DisplaySnapshot> {
    Json(state.display.lock().snapshot())
}

/// POST /api/v1/display/events
///
/// Applies one event and, if the text or size changed, recomputes the fit
/// before answering. The returned snapshot therefore always carries a size
/// for the text it shows, unless an even newer event is already in flight.
pub async fn handle_display_event(
    State(state): State<AppState>,
    Json(event): Json<DisplayEvent>,
) -> Result<Json<DisplaySnapshot>, AppError> {
    match &event {
        DisplayEvent::TextChanged { text } => validate_text(text)?,
        DisplayEvent::Resized { width, height } => {
            validate_container(*width, *height)?;
        }
        _ => {}
    }

    // The lock is never held across an await.
    let pending = {
        let mut screen = state.display.lock();
        let change = screen.apply(event);
        let (view, theme) = (screen.view(), screen.theme());
        debug!(?change, ?view, ?theme, "display event applied");
        screen.fit_pending().then(|| screen.refit_request())
    };

    if let Some(request) = pending {
        let fit = state
            .engine
            .fit_blocking(request.text, request.container)
            .await?;
        let applied = state.display.lock().apply_fit(request.revision, fit);
        if !applied {
            debug!(revision = request.revision, "stale fit dropped");
        }
    }

    let snapshot = state.display.lock().snapshot();
    Ok(Json(snapshot))
}
