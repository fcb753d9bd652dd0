pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::display::handlers as display;
use crate::layout::handlers as fit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Fit API
        .route("/api/v1/fit", post(fit::handle_fit))
        .route("/api/v1/style", get(fit::handle_get_style))
        // Display API
        .route("/api/v1/display", get(display::handle_get_display))
        .route("/api/v1/display/events", post(display::handle_display_event))
        .with_state(state)
}
