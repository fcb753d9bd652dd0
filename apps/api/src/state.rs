use std::sync::Arc;

use parking_lot::Mutex;

use crate::display::DisplayController;
use crate::layout::FitEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Measurer, display style and fit cache. Fixed for the process lifetime.
    pub engine: Arc<FitEngine>,
    /// The one screen this service drives. Never locked across an `.await`.
    pub display: Arc<Mutex<DisplayController>>,
}
