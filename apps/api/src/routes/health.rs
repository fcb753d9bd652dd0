use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and measurement backend status.
///
/// `probes_outstanding` is zero whenever no fit is running; a steady non-zero
/// value means a measurement leaked its probe.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let measurer = state.engine.measurer();
    let probes = measurer.ledger().stats();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "bigtext-api",
        "measurer": {
            "backend": measurer.backend(),
            "probes_outstanding": probes.outstanding,
            "probes_acquired": probes.acquired
        },
        "fit_cache_entries": state.engine.cached_fits()
    }))
}
