mod config;
mod display;
mod errors;
mod layout;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Timelike;
use parking_lot::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::display::{DisplayController, Theme};
use crate::layout::font_file::FontFileMeasurer;
use crate::layout::{Container, FitEngine, FitParams, StyleParams, TableMeasurer, TextMeasurer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (malformed env vars abort startup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BigText API v{}", env!("CARGO_PKG_VERSION"));

    // Display style: system UI black at 1.1 line height unless overridden
    let style = StyleParams {
        family: config.font_family,
        weight: config.font_weight,
        ..StyleParams::default()
    };
    info!(
        "Display style: {} weight {} line-height {}",
        style.family, style.weight.0, style.line_height
    );

    // Initialize the measurer (font file if configured, static tables otherwise)
    let measurer = build_measurer(&config)?;
    info!("Text measurer initialized (backend: {})", measurer.backend());

    let params = FitParams {
        height_probe: config.height_probe,
        ..FitParams::default()
    };
    let engine = FitEngine::new(measurer, style, params, config.fit_cache_capacity);

    let container = Container::new(config.display_width, config.display_height).with_context(
        || {
            format!(
                "DISPLAY_WIDTH/DISPLAY_HEIGHT must be finite and non-negative, got {}x{}",
                config.display_width, config.display_height
            )
        },
    )?;
    let theme = Theme::for_hour(chrono::Local::now().hour());
    info!("Display {}x{} starting in {:?} theme", container.width, container.height, theme);

    // Build app state
    let state = AppState {
        engine: Arc::new(engine),
        display: Arc::new(Mutex::new(DisplayController::new(container, theme))),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the measurement backend. A configured font file that fails to load
/// aborts startup rather than silently measuring with the wrong metrics.
fn build_measurer(config: &Config) -> Result<Arc<dyn TextMeasurer>> {
    match &config.font_path {
        Some(path) => {
            let measurer = FontFileMeasurer::from_path(path)
                .with_context(|| format!("Failed to load FONT_PATH {}", path.display()))?;
            info!("Loaded font file {}", path.display());
            Ok(Arc::new(measurer))
        }
        None => Ok(Arc::new(TableMeasurer::new())),
    }
}
