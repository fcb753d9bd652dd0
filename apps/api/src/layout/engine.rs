//! The process-wide fit engine: one measurer, one style, one cache.
//!
//! Solving is CPU-bound and synchronous. `fit_blocking` runs a whole solve
//! inside `tokio::task::spawn_blocking` so the async executor stays free; the
//! solve itself never suspends.

use std::sync::Arc;

use crate::errors::AppError;
use crate::layout::cache::FitCache;
use crate::layout::font_metrics::StyleParams;
use crate::layout::measure::TextMeasurer;
use crate::layout::solver::{solve, Container, FitParams, FitResult};

pub struct FitEngine {
    measurer: Arc<dyn TextMeasurer>,
    style: StyleParams,
    params: FitParams,
    cache: FitCache,
}

impl FitEngine {
    pub fn new(
        measurer: Arc<dyn TextMeasurer>,
        style: StyleParams,
        params: FitParams,
        cache_capacity: usize,
    ) -> Self {
        FitEngine {
            measurer,
            style,
            params,
            cache: FitCache::new(cache_capacity),
        }
    }

    pub fn style(&self) -> &StyleParams {
        &self.style
    }

    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }

    pub fn cached_fits(&self) -> usize {
        self.cache.len()
    }

    /// Synchronous, memoized solve.
    pub fn fit(&self, text: &str, container: Container) -> FitResult {
        self.cache.get_or_solve(text, container, || {
            solve(
                text,
                container,
                &self.style,
                self.measurer.as_ref(),
                &self.params,
            )
        })
    }

    /// Runs [`FitEngine::fit`] on the blocking pool.
    pub async fn fit_blocking(
        self: &Arc<Self>,
        text: String,
        container: Container,
    ) -> Result<FitResult, AppError> {
        let engine = Arc::clone(self);
        tokio::task::spawn_blocking(move || engine.fit(&text, container))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in fit: {e}")))
    }
}
