// Fit-sizing core: text measurement, the decreasing-scan solver and its cache.
// Solving is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod cache;
pub mod engine;
pub mod font_file;
pub mod font_metrics;
pub mod handlers;
pub mod measure;
pub mod probe;
pub mod solver;

// Re-export the public API consumed by other modules (display, state, main).
pub use engine::FitEngine;
pub use font_metrics::{FontFamily, FontWeight, StyleParams};
pub use measure::{TableMeasurer, TextMeasurer};
pub use solver::{Container, FitParams, HeightProbe};
