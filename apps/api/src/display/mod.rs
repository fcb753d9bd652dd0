// The single text screen: editing/display views, theme, and the fit shown.
// State lives in an explicit controller owned by AppState; handlers drive it.

pub mod controller;
pub mod handlers;

pub use controller::{DisplayController, Theme};
