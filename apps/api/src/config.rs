use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::{FontFamily, FontWeight, HeightProbe};

/// Application configuration loaded from environment variables.
/// Every variable has a default; a present but malformed value is a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Metric table used when no font file is configured.
    pub font_family: FontFamily,
    pub font_weight: FontWeight,
    /// Font file the display renders with. Enables the font-file measurer.
    pub font_path: Option<PathBuf>,
    /// Layout the height check assumes: `wrapped` (default) or `single_line`.
    pub height_probe: HeightProbe,
    /// Memoized fit results kept in memory. 0 disables the cache.
    pub fit_cache_capacity: usize,
    /// Initial display size in px, until the first resize event.
    pub display_width: f32,
    pub display_height: f32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let font_weight: u16 = parse_or(&lookup, "FONT_WEIGHT", 900)?;
        if !(100..=900).contains(&font_weight) {
            anyhow::bail!("FONT_WEIGHT must be between 100 and 900, got {font_weight}");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            font_family: parse_or(&lookup, "FONT_FAMILY", FontFamily::SystemUi)?,
            font_weight: FontWeight(font_weight),
            font_path: lookup("FONT_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            height_probe: parse_or(&lookup, "FIT_HEIGHT_PROBE", HeightProbe::Wrapped)?,
            fit_cache_capacity: parse_or(&lookup, "FIT_CACHE_CAPACITY", 256)?,
            display_width: parse_or(&lookup, "DISPLAY_WIDTH", 1280.0)?,
            display_height: parse_or(&lookup, "DISPLAY_HEIGHT", 720.0)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
