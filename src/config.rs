//! Configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a user `config.toml` in the config directory overrides any
//! subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [images]
//! sizes = "(min-width: 1024px) 20vw, (min-width: 768px) 33vw, 50vw"
//! primary = "last"          # "last" or "widest"
//!
//! [render]
//! loading = "lazy"          # "lazy", "eager" or "auto"
//! # class = "photo"         # CSS class on every <img>
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::imagetools::default_responsive_sizes;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Normalization policy (sizes hint, primary source selection).
    pub images: ImagesConfig,
    /// `<img>` rendering settings.
    pub render: RenderConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = self.images.sizes.trim();
        if sizes.is_empty() {
            return Err(ConfigError::Validation(
                "images.sizes must not be empty".into(),
            ));
        }
        if sizes.ends_with(',') {
            return Err(ConfigError::Validation(
                "images.sizes must not end with a comma".into(),
            ));
        }
        if let Some(class) = &self.render.class {
            if class.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "render.class must not be empty when set".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Which rendition becomes the single primary `image`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimarySelection {
    /// Last descriptor in input order (upstream sorts ascending by width).
    #[default]
    Last,
    /// Descriptor with the largest `w`, regardless of order. Ties go to the later one.
    Widest,
}

/// Normalization settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// `sizes` hint attached whenever a source set is built.
    pub sizes: String,
    /// Primary source policy.
    pub primary: PrimarySelection,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            sizes: default_responsive_sizes().to_string(),
            primary: PrimarySelection::default(),
        }
    }
}

/// Browser loading hint for rendered images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    #[default]
    Lazy,
    Eager,
    Auto,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Lazy => "lazy",
            Loading::Eager => "eager",
            Loading::Auto => "auto",
        }
    }
}

/// HTML rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// `loading` attribute on every `<img>`.
    pub loading: Loading,
    /// Optional CSS class on every `<img>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(Config::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config.toml, using defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    tracing::debug!(path = %config_path.display(), "loaded config.toml");
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`. Printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Photo Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Normalization
# ---------------------------------------------------------------------------
[images]
# sizes hint attached to every image that has a srcset.
# Default assumes a gallery grid: 5 columns on desktop, 3 on tablet, 2 on phones.
sizes = "(min-width: 1024px) 20vw, (min-width: 768px) 33vw, 50vw"

# Which rendition becomes the single `image` source:
#   "last"   - last entry as emitted by the image pipeline (ascending widths)
#   "widest" - entry with the largest width, whatever the order
primary = "last"

# ---------------------------------------------------------------------------
# HTML rendering
# ---------------------------------------------------------------------------
[render]
# loading attribute on <img>: "lazy", "eager" or "auto".
loading = "lazy"

# CSS class added to every <img>.
# class = "photo"
"##
}
