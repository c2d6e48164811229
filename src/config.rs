//! Engine configuration.
//!
//! Loads an optional `rasterkit.toml`, merges it over the stock defaults, and
//! validates the result. Everything here concerns *how* the engine renders
//! and encodes; per-tool parameters live in [`crate::settings`].
//!
//! ## Config File Location
//!
//! `rasterkit.toml` in the working directory, or any file passed with
//! `--config`. A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! format = "png"             # png | jpeg | webp | avif
//! quality = 95               # 1-100, lossy formats only
//!
//! [generation]
//! placeholder_width = 1200   # Canvas for tools run without input
//! placeholder_height = 800
//! placeholder_label = "Generated Content"
//! logo_size = 800            # Square logo canvas
//! logo_label = "KDS"
//!
//! [fonts]
//! label = "/path/to/Bold.ttf" # Omit to search common system fonts
//!
//! [processing]
//! max_processes = 4          # Max worker threads (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse, so override just the values you want:
//!
//! ```toml
//! [output]
//! format = "webp"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "rasterkit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Engine configuration loaded from `rasterkit.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Encoding of finished buffers.
    pub output: OutputConfig,
    /// Canvases rendered without an input image.
    pub generation: GenerationConfig,
    /// Label font selection.
    pub fonts: FontsConfig,
    /// Worker thread settings.
    pub processing: ProcessingConfig,
}

impl EngineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation("output.quality must be 1-100".into()));
        }
        let g = &self.generation;
        if g.placeholder_width == 0 || g.placeholder_height == 0 {
            return Err(ConfigError::Validation(
                "generation.placeholder_width and placeholder_height must be non-zero".into(),
            ));
        }
        if g.logo_size == 0 {
            return Err(ConfigError::Validation("generation.logo_size must be non-zero".into()));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Lossy quality, 1-100. Ignored for PNG and WebP.
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: Quality::default().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub placeholder_width: u32,
    pub placeholder_height: u32,
    pub placeholder_label: String,
    pub logo_size: u32,
    pub logo_label: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            placeholder_width: 1200,
            placeholder_height: 800,
            placeholder_label: "Generated Content".to_string(),
            logo_size: 800,
            logo_label: "KDS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    /// Font file for labels. `None` searches common system fonts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<PathBuf>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of worker threads for per-pixel work.
    /// `None` means use all available cores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config, capped at the core count.
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(EngineConfig::default())
        .map_err(|e| ConfigError::Validation(format!("cannot serialize defaults: {e}")))
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

/// Read a config file as a raw TOML value. `Ok(None)` if it does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<EngineConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EngineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `rasterkit.toml` from `dir`, falling back to defaults if absent.
pub fn load_config(dir: &Path) -> Result<EngineConfig, ConfigError> {
    load_config_file(&dir.join(CONFIG_FILE_NAME))
}

/// Load a specific config file, falling back to defaults if absent.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, ConfigError> {
    resolve_config(load_raw_config(path)?)
}

/// A fully-commented stock `rasterkit.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# rasterkit configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# Encoded format of the processed image: png, jpeg, webp or avif.
# PNG is lossless and keeps transparency. JPEG drops alpha.
format = "png"

# Quality for lossy formats (1 = worst, 100 = best).
quality = 95

# ---------------------------------------------------------------------------
# Generation without an input image
# ---------------------------------------------------------------------------
[generation]
# Placeholder canvas for tools run from a blank start.
placeholder_width = 1200
placeholder_height = 800
placeholder_label = "Generated Content"

# Square canvas and label text for the logo tool.
logo_size = 800
logo_label = "KDS"

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[fonts]
# TrueType/OpenType file used for labels.
# Omit to search common bold system fonts; labels are skipped if none exist.
# label = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum worker threads for per-pixel work.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
