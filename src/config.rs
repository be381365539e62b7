//! Configuration file loading with environment variable overrides.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ExportError;
use crate::params::ErrorCorrection;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// How QR codes are drawn.
    #[serde(default)]
    pub render: RenderConfig,

    /// Where and how files are exported.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Render defaults, overridden by CLI flags.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas edge length in pixels.
    pub size: u32,
    /// Error-correction level.
    pub level: ErrorCorrection,
    /// Colour of dark modules.
    pub foreground: String,
    /// Colour of light modules and margin.
    pub background: String,
    /// Draw a four-module quiet zone.
    pub margin: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 256,
            level: ErrorCorrection::Low,
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
            margin: false,
        }
    }
}

/// Export defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Crop transparent edges before saving.
    pub crop: bool,
    /// Directory exported files are written to.
    pub out_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { crop: true, out_dir: PathBuf::from(".") }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            ExportError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Output directory, preferring the `QRCROP_OUT_DIR` environment variable.
    #[must_use]
    pub fn out_dir(&self) -> PathBuf {
        std::env::var_os("QRCROP_OUT_DIR").map_or_else(|| self.export.out_dir.clone(), PathBuf::from)
    }
}

/// Config file used when no other location applies.
pub const LOCAL_CONFIG: &str = "qrcrop.toml";

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `QRCROP_CONFIG` environment variable
/// 3. `~/.config/qrcrop/config.toml`, if it exists
/// 4. `qrcrop.toml` in the working directory
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    resolve_config_path(explicit, std::env::var_os("QRCROP_CONFIG"), std::env::var_os("HOME"))
}

fn resolve_config_path(
    explicit: Option<&str>,
    env_path: Option<OsString>,
    home: Option<OsString>,
) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Some(p) = env_path {
        return PathBuf::from(p);
    }

    if let Some(home) = home {
        let user_config = PathBuf::from(home).join(".config/qrcrop/config.toml");
        if user_config.exists() {
            return user_config;
        }
    }

    PathBuf::from(LOCAL_CONFIG)
}
