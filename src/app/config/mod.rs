// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - UI language
//! - `[upload]` - Upload size limit
//! - `[render]` - JPEG quality of the enhanced image
//! - `[download]` - Output file name, directory and cool-down
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` on the command line
//! 3. Set `IMAGE_ENHANCER_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use image_enhancer::app::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::media::RenderOptions;
use crate::session::download::{default_download_dir, DownloadAction};
use crate::session::StudioOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

const MIB: u64 = 1024 * 1024;

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Upload gate settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Largest accepted file, in mebibytes.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u32,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl UploadConfig {
    /// Limit in bytes, with the configured value clamped to sane bounds.
    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        u64::from(
            self.max_file_size_mb
                .clamp(MIN_MAX_FILE_SIZE_MB, MAX_MAX_FILE_SIZE_MB),
        ) * MIB
    }
}

/// Render settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// JPEG quality (1-100).
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownloadConfig {
    /// Name of the saved file.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Target directory; the platform download directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Cool-down after a download starts, in milliseconds.
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            directory: None,
            cooldown_ms: DEFAULT_DOWNLOAD_COOLDOWN_MS,
        }
    }
}

impl DownloadConfig {
    #[must_use]
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_download_dir)
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms.min(MAX_DOWNLOAD_COOLDOWN_MS))
    }

    /// File name to write; falls back to the default when blank or when it
    /// contains a path separator.
    #[must_use]
    pub fn resolved_file_name(&self) -> String {
        let name = self.file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            default_file_name()
        } else {
            name.to_string()
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Builds the studio options described by this configuration.
    #[must_use]
    pub fn studio_options(&self) -> StudioOptions {
        StudioOptions {
            render: RenderOptions::with_quality(self.render.jpeg_quality),
            max_upload_bytes: self.upload.max_bytes(),
            download: DownloadAction::new(
                self.download.resolved_directory(),
                self.download.resolved_file_name(),
                self.download.cooldown(),
            ),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_max_file_size_mb() -> u32 {
    DEFAULT_MAX_FILE_SIZE_MB
}

fn default_jpeg_quality() -> u8 {
    DEFAULT_JPEG_QUALITY
}

fn default_file_name() -> String {
    DEFAULT_DOWNLOAD_FILE_NAME.to_string()
}

fn default_cooldown_ms() -> u64 {
    DEFAULT_DOWNLOAD_COOLDOWN_MS
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "using default configuration");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
