//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\sonority\config.toml
//! - macOS: ~/Library/Application Support/sonority/config.toml
//! - Linux: ~/.config/sonority/config.toml
//!
//! A different file can be given with `--config`. Settings are loaded at
//! startup and saved when changed through the UI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::backend::AlbumSortOrder;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Last server the user connected to
    pub server: ServerConfig,

    /// Appearance settings
    pub appearance: AppearanceConfig,

    /// Albums page settings
    pub albums_page: AlbumsPageConfig,

    /// Main window geometry
    pub window: WindowConfig,
}

/// Server connection profile. The password is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Display name of the server
    pub name: String,

    /// Base URL of the server
    pub url: String,

    /// Account name
    pub username: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Offline library".to_string(),
            url: "file://library.json".to_string(),
            username: String::new(),
        }
    }
}

/// Appearance/theme settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Theme name: "dark" or "light"
    pub theme: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

/// Albums page settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlbumsPageConfig {
    /// Label of the selected sort order, e.g. "Recently Added"
    pub sort_order: String,
}

impl Default for AlbumsPageConfig {
    fn default() -> Self {
        Self {
            sort_order: AlbumSortOrder::default().to_string(),
        }
    }
}

impl AlbumsPageConfig {
    /// Parsed sort order. Unknown labels fall back to the default order and
    /// the stored label is corrected.
    pub fn sort_order(&mut self) -> AlbumSortOrder {
        match self.sort_order.parse() {
            Ok(order) => order,
            Err(_) => {
                tracing::warn!(
                    "Unknown album sort order {:?}, using {}",
                    self.sort_order,
                    AlbumSortOrder::default()
                );
                self.sort_order = AlbumSortOrder::default().to_string();
                AlbumSortOrder::default()
            }
        }
    }
}

/// Main window geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sonority"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
pub fn load() -> Config {
    match config_path() {
        Some(path) => load_from(&path),
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from `path`.
///
/// Returns default config if the file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Save configuration asynchronously (for use in Iced tasks)
pub async fn save_async(config: Config, path: PathBuf) -> Result<(), ConfigError> {
    tokio::task::spawn_blocking(move || save_to(&config, &path))
        .await
        .map_err(|e| ConfigError::TaskJoin(e.to_string()))?
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Task join error: {0}")]
    TaskJoin(String),
}

// ============================================================================
// Tests
// ============================================================================
