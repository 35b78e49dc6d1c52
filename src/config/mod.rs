//! Configuration module for the bag player
//!
//! This module handles the static application configuration:
//! - External tool names (`rosbag`, `rosnode`, `rostopic`)
//! - Discovery and clock feed settings
//! - Default playback parameters
//! - UI defaults (slider resolution, initial dialog directory)
//!
//! # Config Location
//!
//! The configuration is read from the platform-appropriate config directory
//! under `dev.bagplayer-rs`:
//!
//! - **Linux**: `~/.config/dev.bagplayer-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/dev.bagplayer-rs/config.toml`
//! - **Windows**: `%APPDATA%\dev.bagplayer-rs\config.toml`
//!
//! The file is optional and never written by the application. Session state
//! (loaded bag, selections, last used directories) is not persisted.
//!
//! # Example
//!
//! ```toml
//! [tools]
//! rosbag = "/opt/ros/noetic/bin/rosbag"
//!
//! [playback]
//! rate = 2.0
//! loop_playback = true
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{BagPlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config and data directories
pub const APP_ID: &str = "dev.bagplayer-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Bag file extension used by the file dialogs
pub const BAG_FILE_EXTENSION: &str = "bag";

/// Default discovery poll interval in milliseconds
///
/// Each poll launches a fresh `rostopic list` process, so intervals much
/// below this keep a core busy while a master is running.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Default number of discrete slider steps
pub const DEFAULT_SLIDER_RANGE: i32 = 100;

// ==================== Directories ====================

/// Get the application config directory path
pub fn app_config_dir() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID))
}

/// Get the application data directory path (used for log files)
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the config file
pub fn config_path() -> Option<PathBuf> {
    app_config_dir().map(|p| p.join(CONFIG_FILE))
}

// ==================== App Config ====================

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(content)
            .map_err(|e| BagPlayerError::Config(format!("Failed to parse config: {}", e)))?;
        config.playback = config.playback.clamped();
        config.ui.slider_range = config.ui.slider_range.max(1);
        Ok(config)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BagPlayerError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load the config from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Self::default();
        }

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Directory the file dialogs start in
    pub fn initial_directory(&self) -> PathBuf {
        self.ui
            .default_directory
            .clone()
            .or_else(dirs_next::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"))
    }
}

/// Names (or paths) of the external ROS tools
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    #[serde(default = "default_rosbag")]
    pub rosbag: String,

    #[serde(default = "default_rosnode")]
    pub rosnode: String,

    #[serde(default = "default_rostopic")]
    pub rostopic: String,
}

fn default_rosbag() -> String {
    "rosbag".to_string()
}

fn default_rosnode() -> String {
    "rosnode".to_string()
}

fn default_rostopic() -> String {
    "rostopic".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            rosbag: default_rosbag(),
            rosnode: default_rosnode(),
            rostopic: default_rostopic(),
        }
    }
}

/// Live topic discovery settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscoveryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Clock feed settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClockConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_clock_topic")]
    pub topic: String,
}

fn default_clock_topic() -> String {
    "/clock".to_string()
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            topic: default_clock_topic(),
        }
    }
}

/// UI defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Number of discrete steps on the scrub bar
    #[serde(default = "default_slider_range")]
    pub slider_range: i32,

    /// Directory the file dialogs open in before anything was picked
    #[serde(default)]
    pub default_directory: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub dark_mode: bool,
}

fn default_slider_range() -> i32 {
    DEFAULT_SLIDER_RANGE
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            slider_range: DEFAULT_SLIDER_RANGE,
            default_directory: None,
            dark_mode: true,
        }
    }
}
