//! Configuration management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use robot_protocol::{Mode, DEFAULT_ROBOT_ADDR, DEFAULT_SPEED, WS_PATH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Robot connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// WebSocket URL of the robot
    #[serde(default = "default_url")]
    pub url: String,
    /// First reconnect delay in milliseconds
    #[serde(default = "default_reconnect_interval")]
    pub reconnect_interval_ms: u64,
    /// Upper bound for the reconnect backoff in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_url() -> String {
    format!("ws://{}{}", DEFAULT_ROBOT_ADDR, WS_PATH)
}
fn default_reconnect_interval() -> u64 {
    500
}
fn default_max_backoff() -> u64 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            reconnect_interval_ms: default_reconnect_interval(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

/// Control defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Speed shown before the robot reports one (0-100)
    #[serde(default = "default_initial_speed")]
    pub initial_speed: u8,
}

fn default_initial_speed() -> u8 {
    DEFAULT_SPEED
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            initial_speed: default_initial_speed(),
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_width() -> f32 {
    420.0
}
fn default_height() -> f32 {
    600.0
}
fn default_dark_mode() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            dark_mode: default_dark_mode(),
        }
    }
}

/// Display strings used by the panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default = "default_manual")]
    pub manual: String,
    #[serde(default = "default_line")]
    pub line: String,
    #[serde(default = "default_sumo")]
    pub sumo: String,
    /// Activity label while in manual mode
    #[serde(default = "default_stopped")]
    pub stopped: String,
    /// Activity label while in an autonomous mode
    #[serde(default = "default_autonomous")]
    pub autonomous: String,
    #[serde(default = "default_connected")]
    pub connected: String,
    #[serde(default = "default_disconnected")]
    pub disconnected: String,
}

fn default_manual() -> String {
    "Manual".to_string()
}
fn default_line() -> String {
    "Line".to_string()
}
fn default_sumo() -> String {
    "Sumo".to_string()
}
fn default_stopped() -> String {
    "Stopped".to_string()
}
fn default_autonomous() -> String {
    "Autonomous".to_string()
}
fn default_connected() -> String {
    "Connected".to_string()
}
fn default_disconnected() -> String {
    "Disconnected".to_string()
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            manual: default_manual(),
            line: default_line(),
            sumo: default_sumo(),
            stopped: default_stopped(),
            autonomous: default_autonomous(),
            connected: default_connected(),
            disconnected: default_disconnected(),
        }
    }
}

impl Labels {
    /// Display name for a known mode
    pub fn mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Manual => &self.manual,
            Mode::Line => &self.line,
            Mode::Sumo => &self.sumo,
        }
    }

    pub fn connection(&self, connected: bool) -> &str {
        if connected {
            &self.connected
        } else {
            &self.disconnected
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub control: ControlConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub labels: Labels,
}

impl Config {
    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // Return default config if file doesn't exist
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.control.initial_speed = config.control.initial_speed.min(robot_protocol::Speed::MAX);
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "robotpanel", "RobotPanel")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// Get the default configuration embedded in the binary
    pub fn default_config_str() -> &'static str {
        include_str!("../../config/default.toml")
    }
}
