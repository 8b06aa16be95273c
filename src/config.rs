//! Configuration: the persisted settings document and the shell configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::connectivity::DEFAULT_POLL_INTERVAL;

// ─────────────────────────────────────────────────────────────────────────────
// Settings – persisted as JSON next to the executable
// ─────────────────────────────────────────────────────────────────────────────

/// User settings. Missing fields take their defaults, so older files still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Python-style numeric level: 10 debug, 20 info, 30 warning, 40 error.
    pub log_level: u32,
    pub dark_mode: bool,
    /// Address of the broadcast table server.
    pub ip: String,
    /// Camera stream URL.
    pub camera_http: String,
    /// Monitor index for the camera view.
    pub camera_screen: u32,
    pub cam_fullscreen: bool,
    /// When set, the dashboard shows the welcome screen and does not connect.
    pub first_run: bool,
    /// GitHub `owner/name` of the release feed.
    pub repo: String,
    pub show_updates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: 20,
            dark_mode: true,
            ip: "10.63.69.2".to_string(),
            camera_http: "http://10.63.69.14:1181/stream.mjpg?1680129953477".to_string(),
            camera_screen: 1,
            cam_fullscreen: true,
            first_run: true,
            repo: "meowmeowahr/RobotGUI-2023".to_string(),
            show_updates: true,
        }
    }
}

impl Settings {
    /// Map `log_level` onto a tracing level.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level {
            0..=9 => tracing::Level::TRACE,
            10..=19 => tracing::Level::DEBUG,
            20..=29 => tracing::Level::INFO,
            30..=39 => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// DashboardConfig – how the shell runs
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the dashboard window.
#[derive(Clone)]
pub struct DashboardConfig {
    /// Native window title.
    pub title: String,
    /// Loaded settings.
    pub settings: Settings,
    /// Where settings edits are written back to.
    pub settings_path: PathBuf,
    /// Connectivity poll interval.
    pub poll_interval: Duration,
    /// Show the first-run welcome window.
    pub show_welcome: bool,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "RobotGUI".to_string(),
            settings: Settings::default(),
            settings_path: PathBuf::from("settings.json"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            show_welcome: false,
            native_options: None,
        }
    }
}
