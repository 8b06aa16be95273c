//! Dashboard application shell.
//!
//! | Sub-module  | Responsibility |
//! | ----------- | -------------- |
//! | [`widgets`] | Widget state, rendering, and the sink registry |
//! | [`update`]  | Per-frame relay drain, connectivity poll, theme |
//! | [`layout`]  | Menu bar, tabs, settings/about/welcome windows |
//! | [`run`]     | [`run_dashboard()`] entry point and icon loading |
//!
//! The shell is the concrete display side of the binding core: it owns the
//! [`RelayReceiver`] and is the only writer of widget state.

mod layout;
mod run;
mod update;
pub mod widgets;

pub use run::run_dashboard;
pub use widgets::DashboardWidgets;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::broadcast::BroadcastClient;
use crate::config::{DashboardConfig, Settings};
use crate::connectivity::{not_connected_text, ConnectivityMonitor};
use crate::mutation::{DisplayMutation, SinkId};
use crate::persistence::save_settings_to_path;
use crate::relay::RelayReceiver;
use crate::sinks::apply_mutation;

/// Tabs of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    OperatorStatus,
    ColorSensor,
    Swerve,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::OperatorStatus, Tab::ColorSensor, Tab::Swerve];

    pub fn title(self) -> &'static str {
        match self {
            Tab::OperatorStatus => "Operator Status",
            Tab::ColorSensor => "Color Sensor",
            Tab::Swerve => "Swerve",
        }
    }
}

/// Standalone dashboard implementing [`eframe::App`].
pub struct DashboardApp {
    /// Widget state; mutated only by relay drains on the UI thread.
    pub widgets: DashboardWidgets,
    relay_rx: RelayReceiver,
    client: Option<Arc<dyn BroadcastClient>>,
    monitor: ConnectivityMonitor,
    poll_interval: Duration,

    pub settings: Settings,
    settings_path: PathBuf,

    tab: Tab,
    show_settings: bool,
    show_about: bool,
    show_welcome: bool,
    applied_dark_mode: Option<bool>,
    last_update: Option<chrono::DateTime<chrono::Local>>,
}

impl DashboardApp {
    /// Build the shell. `client` is `None` when the dashboard runs without a broadcast source.
    pub fn new(
        relay_rx: RelayReceiver,
        client: Option<Arc<dyn BroadcastClient>>,
        cfg: DashboardConfig,
    ) -> Self {
        let mut widgets = DashboardWidgets::default();
        apply_mutation(
            &mut widgets,
            DisplayMutation::text(SinkId::ConnectionStatus, not_connected_text(&cfg.settings.ip)),
        );
        Self {
            widgets,
            relay_rx,
            client,
            monitor: ConnectivityMonitor::new(cfg.poll_interval),
            poll_interval: cfg.poll_interval,
            settings: cfg.settings,
            settings_path: cfg.settings_path,
            tab: Tab::OperatorStatus,
            show_settings: false,
            show_about: false,
            show_welcome: cfg.show_welcome,
            applied_dark_mode: None,
            last_update: None,
        }
    }

    /// Write the current settings back to disk. Failures are logged, not fatal.
    fn persist_settings(&self) {
        if let Err(e) = save_settings_to_path(&self.settings, &self.settings_path) {
            warn!(path = %self.settings_path.display(), "failed to save settings: {e}");
        }
    }
}
