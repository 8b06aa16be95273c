//! RobotGUI: robot telemetry dashboard.
//!
//! ```bash
//! cargo run --features grpc -- --settings ./settings.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use robotgui::persistence::{load_or_create, save_settings_to_path};
use robotgui::{channel_relay, run_dashboard, BroadcastClient, DashboardConfig, TelemetryBinding};

#[derive(Parser, Debug)]
#[command(name = "robotgui", version, about = "Robot telemetry dashboard")]
struct Cli {
    /// Location of the settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

fn default_settings_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("settings.json")))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}

#[cfg(feature = "grpc")]
fn connect(ip: &str) -> Result<Option<Arc<dyn BroadcastClient>>> {
    use robotgui::broadcast::{COLOR_SENSOR_TABLE, SMART_DASHBOARD};
    use robotgui::grpc_client::{GrpcBroadcastClient, DEFAULT_PORT};

    let client = GrpcBroadcastClient::connect(
        ip,
        DEFAULT_PORT,
        vec![SMART_DASHBOARD.to_string(), COLOR_SENSOR_TABLE.to_string()],
    )
    .context("failed to start broadcast client")?;
    let client: Arc<dyn BroadcastClient> = Arc::new(client);
    Ok(Some(client))
}

#[cfg(not(feature = "grpc"))]
fn connect(ip: &str) -> Result<Option<Arc<dyn BroadcastClient>>> {
    tracing::warn!(ip, "built without the `grpc` feature; running without a broadcast source");
    Ok(None)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings_path = cli.settings.unwrap_or_else(default_settings_path);

    let mut settings = load_or_create(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(settings.tracing_level().into())
                .from_env_lossy(),
        )
        .init();
    debug!("Loaded settings from {}", settings_path.display());

    let (relay, relay_rx) = channel_relay();
    let first_run = settings.first_run;
    let client = if first_run {
        settings.first_run = false;
        save_settings_to_path(&settings, &settings_path).context("failed to save settings")?;
        info!("first run, not connecting");
        None
    } else {
        connect(&settings.ip)?
    };

    if let Some(client) = &client {
        TelemetryBinding::attach(client.as_ref(), relay);
    }

    let cfg = DashboardConfig {
        settings,
        settings_path,
        show_welcome: first_run,
        ..DashboardConfig::default()
    };
    run_dashboard(relay_rx, client, cfg).map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
