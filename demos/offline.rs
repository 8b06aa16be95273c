//! Example: dashboard fed by an in-process broadcast table
//!
//! What it demonstrates
//! - Binding a `LocalTable` to the dashboard through `TelemetryBinding` and the relay.
//! - Publishing operator, swerve and color sensor entries from a producer thread.
//! - The connection banner toggling as the table's connected flag flips.
//!
//! How to run
//! ```bash
//! cargo run --example offline
//! ```

use std::sync::Arc;
use std::time::Duration;

use robotgui::broadcast::{COLOR_SENSOR_TABLE, SMART_DASHBOARD};
use robotgui::{
    channel_relay, run_dashboard, BroadcastClient, DashboardConfig, LocalTable, Settings,
    TelemetryBinding,
};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let table = LocalTable::new();
    let (relay, relay_rx) = channel_relay();
    TelemetryBinding::attach(&table, relay);

    let producer = table.clone();
    std::thread::spawn(move || {
        const MODES: [&str; 3] = ["Scoring", "Picking_up", "Defense"];
        const OBJECTS: [&str; 3] = ["Cube", "Cone", "Neither"];
        const POSITIONS: [&str; 3] = ["HighCone", "Mid_Cube", "Neither"];
        let mut n: u64 = 0;
        loop {
            let t = n as f64 * 0.05;
            if n % 40 == 0 {
                let i = (n / 40) as usize;
                producer.put(SMART_DASHBOARD, "Mode", MODES[i % 3]);
                producer.put(SMART_DASHBOARD, "Object", OBJECTS[i % 3]);
                producer.put(SMART_DASHBOARD, "ScorePos", POSITIONS[i % 3]);
            }
            for module in 0..4 {
                let phase = t + module as f64 * 0.5;
                let key = |channel: &str| format!("Mod {module} {channel}");
                producer.put(SMART_DASHBOARD, &key("Cancoder"), (phase * 40.0) % 360.0);
                producer.put(SMART_DASHBOARD, &key("Integrated"), (phase * 41.0) % 360.0);
                producer.put(SMART_DASHBOARD, &key("Velocity"), phase.sin() * 3.0);
            }
            producer.put(COLOR_SENSOR_TABLE, "colorSensorRed", 127.5 + 127.5 * t.sin());
            producer.put(COLOR_SENSOR_TABLE, "colorSensorGreen", 127.5 + 127.5 * (t * 0.7).sin());
            producer.put(COLOR_SENSOR_TABLE, "colorSensorBlue", 127.5 + 127.5 * (t * 0.3).cos());
            producer.put(COLOR_SENSOR_TABLE, "colorSensorProx", 2047.0 * (1.0 + t.cos()));
            // Drop the "connection" for a few seconds every 30 s
            producer.set_connected(n % 600 < 540);
            n = n.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(50));
        }
    });

    let settings = Settings {
        first_run: false,
        ip: "local".to_string(),
        ..Settings::default()
    };
    let cfg = DashboardConfig {
        title: "RobotGUI (offline)".to_string(),
        settings,
        settings_path: std::env::temp_dir().join("robotgui-offline-settings.json"),
        ..DashboardConfig::default()
    };
    let client: Arc<dyn BroadcastClient> = Arc::new(table);
    run_dashboard(relay_rx, Some(client), cfg)
}
