//! Example: gRPC broadcast table server with simulated robot telemetry
//!
//! Run it, point the dashboard's `ip` setting at `127.0.0.1` and start
//! `cargo run --features grpc`.
//!
//! ```bash
//! cargo run --example telemetry-server --features grpc
//! ```

use std::pin::Pin;
use std::time::Duration;

use async_stream::try_stream;
use futures_core::Stream;
use tokio::time::interval;
use tonic::{transport::Server, Request, Response, Status};

pub mod telemetry {
    pub mod v1 {
        tonic::include_proto!("telemetry.v1");
    }
}

use telemetry::v1::{
    entry_update::Value,
    telemetry_table_server::{TelemetryTable, TelemetryTableServer},
    EntryUpdate, SubscribeRequest,
};

#[derive(Default)]
struct TableSvc;

const SMART_DASHBOARD: &str = "SmartDashboard";
const COLOR_SENSOR: &str = "RevColorSensor_V3";
const MODES: [&str; 3] = ["Scoring", "Picking_up", "Defense"];
const OBJECTS: [&str; 3] = ["Cube", "Cone", "Neither"];

fn entry(table: &str, key: impl Into<String>, value: Value, is_new: bool) -> EntryUpdate {
    EntryUpdate {
        table: table.to_string(),
        key: key.into(),
        is_new,
        value: Some(value),
    }
}

/// Simulated entries for tick `n` of the requested tables.
fn frame(n: u64, tables: &[String]) -> Vec<EntryUpdate> {
    let wanted = |t: &str| tables.is_empty() || tables.iter().any(|w| w == t);
    let t = n as f64 * 0.05;
    let first = n == 0;
    let mut out = Vec::new();

    if wanted(SMART_DASHBOARD) {
        if n % 40 == 0 {
            let i = (n / 40) as usize;
            let mode = Value::Text(MODES[i % 3].into());
            let object = Value::Text(OBJECTS[i % 3].into());
            out.push(entry(SMART_DASHBOARD, "Mode", mode, first));
            out.push(entry(SMART_DASHBOARD, "Object", object, first));
        }
        for module in 0..4 {
            let angle = Value::Number(((t + module as f64) * 40.0) % 360.0);
            let velocity = Value::Number(t.sin() * 3.0);
            out.push(entry(SMART_DASHBOARD, format!("Mod {module} Cancoder"), angle, first));
            out.push(entry(SMART_DASHBOARD, format!("Mod {module} Velocity"), velocity, first));
        }
    }
    if wanted(COLOR_SENSOR) {
        let wave = |phase: f64| Value::Number(127.5 + 127.5 * phase.sin());
        out.push(entry(COLOR_SENSOR, "colorSensorRed", wave(t), first));
        out.push(entry(COLOR_SENSOR, "colorSensorGreen", wave(t * 0.7), first));
        out.push(entry(COLOR_SENSOR, "colorSensorBlue", wave(t * 0.3 + 1.0), first));
    }
    out
}

#[tonic::async_trait]
impl TelemetryTable for TableSvc {
    type SubscribeStream =
        Pin<Box<dyn Stream<Item = Result<EntryUpdate, Status>> + Send + 'static>>;

    async fn subscribe(
        &self,
        request: Request<SubscribeRequest>,
    ) -> Result<Response<Self::SubscribeStream>, Status> {
        let tables = request.into_inner().tables;

        const DT: Duration = Duration::from_millis(50);
        let mut n: u64 = 0;
        let mut ticker = interval(DT);

        let out = try_stream! {
            loop {
                ticker.tick().await;
                for update in frame(n, &tables) {
                    yield update;
                }
                n = n.saturating_add(1);
            }
        };

        Ok(Response::new(Box::pin(out) as Self::SubscribeStream))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();
    let addr = "0.0.0.0:5810".parse()?;
    tracing::info!("telemetry table listening on {addr}");
    Server::builder()
        .add_service(TelemetryTableServer::new(TableSvc))
        .serve(addr)
        .await?;
    Ok(())
}
