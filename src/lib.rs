//! RobotGUI crate root: re-exports and module wiring.
//!
//! Live telemetry binding for a robot dashboard: broadcast key/value updates
//! are classified into display mutations and relayed onto the UI thread.
//!
//! - `telemetry`: broadcast values and coercion
//! - `mutation`: sink identifiers and display mutations
//! - `dispatch`: key-to-mutation dispatcher with the color sensor reading
//! - `relay`: cross-thread hand-off of mutations to the UI thread
//! - `sinks`: display sink interface implemented by the UI
//! - `broadcast`: broadcast client/listener traits, local table, binding
//! - `connectivity`: periodic connection polling for the status banner
//! - `config` / `persistence`: settings document and JSON files
//! - `app`: eframe dashboard shell

pub mod app;
pub mod broadcast;
pub mod config;
pub mod connectivity;
pub mod dispatch;
pub mod error;
pub mod mutation;
pub mod normalize;
pub mod persistence;
pub mod relay;
pub mod sinks;
pub mod telemetry;

#[cfg(feature = "grpc")]
pub mod grpc_client;

// Public re-exports for a compact external API
pub use app::{run_dashboard, DashboardApp, DashboardWidgets};
pub use broadcast::{BroadcastClient, EntryListener, LocalTable, TelemetryBinding};
pub use config::{DashboardConfig, Settings};
pub use connectivity::ConnectivityMonitor;
pub use dispatch::{ColorReading, Dispatcher};
pub use error::{DashboardError, Result};
pub use mutation::{ColorToken, DisplayMutation, MutationOp, SinkId, SwerveChannel};
pub use relay::{channel_relay, RelayReceiver, UpdateRelay};
pub use sinks::{DisplaySink, SinkRegistry};
pub use telemetry::TelemetryValue;
