//! Network broadcast client over gRPC.
//!
//! Subscribes to `telemetry.v1.TelemetryTable/Subscribe` on a background thread
//! running its own tokio runtime, and fans every entry update out to the
//! registered listeners. The stream is re-opened once per second while the
//! server is unreachable. Listeners are called on the worker thread while the
//! client's registry lock is held, so they must not call back into the client.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::Notify;
use tonic::transport::Endpoint;
use tonic::Request;
use tracing::{debug, info, warn};

use crate::broadcast::{BroadcastClient, EntryListener};
use crate::error::{DashboardError, Result};
use crate::telemetry::TelemetryValue;

pub mod proto {
    tonic::include_proto!("telemetry.v1");
}

use proto::entry_update::Value;
use proto::telemetry_table_client::TelemetryTableClient;
use proto::{EntryUpdate, SubscribeRequest};

/// Default port of the broadcast table server.
pub const DEFAULT_PORT: u16 = 5810;

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

impl From<Value> for TelemetryValue {
    fn from(v: Value) -> Self {
        match v {
            Value::Number(n) => TelemetryValue::Number(n),
            Value::Text(s) => TelemetryValue::Text(s),
            Value::Flag(b) => TelemetryValue::Boolean(b),
        }
    }
}

#[derive(Default)]
struct Registry {
    listeners: Vec<Arc<dyn EntryListener>>,
    entries: BTreeMap<(String, String), TelemetryValue>,
}

struct Shared {
    connected: AtomicBool,
    stop: Notify,
    // One lock for cache and listeners: delivery and replay run under it, so a
    // new listener never sees a cached value after a newer one.
    registry: Mutex<Registry>,
}

impl Shared {
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, update: EntryUpdate) {
        let Some(value) = update.value.map(TelemetryValue::from) else {
            return;
        };
        let mut registry = self.registry();
        registry
            .entries
            .insert((update.table.clone(), update.key.clone()), value.clone());
        for l in &registry.listeners {
            l.on_entry_changed(&update.table, &update.key, &value, update.is_new);
        }
    }
}

/// Broadcast client backed by a gRPC server stream.
///
/// Dropping the client cancels the stream (or the pending reconnect) and lets
/// the worker thread exit. [`close`](Self::close) also waits for it.
pub struct GrpcBroadcastClient {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl GrpcBroadcastClient {
    /// Start subscribing to `http://<ip>:<port>`. Returns immediately; the
    /// connection is made (and retried) in the background.
    pub fn connect(ip: &str, port: u16, tables: Vec<String>) -> Result<Self> {
        let url = format!("http://{ip}:{port}");
        let endpoint = Endpoint::from_shared(url.clone())
            .map_err(|e| DashboardError::InvalidEndpoint(format!("{url}: {e}")))?
            .connect_timeout(RECONNECT_DELAY);

        let shared = Arc::new(Shared {
            connected: AtomicBool::new(false),
            stop: Notify::new(),
            registry: Mutex::new(Registry::default()),
        });

        let worker = Arc::clone(&shared);
        let handle = std::thread::Builder::new()
            .name("broadcast-grpc".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(1)
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        warn!("failed to start broadcast runtime: {e}");
                        return;
                    }
                };
                rt.block_on(subscribe_loop(endpoint, tables, worker));
            })?;

        Ok(Self {
            shared,
            worker: Some(handle),
        })
    }

    /// Stop the subscription and wait for the worker thread to finish.
    pub fn close(mut self) {
        self.shared.stop.notify_one();
        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                warn!("broadcast worker panicked");
            }
        }
    }
}

async fn subscribe_loop(endpoint: Endpoint, tables: Vec<String>, shared: Arc<Shared>) {
    loop {
        tokio::select! {
            _ = shared.stop.notified() => break,
            res = stream_once(&endpoint, &tables, &shared) => {
                if let Err(e) = res {
                    warn!(uri = %endpoint.uri(), "broadcast stream: {e}");
                }
            }
        }
        shared.connected.store(false, Ordering::Relaxed);
        tokio::select! {
            _ = shared.stop.notified() => break,
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
    }
    shared.connected.store(false, Ordering::Relaxed);
    debug!(uri = %endpoint.uri(), "broadcast worker stopped");
}

async fn stream_once(endpoint: &Endpoint, tables: &[String], shared: &Shared) -> Result<()> {
    let channel = endpoint
        .connect()
        .await
        .map_err(|e| DashboardError::Transport(e.to_string()))?;
    let mut client = TelemetryTableClient::new(channel);
    let mut stream = client
        .subscribe(Request::new(SubscribeRequest {
            tables: tables.to_vec(),
        }))
        .await
        .map_err(|e| DashboardError::Transport(e.to_string()))?
        .into_inner();

    shared.connected.store(true, Ordering::Relaxed);
    info!(uri = %endpoint.uri(), "subscribed to broadcast table");

    while let Some(update) = stream
        .message()
        .await
        .map_err(|e| DashboardError::Transport(e.to_string()))?
    {
        shared.deliver(update);
    }
    Ok(())
}

impl BroadcastClient for GrpcBroadcastClient {
    fn add_listener(&self, listener: Arc<dyn EntryListener>) {
        let mut registry = self.shared.registry();
        for ((table, key), value) in &registry.entries {
            listener.on_entry_changed(table, key, value, true);
        }
        registry.listeners.push(listener);
    }

    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::Relaxed)
    }
}

impl Drop for GrpcBroadcastClient {
    fn drop(&mut self) {
        // Stores a permit if the worker is not waiting right now.
        self.shared.stop.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn wire_values_decode_to_matching_variants() {
        assert_eq!(TelemetryValue::from(Value::Number(87.5)), TelemetryValue::Number(87.5));
        assert_eq!(
            TelemetryValue::from(Value::Text("Cube".into())),
            TelemetryValue::Text("Cube".into())
        );
        assert_eq!(TelemetryValue::from(Value::Flag(true)), TelemetryValue::Boolean(true));
    }

    #[test]
    fn updates_without_a_value_are_skipped() {
        let shared = Shared {
            connected: AtomicBool::new(false),
            stop: Notify::new(),
            registry: Mutex::new(Registry::default()),
        };
        shared.deliver(EntryUpdate {
            table: "SmartDashboard".into(),
            key: "Mode".into(),
            is_new: true,
            value: None,
        });
        assert!(shared.registry().entries.is_empty());
    }

    #[test]
    fn late_listener_gets_cached_entries_first() {
        let shared = Arc::new(Shared {
            connected: AtomicBool::new(false),
            stop: Notify::new(),
            registry: Mutex::new(Registry::default()),
        });
        let client = GrpcBroadcastClient {
            shared: Arc::clone(&shared),
            worker: None,
        };
        shared.deliver(EntryUpdate {
            table: "SmartDashboard".into(),
            key: "Object".into(),
            is_new: true,
            value: Some(Value::Text("Cube".into())),
        });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        client.add_listener(Arc::new(
            move |_: &str, key: &str, value: &TelemetryValue, is_new: bool| {
                s.lock().unwrap().push((key.to_string(), value.clone(), is_new));
            },
        ));
        shared.deliver(EntryUpdate {
            table: "SmartDashboard".into(),
            key: "Object".into(),
            is_new: false,
            value: Some(Value::Text("Cone".into())),
        });

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("Object".to_string(), TelemetryValue::from("Cube"), true),
                ("Object".to_string(), TelemetryValue::from("Cone"), false),
            ]
        );
    }

    #[test]
    fn close_stops_the_worker_while_reconnecting() {
        // Nothing listens on port 1, so the worker sits in its connect/retry loop.
        let client =
            GrpcBroadcastClient::connect("127.0.0.1", 1, vec!["SmartDashboard".into()]).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        let started = Instant::now();
        client.close();
        assert!(started.elapsed() < RECONNECT_DELAY);
    }
}
