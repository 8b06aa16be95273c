//! Broadcast client interface and the binding that feeds it into the display.
//!
//! A [`BroadcastClient`] delivers every entry change to its listeners from its
//! own worker thread(s). [`TelemetryBinding`] is the listener that runs the
//! [`Dispatcher`] synchronously on the delivering thread and hands the result
//! to an injected [`UpdateRelay`].
//!
//! Ordering: a binding submits batches in the same order the dispatcher saw the
//! updates, and a client delivers the replay for a new listener before any
//! later change to the same key.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::relay::UpdateRelay;
use crate::telemetry::TelemetryValue;

/// Table carrying operator and swerve state.
pub const SMART_DASHBOARD: &str = "SmartDashboard";
/// Table carrying color sensor readings.
pub const COLOR_SENSOR_TABLE: &str = "RevColorSensor_V3";

/// Receives entry changes. Called from broadcast worker threads.
pub trait EntryListener: Send + Sync {
    fn on_entry_changed(&self, source: &str, key: &str, value: &TelemetryValue, is_new: bool);
}

impl<F> EntryListener for F
where
    F: Fn(&str, &str, &TelemetryValue, bool) + Send + Sync,
{
    fn on_entry_changed(&self, source: &str, key: &str, value: &TelemetryValue, is_new: bool) {
        self(source, key, value, is_new)
    }
}

/// A remote (or local) key/value broadcast table.
pub trait BroadcastClient: Send + Sync {
    /// Register a listener. Entries already present are replayed to it with `is_new = true`.
    fn add_listener(&self, listener: Arc<dyn EntryListener>);

    /// Whether the broadcast source is currently reachable.
    fn is_connected(&self) -> bool;
}

/// Dispatcher plus the relay it publishes to.
pub struct TelemetryBinding {
    dispatcher: Dispatcher,
    relay: UpdateRelay,
    // Held across dispatch and submit so concurrent deliveries reach the relay
    // in the order they updated the color reading.
    delivery: Mutex<()>,
}

impl TelemetryBinding {
    pub fn new(relay: UpdateRelay) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            relay,
            delivery: Mutex::new(()),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Register a fresh binding on `client` and return it.
    pub fn attach(client: &dyn BroadcastClient, relay: UpdateRelay) -> Arc<Self> {
        let binding = Arc::new(Self::new(relay));
        client.add_listener(binding.clone());
        binding
    }
}

impl EntryListener for TelemetryBinding {
    fn on_entry_changed(&self, source: &str, key: &str, value: &TelemetryValue, is_new: bool) {
        debug!(source, key, %value, is_new, "value changed");
        let _guard = self.delivery.lock().unwrap_or_else(PoisonError::into_inner);
        let mutations = self.dispatcher.dispatch(key, value, is_new);
        if !mutations.is_empty() {
            self.relay.submit_all(mutations);
        }
    }
}

/// In-process broadcast table.
///
/// Stands in for the network table in tests and offline demos. Listeners are
/// notified on the thread calling [`put`](Self::put), outside the entry lock
/// but under the delivery lock, so a listener may read the table but must not
/// call `put` or `add_listener` on it.
#[derive(Clone)]
pub struct LocalTable {
    inner: Arc<Mutex<LocalTableInner>>,
    delivery: Arc<Mutex<()>>,
}

struct LocalTableInner {
    entries: BTreeMap<(String, String), TelemetryValue>,
    listeners: Vec<Arc<dyn EntryListener>>,
    connected: bool,
}

impl Default for LocalTable {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTable {
    /// New, empty, connected table.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LocalTableInner {
                entries: BTreeMap::new(),
                listeners: Vec::new(),
                connected: true,
            })),
            delivery: Arc::new(Mutex::new(())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LocalTableInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_delivery(&self) -> std::sync::MutexGuard<'_, ()> {
        self.delivery.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a value. `is_new` is true the first time `(source, key)` is seen.
    pub fn put<V: Into<TelemetryValue>>(&self, source: &str, key: &str, value: V) {
        let value = value.into();
        let _delivery = self.lock_delivery();
        let (is_new, listeners) = {
            let mut inner = self.lock();
            let is_new = inner
                .entries
                .insert((source.to_string(), key.to_string()), value.clone())
                .is_none();
            (is_new, inner.listeners.clone())
        };
        for l in listeners {
            l.on_entry_changed(source, key, &value, is_new);
        }
    }

    pub fn get(&self, source: &str, key: &str) -> Option<TelemetryValue> {
        self.lock()
            .entries
            .get(&(source.to_string(), key.to_string()))
            .cloned()
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }
}

impl BroadcastClient for LocalTable {
    fn add_listener(&self, listener: Arc<dyn EntryListener>) {
        let _delivery = self.lock_delivery();
        let existing: Vec<_> = {
            let mut inner = self.lock();
            inner.listeners.push(listener.clone());
            inner
                .entries
                .iter()
                .map(|((s, k), v)| (s.clone(), k.clone(), v.clone()))
                .collect()
        };
        for (source, key, value) in existing {
            listener.on_entry_changed(&source, &key, &value, true);
        }
    }

    fn is_connected(&self) -> bool {
        self.lock().connected
    }
}
