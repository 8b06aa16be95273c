//! Connectivity polling: projects `is_connected()` onto the status banner.
//!
//! Not part of the push path. The UI calls [`ConnectivityMonitor::poll`] every
//! frame; it only queries the client once per interval.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::broadcast::BroadcastClient;
use crate::mutation::{DisplayMutation, SinkId};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Banner text shown while the broadcast source is unreachable.
pub fn not_connected_text(ip: &str) -> String {
    format!("{ip} does not have an active NetworkTables server.")
}

#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    interval: Duration,
    last_poll: Option<Instant>,
    connected: Option<bool>,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ConnectivityMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_poll: None,
            connected: None,
        }
    }

    /// Last polled state (`None` before the first poll).
    pub fn connected(&self) -> Option<bool> {
        self.connected
    }

    /// Poll `client` if the interval has elapsed since the last poll (or on the first call).
    /// Returns the banner visibility mutation when a poll happened.
    pub fn poll(&mut self, now: Instant, client: &dyn BroadcastClient) -> Option<DisplayMutation> {
        let due = self
            .last_poll
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if !due {
            return None;
        }
        self.last_poll = Some(now);

        let connected = client.is_connected();
        match (self.connected, connected) {
            (Some(false) | None, true) => info!("broadcast source connected"),
            (Some(true), false) => warn!("broadcast source lost"),
            _ => {}
        }
        self.connected = Some(connected);
        Some(DisplayMutation::visible(SinkId::ConnectionStatus, !connected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::LocalTable;
    use crate::mutation::MutationOp;

    #[test]
    fn first_poll_happens_immediately() {
        let table = LocalTable::new();
        table.set_connected(false);
        let mut mon = ConnectivityMonitor::default();
        let m = mon.poll(Instant::now(), &table).unwrap();
        assert_eq!(m.target, SinkId::ConnectionStatus);
        assert_eq!(m.op, MutationOp::SetVisible(true));
    }

    #[test]
    fn polls_are_rate_limited() {
        let table = LocalTable::new();
        let mut mon = ConnectivityMonitor::new(Duration::from_secs(1));
        let t0 = Instant::now();
        assert!(mon.poll(t0, &table).is_some());
        assert!(mon.poll(t0 + Duration::from_millis(500), &table).is_none());
        let m = mon.poll(t0 + Duration::from_secs(1), &table).unwrap();
        assert_eq!(m.op, MutationOp::SetVisible(false));
        assert_eq!(mon.connected(), Some(true));
    }

    #[test]
    fn banner_names_the_address() {
        assert_eq!(
            not_connected_text("10.63.69.2"),
            "10.63.69.2 does not have an active NetworkTables server."
        );
    }
}
