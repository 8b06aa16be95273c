//! Cross-thread hand-off of display mutations to the UI thread.
//!
//! [`UpdateRelay`] is the sending half: cheap to clone, callable from any
//! thread, never blocks. [`RelayReceiver`] is owned by the UI thread, which
//! drains it once per frame and applies each mutation to its sinks.
//!
//! The queue is an unbounded `mpsc` channel, so nothing is dropped under
//! bursts and mutations sent from one thread arrive in submission order.
//! Once the receiver is gone (window closed) submissions are discarded.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::mutation::DisplayMutation;
use crate::sinks::{apply_mutation, SinkRegistry};

/// Callback used to wake the UI thread after a submission (e.g. `egui::Context::request_repaint`).
pub type Waker = Box<dyn Fn() + Send + Sync + 'static>;

/// Sending half of the relay.
#[derive(Clone)]
pub struct UpdateRelay {
    tx: Sender<DisplayMutation>,
    waker: Arc<OnceLock<Waker>>,
}

/// Receiving half of the relay, pinned to the UI thread.
pub struct RelayReceiver {
    rx: Receiver<DisplayMutation>,
    waker: Arc<OnceLock<Waker>>,
}

/// Create a connected `(UpdateRelay, RelayReceiver)` pair.
pub fn channel_relay() -> (UpdateRelay, RelayReceiver) {
    let (tx, rx) = std::sync::mpsc::channel();
    let waker = Arc::new(OnceLock::new());
    (
        UpdateRelay {
            tx,
            waker: Arc::clone(&waker),
        },
        RelayReceiver { rx, waker },
    )
}

impl UpdateRelay {
    /// Queue one mutation for the UI thread.
    pub fn submit(&self, mutation: DisplayMutation) {
        if self.enqueue(mutation) {
            self.wake();
        }
    }

    /// Queue a batch, waking the UI thread once.
    pub fn submit_all<I>(&self, mutations: I)
    where
        I: IntoIterator<Item = DisplayMutation>,
    {
        let mut queued = false;
        for m in mutations {
            queued |= self.enqueue(m);
        }
        if queued {
            self.wake();
        }
    }

    fn enqueue(&self, mutation: DisplayMutation) -> bool {
        match self.tx.send(mutation) {
            Ok(()) => true,
            Err(std::sync::mpsc::SendError(m)) => {
                trace!(target_sink = ?m.target, "display closed, dropping mutation");
                false
            }
        }
    }

    fn wake(&self) {
        if let Some(w) = self.waker.get() {
            w();
        }
    }
}

impl RelayReceiver {
    /// Install the wake callback. Only the first call has an effect.
    pub fn set_waker<F>(&self, waker: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let _ = self.waker.set(Box::new(waker));
    }

    /// Next pending mutation, if any. Never blocks.
    pub fn try_next(&self) -> Option<DisplayMutation> {
        match self.rx.try_recv() {
            Ok(m) => Some(m),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Apply every pending mutation to `sinks`, in queue order. Returns how many were applied.
    pub fn drain<R: SinkRegistry + ?Sized>(&self, sinks: &mut R) -> usize {
        let mut applied = 0;
        while let Some(m) = self.try_next() {
            apply_mutation(sinks, m);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{DisplayMutation, MutationOp, SinkId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn mutations_come_out_in_submission_order() {
        let (relay, rx) = channel_relay();
        relay.submit(DisplayMutation::text(SinkId::ArmMode, "a"));
        relay.submit(DisplayMutation::text(SinkId::ArmMode, "b"));
        assert_eq!(rx.try_next().unwrap().op, MutationOp::SetText("a".into()));
        assert_eq!(rx.try_next().unwrap().op, MutationOp::SetText("b".into()));
        assert!(rx.try_next().is_none());
    }

    #[test]
    fn submit_after_receiver_dropped_is_silent() {
        let (relay, rx) = channel_relay();
        drop(rx);
        relay.submit(DisplayMutation::visible(SinkId::ConnectionStatus, true));
    }

    #[test]
    fn waker_runs_once_per_batch() {
        let (relay, rx) = channel_relay();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        rx.set_waker(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        relay.submit_all(vec![
            DisplayMutation::numeric(SinkId::Position, 1.0),
            DisplayMutation::numeric(SinkId::Position, 2.0),
        ]);
        relay.submit(DisplayMutation::numeric(SinkId::Position, 3.0));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
