// Background timers delivering delayed card removals to a synchronous UI loop

use crate::engine::{RemovalScheduler, RemovalTicket};
use crate::error::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Tokio-backed [`RemovalScheduler`]
///
/// Each scheduled ticket is a sleeping task that pushes the ticket onto a
/// channel when it wakes. The UI loop polls [`drain_due`](Self::drain_due)
/// once per frame and forwards the tickets to the stack controller.
pub struct TokioRemovalTimers {
    runtime: tokio::runtime::Runtime,
    due_tx: mpsc::UnboundedSender<RemovalTicket>,
    due_rx: mpsc::UnboundedReceiver<RemovalTicket>,
    /// Timers not yet known to have fired
    pending: Vec<JoinHandle<()>>,
}

impl TokioRemovalTimers {
    /// Create the timer runtime
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("swipedeck-timers")
            .enable_time()
            .build()?;
        let (due_tx, due_rx) = mpsc::unbounded_channel();

        Ok(Self {
            runtime,
            due_tx,
            due_rx,
            pending: Vec::new(),
        })
    }

    /// Tickets whose delay has elapsed since the last call (non-blocking)
    pub fn drain_due(&mut self) -> Vec<RemovalTicket> {
        let mut due = Vec::new();
        while let Ok(ticket) = self.due_rx.try_recv() {
            due.push(ticket);
        }
        if !due.is_empty() {
            self.pending.retain(|handle| !handle.is_finished());
        }
        due
    }

    /// Number of timers that may still fire
    pub fn pending_count(&mut self) -> usize {
        self.pending.retain(|handle| !handle.is_finished());
        self.pending.len()
    }
}

impl RemovalScheduler for TokioRemovalTimers {
    fn schedule(&mut self, ticket: RemovalTicket, delay: Duration) {
        debug!(card = %ticket.card_id, epoch = ticket.epoch, ?delay, "removal scheduled");
        let due_tx = self.due_tx.clone();
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver lives as long as the timers; a send error means shutdown
            let _ = due_tx.send(ticket);
        });
        self.pending.push(handle);
    }

    fn cancel_all(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
        // Drop anything that fired but was not drained yet
        while self.due_rx.try_recv().is_ok() {}
    }
}

impl Drop for TokioRemovalTimers {
    fn drop(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }
}
