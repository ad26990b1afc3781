//! Polling samplers and their scheduler.
//!
//! A [`Sampler`] is a synchronous state machine: [`Sampler::begin`] is called
//! when a poll starts and [`Sampler::complete`] when its fetch resolves. The
//! scheduler in this module drives a sampler from a tokio interval and
//! publishes its state through a watch channel for the TUI.
//!
//! ```text
//!  interval tick ──▶ begin() ──▶ spawn fetch ──▶ complete() ──▶ watch::Sender
//!        ▲                                                          │
//!        └──── poll_now() (Notify)                    TUI ◀─────────┘
//! ```
//!
//! Polls may overlap when a fetch takes longer than the period. Every poll
//! carries a sequence number and completions older than the latest applied
//! one are discarded.

mod load;
mod status;

pub use load::{LoadSampler, LoadState, MissingCpuPolicy};
pub use status::{StatusSampler, StatusState};

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::client::{FetchError, HealthClient, HealthPayload};

/// Identifies one poll of a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and decides which completions may still be applied.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    issued: u64,
    latest_applied: u64,
    in_flight: usize,
}

impl Sequencer {
    /// Start a new poll.
    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.in_flight += 1;
        Ticket(self.issued)
    }

    /// Finish a poll. Returns true if its result is newer than anything applied so far.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if ticket.0 > self.latest_applied {
            self.latest_applied = ticket.0;
            true
        } else {
            false
        }
    }

    /// Number of polls started but not yet settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

/// A poll-driven state machine.
pub trait Sampler: Send + 'static {
    /// Observable state published to the renderer.
    type State: Clone + Send + Sync + 'static;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// A poll is about to issue its request.
    fn begin(&mut self) -> Ticket;

    /// The request for `ticket` resolved.
    ///
    /// Returns true if the result was applied, false if it was stale.
    fn complete(&mut self, ticket: Ticket, result: Result<HealthPayload, FetchError>) -> bool;

    /// Snapshot of the current state.
    fn state(&self) -> Self::State;
}

struct Mounted<S> {
    sampler: S,
    mounted: bool,
}

trait Teardown: Send + Sync {
    fn teardown(&self);
}

impl<S: Sampler> Teardown for Mutex<Mounted<S>> {
    fn teardown(&self) {
        self.lock().mounted = false;
    }
}

/// Handle to a running sampler.
///
/// Dropping the handle unmounts the sampler.
pub struct SamplerHandle<T> {
    name: &'static str,
    receiver: watch::Receiver<T>,
    timer: JoinHandle<()>,
    trigger: Arc<Notify>,
    mounted: Arc<dyn Teardown>,
    active: bool,
}

impl<T> std::fmt::Debug for SamplerHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplerHandle")
            .field("name", &self.name)
            .field("active", &self.active)
            .finish()
    }
}

impl<T: Clone> SamplerHandle<T> {
    /// Current state.
    pub fn state(&self) -> T {
        self.receiver.borrow().clone()
    }

    /// Borrow the current state without cloning.
    pub fn borrow(&self) -> watch::Ref<'_, T> {
        self.receiver.borrow()
    }

    /// A new receiver for state updates.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.receiver.clone()
    }
}

impl<T> SamplerHandle<T> {
    /// Request an immediate poll outside the regular schedule.
    pub fn poll_now(&self) {
        if self.active {
            self.trigger.notify_one();
        }
    }

    /// Whether the sampler is still mounted.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop the schedule and discard results of polls still in flight.
    pub fn unmount(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.timer.abort();
        self.mounted.teardown();
        info!(sampler = self.name, "sampler unmounted");
    }
}

impl<T> Drop for SamplerHandle<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Shortest polling period; shorter periods are raised to this.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawn `sampler` on the current tokio runtime, polling `client` every `period`.
///
/// The first poll fires immediately. A `period` below [`MIN_PERIOD`] (including
/// zero) is raised to [`MIN_PERIOD`].
pub fn spawn<S: Sampler>(
    sampler: S,
    client: Arc<dyn HealthClient>,
    period: Duration,
) -> SamplerHandle<S::State> {
    let name = sampler.name();
    if period < MIN_PERIOD {
        warn!(sampler = name, period = ?period, "polling period too short, using {:?}", MIN_PERIOD);
    }
    let period = period.max(MIN_PERIOD);
    let (tx, rx) = watch::channel(sampler.state());
    let tx = Arc::new(tx);
    let shared = Arc::new(Mutex::new(Mounted {
        sampler,
        mounted: true,
    }));
    let trigger = Arc::new(Notify::new());

    info!(sampler = name, period = ?period, endpoint = client.description(), "sampler mounted");

    let timer = tokio::spawn(run_schedule(
        shared.clone(),
        tx,
        client,
        period,
        trigger.clone(),
    ));

    SamplerHandle {
        name,
        receiver: rx,
        timer,
        trigger,
        mounted: shared,
        active: true,
    }
}

async fn run_schedule<S: Sampler>(
    shared: Arc<Mutex<Mounted<S>>>,
    tx: Arc<watch::Sender<S::State>>,
    client: Arc<dyn HealthClient>,
    period: Duration,
    trigger: Arc<Notify>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = trigger.notified() => {}
        }
        start_poll(&shared, &tx, &client);
    }
}

fn start_poll<S: Sampler>(
    shared: &Arc<Mutex<Mounted<S>>>,
    tx: &Arc<watch::Sender<S::State>>,
    client: &Arc<dyn HealthClient>,
) {
    let ticket = {
        let mut guard = shared.lock();
        if !guard.mounted {
            return;
        }
        let ticket = guard.sampler.begin();
        tx.send_replace(guard.sampler.state());
        ticket
    };

    let shared = shared.clone();
    let tx = tx.clone();
    let client = client.clone();

    tokio::spawn(async move {
        let result = client.fetch_health().await;

        let mut guard = shared.lock();
        if !guard.mounted {
            debug!(seq = ticket.seq(), "discarding result after unmount");
            return;
        }
        let name = guard.sampler.name();
        match &result {
            Ok(_) => debug!(sampler = name, seq = ticket.seq(), "poll succeeded"),
            Err(e) => debug!(sampler = name, seq = ticket.seq(), error = %e, "poll failed"),
        }
        if !guard.sampler.complete(ticket, result) {
            debug!(sampler = name, seq = ticket.seq(), "discarding stale result");
        }
        tx.send_replace(guard.sampler.state());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencer_in_order() {
        let mut seq = Sequencer::default();
        let a = seq.issue();
        assert_eq!(seq.in_flight(), 1);
        assert!(seq.settle(a));
        let b = seq.issue();
        assert!(seq.settle(b));
        assert_eq!(seq.in_flight(), 0);
    }

    #[test]
    fn test_sequencer_discards_older_completion() {
        let mut seq = Sequencer::default();
        let old = seq.issue();
        let new = seq.issue();
        assert_eq!(seq.in_flight(), 2);
        assert!(seq.settle(new));
        assert!(!seq.settle(old));
        assert_eq!(seq.in_flight(), 0);
    }

    #[test]
    fn test_ticket_ordering() {
        let mut seq = Sequencer::default();
        let a = seq.issue();
        let b = seq.issue();
        assert!(a < b);
        assert_eq!(b.seq(), 2);
    }
}
