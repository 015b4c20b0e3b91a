//! Polling driver for the live dashboard.
//!
//! The thread calling [`Poller::run`] is the only one that touches the
//! [`StatsTracker`]. Each fetch runs its blocking RPC call on a short-lived
//! worker thread that posts `(token, result)` back over a channel. A
//! cancelled worker is never interrupted; its result is simply discarded
//! when it arrives.

use super::tracker::{DashboardView, FetchOutcome, FetchToken, StatsTracker};
use crate::aggregator::fetch_history;
use crate::parser::schema::DistributionEvent;
use crate::rpc::ChainReader;
use crate::utils::error::FetchError;
use log::{debug, info, warn};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Blocking fetch of one view's history window
pub type Fetcher =
    Arc<dyn Fn(&DashboardView) -> Result<Vec<DistributionEvent>, FetchError> + Send + Sync>;

/// External requests to the dashboard loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Manual refresh: cancel and restart
    Refresh,
    /// Mode or account change: cancel and restart
    SwitchView(DashboardView),
    /// Stop the loop; the in-flight fetch is cancelled
    Quit,
}

/// Reported to the `run` callback after every state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    FetchStarted(FetchToken),
    Resolved(FetchToken, FetchOutcome),
    ViewChanged,
}

enum Message {
    Trigger(Trigger),
    Resolved(FetchToken, Result<Vec<DistributionEvent>, FetchError>),
}

/// Cloneable handle for sending triggers from other threads
#[derive(Clone)]
pub struct TriggerHandle {
    tx: Sender<Message>,
}

impl TriggerHandle {
    /// Returns false once the poller is gone
    pub fn send(&self, trigger: Trigger) -> bool {
        self.tx.send(Message::Trigger(trigger)).is_ok()
    }
}

pub struct Poller {
    fetcher: Fetcher,
    interval: Duration,
    tracker: StatsTracker,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl Poller {
    pub fn new(fetcher: Fetcher, interval: Duration, view: DashboardView) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher,
            interval,
            tracker: StatsTracker::new(view),
            tx,
            rx,
        }
    }

    /// Poller backed by the chain read API
    pub fn from_reader(
        reader: Arc<dyn ChainReader>,
        event_type: String,
        limit: usize,
        interval: Duration,
        view: DashboardView,
    ) -> Self {
        let fetcher: Fetcher = Arc::new(move |view: &DashboardView| {
            fetch_history(reader.as_ref(), &event_type, view.filter_address(), limit)
        });
        Self::new(fetcher, interval, view)
    }

    pub fn handle(&self) -> TriggerHandle {
        TriggerHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn tracker(&self) -> &StatsTracker {
        &self.tracker
    }

    /// Start a fetch for the current view on a worker thread
    fn fetch_now(&mut self) -> Option<FetchToken> {
        let token = self.tracker.begin_fetch()?;
        let view = self.tracker.view().clone();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name(format!("fetch-{}", token.value()))
            .spawn(move || {
                let result = fetcher(&view);
                // Receiver gone means the loop quit; nothing to report to
                let _ = tx.send(Message::Resolved(token, result));
            });

        if let Err(e) = spawned {
            warn!("Failed to spawn fetch worker: {}", e);
            self.tracker.cancel();
            return None;
        }

        Some(token)
    }

    /// Run the dashboard loop until `Quit` or the callback breaks
    ///
    /// Fetches once immediately, then on every timer tick (skipped while a
    /// fetch is in flight), manual refresh, or view switch.
    pub fn run<F>(&mut self, mut on_event: F)
    where
        F: FnMut(PollEvent, &StatsTracker) -> ControlFlow<()>,
    {
        info!("Polling every {}s", self.interval.as_secs());

        let mut next_tick = Instant::now() + self.interval;
        if let Some(token) = self.fetch_now() {
            if on_event(PollEvent::FetchStarted(token), &self.tracker).is_break() {
                self.tracker.cancel();
                return;
            }
        }

        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            let event = match self.rx.recv_timeout(timeout) {
                Ok(Message::Resolved(token, result)) => {
                    let outcome = self.tracker.resolve(token, result);
                    Some(PollEvent::Resolved(token, outcome))
                }
                Ok(Message::Trigger(Trigger::Refresh)) => {
                    debug!("Manual refresh");
                    self.fetch_now().map(PollEvent::FetchStarted)
                }
                Ok(Message::Trigger(Trigger::SwitchView(view))) => {
                    if self.tracker.switch_view(view) {
                        next_tick = Instant::now() + self.interval;
                        if on_event(PollEvent::ViewChanged, &self.tracker).is_break() {
                            break;
                        }
                    }
                    self.fetch_now().map(PollEvent::FetchStarted)
                }
                Ok(Message::Trigger(Trigger::Quit)) => break,
                Err(RecvTimeoutError::Timeout) => {
                    next_tick = Instant::now() + self.interval;
                    if self.tracker.is_fetching() {
                        debug!("Tick skipped: fetch still in flight");
                        None
                    } else {
                        self.fetch_now().map(PollEvent::FetchStarted)
                    }
                }
                // Unreachable while self holds a sender
                Err(RecvTimeoutError::Disconnected) => break,
            };

            if let Some(event) = event {
                if on_event(event, &self.tracker).is_break() {
                    break;
                }
            }
        }

        self.tracker.cancel();
    }
}
