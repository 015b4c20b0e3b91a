//! Stale-request-safe dashboard state.
//!
//! Every fetch captures a monotonically increasing token. Starting a new
//! fetch cancels the previous one by making its token stale; a result is
//! committed only if its token is still the live one when it resolves.
//! Overlapping requests are not serialized, only their results filtered.
//!
//! ```text
//! Idle -> Fetching -> Committed -> Idle
//!                  -> Failed (previous snapshot kept) -> Idle
//!                  -> Discarded (cancelled, silent)
//! ```

use crate::aggregator::{compute_stats, compute_user_stats, AggregatedStats, UserStats};
use crate::parser::schema::DistributionEvent;
use crate::utils::error::FetchError;
use chrono::{DateTime, Utc};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Which distributions the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every distribution in the window
    All,
    /// Only distributions the viewer sent or received
    Mine,
}

/// One logical view: mode plus the connected address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub mode: ViewMode,
    pub viewer: Option<String>,
}

impl DashboardView {
    pub fn new(mode: ViewMode, viewer: Option<String>) -> Self {
        Self { mode, viewer }
    }

    pub fn all() -> Self {
        Self::new(ViewMode::All, None)
    }

    pub fn mine(viewer: impl Into<String>) -> Self {
        Self::new(ViewMode::Mine, Some(viewer.into()))
    }

    /// Address the history fetch is filtered by
    pub fn filter_address(&self) -> Option<&str> {
        match self.mode {
            ViewMode::All => None,
            ViewMode::Mine => self.viewer.as_deref(),
        }
    }

    /// "Mine" needs a connected account; "All" never does
    pub fn is_fetchable(&self) -> bool {
        self.mode == ViewMode::All || self.viewer.is_some()
    }
}

/// Identifies one fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

impl FetchToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Fetching(FetchToken),
}

/// What happened to a resolved fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result became the displayed snapshot
    Committed,
    /// Cancelled or superseded; dropped silently
    Discarded,
    /// Errored; previous snapshot kept
    Failed,
}

/// Committed state of one fetch cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub version: String,
    pub view: DashboardView,
    pub stats: AggregatedStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_stats: Option<UserStats>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Compute stats for a fetched window
    ///
    /// User stats are derived whenever a viewer is known.
    pub fn build(view: DashboardView, events: &[DistributionEvent]) -> Self {
        let stats = compute_stats(events);
        let user_stats = view
            .viewer
            .as_deref()
            .map(|viewer| compute_user_stats(events, viewer));

        Self {
            version: crate::utils::config::SCHEMA_VERSION.to_string(),
            view,
            stats,
            user_stats,
            fetched_at: Utc::now(),
        }
    }
}

/// Owner of the displayed dashboard state
#[derive(Debug)]
pub struct StatsTracker {
    view: DashboardView,
    latest: u64,
    phase: FetchPhase,
    snapshot: Option<DashboardSnapshot>,
    last_error: Option<String>,
}

impl StatsTracker {
    pub fn new(view: DashboardView) -> Self {
        Self {
            view,
            latest: 0,
            phase: FetchPhase::Idle,
            snapshot: None,
            last_error: None,
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, FetchPhase::Fetching(_))
    }

    /// Last committed snapshot, if any
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Message of the most recent failed fetch, cleared on commit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a fetch cycle, cancelling the one in flight
    ///
    /// Returns `None` when the view cannot be fetched ("mine" without an
    /// account).
    pub fn begin_fetch(&mut self) -> Option<FetchToken> {
        if !self.view.is_fetchable() {
            debug!("Skipping fetch: no account connected for 'mine' view");
            return None;
        }

        self.cancel();
        self.latest += 1;
        let token = FetchToken(self.latest);
        self.phase = FetchPhase::Fetching(token);

        debug!("Started fetch #{}", token.0);
        Some(token)
    }

    /// Cancel the in-flight fetch; its result will be discarded
    pub fn cancel(&mut self) {
        if let FetchPhase::Fetching(token) = self.phase {
            debug!("Cancelled fetch #{}", token.0);
        }
        self.phase = FetchPhase::Idle;
    }

    /// Switch mode and/or account
    ///
    /// Cancels the in-flight fetch. An account change also clears the
    /// snapshot so one wallet's stats are never shown for another.
    /// Returns false if the view is unchanged.
    pub fn switch_view(&mut self, view: DashboardView) -> bool {
        if view == self.view {
            return false;
        }

        self.cancel();
        if view.viewer != self.view.viewer {
            info!("Account changed, resetting stats");
            self.snapshot = None;
            self.last_error = None;
        }
        self.view = view;
        true
    }

    /// Settle a fetch
    ///
    /// Only the live token may commit; anything else is dropped, even if
    /// it resolves after the live fetch.
    pub fn resolve(
        &mut self,
        token: FetchToken,
        result: Result<Vec<DistributionEvent>, FetchError>,
    ) -> FetchOutcome {
        if self.phase != FetchPhase::Fetching(token) {
            debug!("Discarding stale fetch #{}", token.0);
            return FetchOutcome::Discarded;
        }
        self.phase = FetchPhase::Idle;

        match result {
            Ok(events) => {
                let snapshot = DashboardSnapshot::build(self.view.clone(), &events);
                debug!("Committed fetch #{}: {}", token.0, snapshot.stats.summary());
                self.snapshot = Some(snapshot);
                self.last_error = None;
                FetchOutcome::Committed
            }
            Err(e) if e.is_cancelled() => FetchOutcome::Discarded,
            Err(e) => {
                error!("Error fetching stats: {}", e);
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RpcError;

    fn event(id: &str, distributor: &str, recipients: &[&str]) -> DistributionEvent {
        DistributionEvent {
            id: id.to_string(),
            distributor: distributor.to_string(),
            event_name: String::new(),
            total_amount: 10,
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            amount_per_recipient: 5,
            timestamp: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn test_later_fetch_wins_regardless_of_order() {
        let mut tracker = StatsTracker::new(DashboardView::all());
        let first = tracker.begin_fetch().unwrap();
        let second = tracker.begin_fetch().unwrap();
        assert!(second > first);

        let outcome = tracker.resolve(second, Ok(vec![event("new", "A", &["B"])]));
        assert_eq!(outcome, FetchOutcome::Committed);

        let outcome = tracker.resolve(first, Ok(vec![event("old", "A", &["B"])]));
        assert_eq!(outcome, FetchOutcome::Discarded);

        let snapshot = tracker.snapshot().unwrap();
        assert_eq!(snapshot.stats.distributions[0].id, "new");
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut tracker = StatsTracker::new(DashboardView::all());
        let token = tracker.begin_fetch().unwrap();
        tracker.resolve(token, Ok(vec![event("1", "A", &["B"])]));

        let token = tracker.begin_fetch().unwrap();
        let outcome = tracker.resolve(
            token,
            Err(FetchError::Rpc(RpcError::InvalidResponse("boom".to_string()))),
        );

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(tracker.phase(), FetchPhase::Idle);
        assert_eq!(tracker.snapshot().unwrap().stats.total_distribution_count, 1);
        assert!(tracker.last_error().unwrap().contains("boom"));
    }

    #[test]
    fn test_cancelled_error_is_silent() {
        let mut tracker = StatsTracker::new(DashboardView::all());
        let token = tracker.begin_fetch().unwrap();
        let outcome = tracker.resolve(token, Err(FetchError::Cancelled));

        assert_eq!(outcome, FetchOutcome::Discarded);
        assert!(tracker.last_error().is_none());
    }

    #[test]
    fn test_cancel_discards_in_flight() {
        let mut tracker = StatsTracker::new(DashboardView::all());
        let token = tracker.begin_fetch().unwrap();
        tracker.cancel();

        assert_eq!(tracker.resolve(token, Ok(vec![])), FetchOutcome::Discarded);
        assert!(tracker.snapshot().is_none());
    }

    #[test]
    fn test_mine_without_account_is_not_fetched() {
        let mut tracker = StatsTracker::new(DashboardView::new(ViewMode::Mine, None));
        assert!(tracker.begin_fetch().is_none());
        assert!(!tracker.is_fetching());
    }

    #[test]
    fn test_account_switch_resets_snapshot() {
        let mut tracker = StatsTracker::new(DashboardView::mine("A"));
        let token = tracker.begin_fetch().unwrap();
        tracker.resolve(token, Ok(vec![event("1", "A", &["B"])]));
        assert!(tracker.snapshot().unwrap().user_stats.is_some());

        // Mode change on the same account keeps the snapshot
        assert!(tracker.switch_view(DashboardView::new(ViewMode::All, Some("A".to_string()))));
        assert!(tracker.snapshot().is_some());

        assert!(tracker.switch_view(DashboardView::mine("B")));
        assert!(tracker.snapshot().is_none());
        assert!(!tracker.switch_view(DashboardView::mine("B")));
    }

    #[test]
    fn test_switch_view_cancels_in_flight() {
        let mut tracker = StatsTracker::new(DashboardView::all());
        let token = tracker.begin_fetch().unwrap();
        tracker.switch_view(DashboardView::mine("A"));

        assert_eq!(tracker.resolve(token, Ok(vec![])), FetchOutcome::Discarded);
    }

    #[test]
    fn test_filter_address() {
        assert_eq!(DashboardView::all().filter_address(), None);
        assert_eq!(DashboardView::mine("A").filter_address(), Some("A"));
        let all_with_viewer = DashboardView::new(ViewMode::All, Some("A".to_string()));
        assert_eq!(all_with_viewer.filter_address(), None);
    }
}
