//! Request-token tracking and polling for the live dashboard.

pub mod driver;
pub mod tracker;

pub use driver::{Fetcher, PollEvent, Poller, Trigger, TriggerHandle};
pub use tracker::{
    DashboardSnapshot, DashboardView, FetchOutcome, FetchPhase, FetchToken, StatsTracker,
    ViewMode,
};
