//! Distribution stats aggregation.
//!
//! This module turns the raw on-chain event log into:
//! - The bounded, newest-first history window
//! - Global dashboard statistics
//! - Per-viewer sent / received statistics
//! - The recent recipient ticker

pub mod feed;
pub mod history;
pub mod stats;
pub mod user_stats;

// Re-export main types and functions
pub use feed::{recent_recipient_feed, FeedItem};
pub use history::{fetch_history, get_event_details, get_user_events};
pub use stats::{compute_stats, AggregatedStats};
pub use user_stats::{compute_user_stats, role_of, viewer_amount, UserStats, ViewerRole};
