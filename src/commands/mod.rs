//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod event;
pub mod feed;
pub mod models;
pub mod recipients;
pub mod split;
pub mod stats;
pub mod submit;
pub mod utils;
pub mod watch;

// Re-export main command functions
pub use event::{execute_event, plan_event};
pub use feed::execute_feed;
pub use models::{
    EventAction, EventArgs, FeedArgs, RecipientSource, SignerArgs, SplitArgs, StatsArgs,
    ViewArgs, WatchArgs,
};
pub use recipients::{execute_check, execute_template};
pub use split::{execute_split, plan_split};
pub use stats::execute_stats;
pub use utils::{display_version, validate_snapshot_file};
pub use watch::execute_watch;
