//! Output writers for dashboard data.
//!
//! This module handles getting results out of the process:
//! - JSON snapshots and unsigned transaction intents
//! - Colored terminal tables

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_snapshot, write_intent, write_snapshot};
pub use table::{
    render_dashboard, render_event_details, render_feed, render_recipient_check, Headline,
};
