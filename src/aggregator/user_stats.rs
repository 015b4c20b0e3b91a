//! Per-viewer statistics: what the connected address sent and received.
//!
//! Every event gets exactly one primary role per pass. The distributor
//! check runs first, so an airdrop that includes its own sender counts as
//! sent only.

use crate::parser::schema::{mist_to_sui, DistributionEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role of the viewer in one event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerRole {
    Distributor,
    Recipient,
}

impl ViewerRole {
    pub fn label(&self) -> &'static str {
        match self {
            ViewerRole::Distributor => "Distributor",
            ViewerRole::Recipient => "Recipient",
        }
    }
}

/// Classify an event relative to a viewer
///
/// **Public** - also used to render the "Your Role" column
pub fn role_of(event: &DistributionEvent, viewer: &str) -> Option<ViewerRole> {
    if event.is_distributor(viewer) {
        Some(ViewerRole::Distributor)
    } else if event.is_recipient(viewer) {
        Some(ViewerRole::Recipient)
    } else {
        None
    }
}

/// Signed amount the viewer moved in an event, in MIST
///
/// Distributors paid the whole total; recipients got one share.
pub fn viewer_amount(event: &DistributionEvent, role: ViewerRole) -> u64 {
    match role {
        ViewerRole::Distributor => event.total_amount,
        ViewerRole::Recipient => event.amount_per_recipient,
    }
}

/// Sent / received partition of a window for one viewer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub viewer: String,

    /// Sum of `total_amount` over events the viewer distributed, in MIST
    pub total_sent: u64,

    /// Sum of `amount_per_recipient` over events the viewer only received, in MIST
    pub total_received: u64,

    pub distributions_made: usize,
    pub distributions_received: usize,

    /// Distinct recipients across the viewer's own distributions
    pub recipients_reached: usize,
}

impl UserStats {
    /// Sent plus received, in MIST
    pub fn total_involved(&self) -> u64 {
        self.total_sent.saturating_add(self.total_received)
    }

    pub fn total_sent_sui(&self) -> f64 {
        mist_to_sui(self.total_sent)
    }

    pub fn total_received_sui(&self) -> f64 {
        mist_to_sui(self.total_received)
    }

    /// Events in which the viewer took part
    pub fn distribution_count(&self) -> usize {
        self.distributions_made + self.distributions_received
    }
}

/// Compute sent / received statistics for a viewer
///
/// **Public** - main entry point for per-viewer stats
///
/// Events the viewer is not part of are ignored, so the full window can
/// be passed in.
pub fn compute_user_stats(events: &[DistributionEvent], viewer: &str) -> UserStats {
    let mut stats = UserStats {
        viewer: viewer.to_string(),
        ..Default::default()
    };
    let mut reached: HashSet<&str> = HashSet::new();

    for event in events {
        match role_of(event, viewer) {
            Some(ViewerRole::Distributor) => {
                stats.total_sent = stats.total_sent.saturating_add(event.total_amount);
                stats.distributions_made += 1;
                reached.extend(event.recipients.iter().map(String::as_str));
            }
            Some(ViewerRole::Recipient) => {
                stats.total_received = stats
                    .total_received
                    .saturating_add(event.amount_per_recipient);
                stats.distributions_received += 1;
            }
            None => {}
        }
    }

    stats.recipients_reached = reached.len();
    stats
}
