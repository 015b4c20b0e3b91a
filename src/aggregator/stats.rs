//! Global dashboard statistics over a window of distribution events.

use crate::parser::schema::{mist_to_sui, DistributionEvent};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Statistics derived from one fetched window
///
/// Ephemeral: recomputed on every fetch, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStats {
    /// Sum of every event's total amount, in MIST
    pub total_amount_distributed: u64,

    /// Distinct addresses across all recipient lists
    pub unique_recipient_count: usize,

    pub total_distribution_count: usize,

    /// The window itself, newest first
    pub distributions: Vec<DistributionEvent>,
}

impl AggregatedStats {
    pub fn total_amount_distributed_sui(&self) -> f64 {
        mist_to_sui(self.total_amount_distributed)
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Distributed: {:.2} SUI | Unique recipients: {} | Distributions: {}",
            self.total_amount_distributed_sui(),
            self.unique_recipient_count,
            self.total_distribution_count
        )
    }
}

/// Compute global statistics for a window
///
/// **Public** - main entry point for global stats
///
/// Amounts are summed in MIST (saturating), so the total does not depend
/// on event order. A recipient appearing in several events counts once.
pub fn compute_stats(events: &[DistributionEvent]) -> AggregatedStats {
    let total_amount_distributed = events
        .iter()
        .fold(0u64, |sum, e| sum.saturating_add(e.total_amount));

    let unique_recipient_count = events
        .iter()
        .flat_map(|e| e.recipients.iter().map(String::as_str))
        .collect::<HashSet<&str>>()
        .len();

    let stats = AggregatedStats {
        total_amount_distributed,
        unique_recipient_count,
        total_distribution_count: events.len(),
        distributions: events.to_vec(),
    };

    debug!("Computed stats: {}", stats.summary());

    stats
}
