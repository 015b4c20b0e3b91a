//! Recent recipient ticker ("0x12ab...cdef received 1.2500 SUI").

use crate::parser::schema::DistributionEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub address: String,

    /// Per-recipient amount of the originating event, in MIST
    pub amount: u64,
}

/// Flatten a newest-first window into (recipient, amount) pairs and keep
/// the first `limit`, i.e. the most recent recipients
pub fn recent_recipient_feed(events: &[DistributionEvent], limit: usize) -> Vec<FeedItem> {
    events
        .iter()
        .flat_map(|event| {
            event.recipients.iter().map(move |address| FeedItem {
                address: address.clone(),
                amount: event.amount_per_recipient,
            })
        })
        .take(limit)
        .collect()
}
