//! Domain types decoded from chain payloads.
//!
//! Amounts are kept in MIST (base units) as read from the chain.
//! Conversion to SUI happens only for display.

use crate::utils::config::MIST_PER_SUI;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One on-chain `InstantDistribution` event
///
/// Immutable once observed; never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEvent {
    /// Transaction digest that emitted the event
    pub id: String,

    /// Address that funded the distribution
    pub distributor: String,

    pub event_name: String,

    /// Total amount distributed, in MIST
    pub total_amount: u64,

    /// Ordered recipient addresses (non-empty)
    pub recipients: Vec<String>,

    /// Amount each recipient received, in MIST
    pub amount_per_recipient: u64,

    pub timestamp: DateTime<Utc>,
}

impl DistributionEvent {
    pub fn total_amount_sui(&self) -> f64 {
        mist_to_sui(self.total_amount)
    }

    pub fn amount_per_recipient_sui(&self) -> f64 {
        mist_to_sui(self.amount_per_recipient)
    }

    pub fn is_distributor(&self, address: &str) -> bool {
        self.distributor == address
    }

    pub fn is_recipient(&self, address: &str) -> bool {
        self.recipients.iter().any(|r| r == address)
    }

    /// True if the address sent or received funds in this event
    pub fn involves(&self, address: &str) -> bool {
        self.is_distributor(address) || self.is_recipient(address)
    }
}

/// On-chain `DistributionEvent` object (staged distribution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub id: String,
    pub name: String,
    pub creator: String,

    /// Deposited balance, in MIST
    pub total_deposited: u64,

    pub recipients: Vec<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl EventDetails {
    /// Amount already paid out; active events have not distributed yet
    pub fn tokens_distributed(&self) -> u64 {
        if self.is_active {
            0
        } else {
            self.total_deposited
        }
    }
}

/// Convert MIST to SUI for display
pub fn mist_to_sui(mist: u64) -> f64 {
    mist as f64 / MIST_PER_SUI as f64
}

/// Format a MIST amount as SUI with fixed decimals
pub fn format_sui(mist: u64, decimals: usize) -> String {
    format!("{:.*}", decimals, mist_to_sui(mist))
}
