//! Payload decoding and domain types.
//!
//! This module handles:
//! - Decoding `InstantDistribution` events from the read API
//! - Decoding `DistributionEvent` objects
//! - MIST / SUI display conversion

pub mod distribution;
pub mod object;
pub mod schema;

// Re-export main types
pub use distribution::{decode_distribution_event, decode_distribution_events, parse_u64_value};
pub use object::decode_event_details;
pub use schema::{format_sui, mist_to_sui, DistributionEvent, EventDetails};
