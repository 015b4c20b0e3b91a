//! Fetch the bounded window of distribution events and event objects.

use crate::parser::schema::{DistributionEvent, EventDetails};
use crate::parser::{decode_distribution_events, decode_event_details};
use crate::rpc::{ChainReader, EventOrder};
use crate::utils::error::{FetchError, RpcError};
use log::{debug, info};

/// Fetch the most recent `limit` distribution events, newest first
///
/// **Public** - main entry point for history fetches
///
/// # Arguments
/// * `reader` - Chain read API
/// * `event_type` - Fully qualified `InstantDistribution` type
/// * `filter_address` - Keep only events this address distributed or received
/// * `limit` - Window size (the dashboard uses 50)
///
/// # Errors
/// * `FetchError::Rpc` - RPC failure
/// * `FetchError::Parse` - every event in the window was malformed
pub fn fetch_history(
    reader: &dyn ChainReader,
    event_type: &str,
    filter_address: Option<&str>,
    limit: usize,
) -> Result<Vec<DistributionEvent>, FetchError> {
    let raw_events = reader.query_events(event_type, limit, EventOrder::Descending)?;
    let mut events = decode_distribution_events(&raw_events)?;

    if let Some(address) = filter_address {
        events.retain(|e| e.involves(address));
        debug!("{} events involve {}", events.len(), address);
    }

    // Stable: events sharing a timestamp keep node order
    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.truncate(limit);

    info!("Fetched {} distribution events", events.len());

    Ok(events)
}

/// Look up one staged distribution object
///
/// Returns `Ok(None)` when the object exists but is not a distribution event.
pub fn get_event_details(
    reader: &dyn ChainReader,
    object_id: &str,
) -> Result<Option<EventDetails>, RpcError> {
    let response = reader.get_object(object_id)?;
    Ok(decode_event_details(&response))
}

/// List staged distribution objects owned by an address
pub fn get_user_events(
    reader: &dyn ChainReader,
    owner: &str,
    struct_type: &str,
) -> Result<Vec<EventDetails>, RpcError> {
    let objects = reader.get_owned_objects(owner, struct_type)?;
    let events: Vec<EventDetails> = objects.iter().filter_map(decode_event_details).collect();

    debug!(
        "Decoded {}/{} owned distribution objects",
        events.len(),
        objects.len()
    );

    Ok(events)
}
