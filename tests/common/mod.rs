//! In-memory chain for integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use sui_split_studio::rpc::types::EventId;
use sui_split_studio::rpc::{ChainReader, EventOrder, ObjectResponse, RawEvent};
use sui_split_studio::utils::error::RpcError;

pub const ME: &str = "0x00000000000000000000000000000000000000000000000000000000000000aa";
pub const ALICE: &str = "0x00000000000000000000000000000000000000000000000000000000000000a1";
pub const BOB: &str = "0x00000000000000000000000000000000000000000000000000000000000000b0";
pub const CAROL: &str = "0x00000000000000000000000000000000000000000000000000000000000000c0";

/// Events are stored newest first, as the node returns them descending
#[derive(Default)]
pub struct FakeChain {
    pub events: Vec<RawEvent>,
    pub objects: HashMap<String, Value>,
    pub fail: bool,
    pub queries: AtomicUsize,
}

impl FakeChain {
    pub fn with_events(events: Vec<RawEvent>) -> Self {
        Self {
            events,
            ..Default::default()
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl ChainReader for FakeChain {
    fn query_events(
        &self,
        _event_type: &str,
        limit: usize,
        order: EventOrder,
    ) -> Result<Vec<RawEvent>, RpcError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RpcError::InvalidResponse("node unavailable".to_string()));
        }

        let mut events = self.events.clone();
        if order == EventOrder::Ascending {
            events.reverse();
        }
        events.truncate(limit);
        Ok(events)
    }

    fn get_object(&self, object_id: &str) -> Result<ObjectResponse, RpcError> {
        let value = self
            .objects
            .get(object_id)
            .cloned()
            .ok_or_else(|| RpcError::ObjectNotFound(object_id.to_string()))?;
        serde_json::from_value(value).map_err(|e| RpcError::InvalidResponse(e.to_string()))
    }

    fn get_owned_objects(
        &self,
        owner: &str,
        _struct_type: &str,
    ) -> Result<Vec<ObjectResponse>, RpcError> {
        self.objects
            .values()
            .filter(|v| v["data"]["content"]["fields"]["creator"] == owner)
            .map(|v| {
                serde_json::from_value(v.clone())
                    .map_err(|e| RpcError::InvalidResponse(e.to_string()))
            })
            .collect()
    }
}

/// `InstantDistribution` event as the node returns it
pub fn distribution(
    digest: &str,
    distributor: &str,
    recipients: &[&str],
    total: u64,
    timestamp_ms: u64,
) -> RawEvent {
    let share = total / recipients.len().max(1) as u64;
    raw_event(
        digest,
        json!({
            "distributor": distributor,
            "event_name": "airdrop".as_bytes(),
            "total_amount": total.to_string(),
            "recipients": recipients,
            "amount_per_recipient": share.to_string(),
            "timestamp": timestamp_ms.to_string(),
        }),
    )
}

pub fn raw_event(digest: &str, parsed_json: Value) -> RawEvent {
    RawEvent {
        id: EventId {
            tx_digest: digest.to_string(),
            event_seq: "0".to_string(),
        },
        package_id: None,
        transaction_module: Some("fund_distributor".to_string()),
        sender: None,
        event_type: None,
        parsed_json,
        timestamp_ms: None,
    }
}

/// `sui_getObject` response for a staged distribution event
pub fn event_object(id: &str, creator: &str, deposited: u64, active: bool) -> Value {
    json!({
        "data": {
            "objectId": id,
            "type": "0x1::fund_distributor::DistributionEvent",
            "content": {
                "dataType": "moveObject",
                "fields": {
                    "name": "Payroll".as_bytes(),
                    "creator": creator,
                    "total_deposited": deposited.to_string(),
                    "recipients": [ALICE, BOB],
                    "is_active": active,
                    "created_at": "1700000000000"
                }
            }
        }
    })
}
