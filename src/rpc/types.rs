//! Types for JSON-RPC communication with a Sui full node.
//!
//! Covers the subset of the Sui read API used by the dashboard:
//! `suix_queryEvents`, `sui_getObject` and `suix_getOwnedObjects`.

use serde::{Deserialize, Serialize};

/// JSON-RPC 2.0 request structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: serde_json::Value, id: u64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Build a `suix_queryEvents` request for one Move event type
    ///
    /// # Arguments
    /// * `event_type` - Fully qualified `package::module::Struct`
    /// * `limit` - Page size
    /// * `order` - Newest-first or oldest-first
    /// * `id` - Request ID (for response correlation)
    pub fn query_events(event_type: &str, limit: usize, order: EventOrder, id: u64) -> Self {
        Self::new(
            "suix_queryEvents",
            serde_json::json!([
                { "MoveEventType": event_type },
                null,
                limit,
                order == EventOrder::Descending
            ]),
            id,
        )
    }

    /// Build a `sui_getObject` request with content and type shown
    pub fn get_object(object_id: &str, id: u64) -> Self {
        Self::new(
            "sui_getObject",
            serde_json::json!([
                object_id,
                { "showContent": true, "showType": true }
            ]),
            id,
        )
    }

    /// Build a `suix_getOwnedObjects` request filtered by struct type
    pub fn get_owned_objects(owner: &str, struct_type: &str, id: u64) -> Self {
        Self::new(
            "suix_getOwnedObjects",
            serde_json::json!([
                owner,
                {
                    "filter": { "StructType": struct_type },
                    "options": { "showContent": true, "showType": true }
                },
                null,
                null
            ]),
            id,
        )
    }
}

/// JSON-RPC 2.0 response structure
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: u64,
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Sort order for event queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrder {
    Ascending,
    Descending,
}

/// Event identifier (transaction digest + sequence within it)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventId {
    pub tx_digest: String,
    #[serde(default)]
    pub event_seq: String,
}

/// Raw event record as returned by `suix_queryEvents`
///
/// `parsed_json` is kept opaque; the parser decodes it into a
/// `DistributionEvent` and tolerates missing or malformed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: EventId,
    #[serde(default)]
    pub package_id: Option<String>,
    #[serde(default)]
    pub transaction_module: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub parsed_json: serde_json::Value,
    #[serde(default)]
    pub timestamp_ms: Option<String>,
}

/// One page of results (events or owned objects)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<serde_json::Value>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Response wrapper of `sui_getObject` and owned object entries
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectData>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

/// Object data with content shown
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub content: Option<ObjectContent>,
}

/// Parsed object content; only Move objects carry typed fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectContent {
    pub data_type: String,
    #[serde(default)]
    pub fields: serde_json::Value,
}
