//! HTTP client for communicating with a Sui full node RPC endpoint.

use super::types::{
    EventOrder, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ObjectResponse, Page, RawEvent,
};
use crate::utils::config::DEFAULT_RPC_TIMEOUT;
use crate::utils::error::RpcError;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};

/// Read side of the chain, as seen by the aggregator
///
/// `RpcClient` is the production implementation; tests plug in
/// in-memory fakes.
pub trait ChainReader: Send + Sync {
    /// Query events of one Move event type
    fn query_events(
        &self,
        event_type: &str,
        limit: usize,
        order: EventOrder,
    ) -> Result<Vec<RawEvent>, RpcError>;

    /// Fetch one object with its typed fields
    fn get_object(&self, object_id: &str) -> Result<ObjectResponse, RpcError>;

    /// List objects of a struct type owned by an address
    fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
    ) -> Result<Vec<ObjectResponse>, RpcError>;
}

/// RPC client for reading events and objects from a Sui full node
pub struct RpcClient {
    client: Client,
    rpc_url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client
    pub fn new(rpc_url: impl Into<String>) -> Result<Self, RpcError> {
        let client = Client::builder()
            .timeout(DEFAULT_RPC_TIMEOUT)
            .build()
            .map_err(RpcError::RequestFailed)?;

        Ok(Self {
            client,
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn request_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Send one JSON-RPC request and decode its result
    fn call<T: DeserializeOwned>(&self, request: JsonRpcRequest) -> Result<T, RpcError> {
        debug!("RPC request: {:?}", request);

        let method = request.method.clone();

        // Make HTTP POST request
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .map_err(RpcError::RequestFailed)?;

        // Check HTTP status
        if !response.status().is_success() {
            return Err(RpcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let body = response.text().map_err(RpcError::RequestFailed)?;
        decode_response(&body, &method)
    }
}

/// Decode a JSON-RPC envelope into its result, or its mapped error
fn decode_response<T: DeserializeOwned>(body: &str, method: &str) -> Result<T, RpcError> {
    let rpc_response: JsonRpcResponse<T> = serde_json::from_str(body)
        .map_err(|e| RpcError::InvalidResponse(format!("Malformed envelope: {}", e)))?;

    if let Some(error) = rpc_response.error {
        return Err(map_rpc_error(error, method));
    }

    rpc_response
        .result
        .ok_or_else(|| RpcError::InvalidResponse("Missing result field".to_string()))
}

impl ChainReader for RpcClient {
    fn query_events(
        &self,
        event_type: &str,
        limit: usize,
        order: EventOrder,
    ) -> Result<Vec<RawEvent>, RpcError> {
        info!("Querying up to {} events of type {}", limit, event_type);

        let request = JsonRpcRequest::query_events(event_type, limit, order, self.request_id());
        let page: Page<RawEvent> = self.call(request)?;

        debug!(
            "Received {} events (more available: {})",
            page.data.len(),
            page.has_next_page
        );

        Ok(page.data)
    }

    fn get_object(&self, object_id: &str) -> Result<ObjectResponse, RpcError> {
        debug!("Fetching object {}", object_id);

        let request = JsonRpcRequest::get_object(object_id, self.request_id());
        let response: ObjectResponse = self.call(request)?;

        if response.data.is_none() {
            if let Some(error) = &response.error {
                debug!("Object lookup error for {}: {}", object_id, error);
                return Err(RpcError::ObjectNotFound(object_id.to_string()));
            }
        }

        Ok(response)
    }

    fn get_owned_objects(
        &self,
        owner: &str,
        struct_type: &str,
    ) -> Result<Vec<ObjectResponse>, RpcError> {
        info!("Listing {} objects owned by {}", struct_type, owner);

        let request = JsonRpcRequest::get_owned_objects(owner, struct_type, self.request_id());
        let page: Page<ObjectResponse> = self.call(request)?;

        Ok(page.data)
    }
}

/// Map JSON-RPC error to our error type
fn map_rpc_error(error: JsonRpcError, method: &str) -> RpcError {
    match error.code {
        -32601 => RpcError::MethodNotSupported(method.to_string()),
        _ => RpcError::InvalidResponse(format!("{}: {}", error.code, error.message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_rpc_error() {
        let err = map_rpc_error(
            JsonRpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: None,
            },
            "suix_queryEvents",
        );
        assert!(matches!(err, RpcError::MethodNotSupported(m) if m == "suix_queryEvents"));

        let err = map_rpc_error(
            JsonRpcError {
                code: -32602,
                message: "Invalid params".to_string(),
                data: None,
            },
            "sui_getObject",
        );
        assert_eq!(err.to_string(), "Invalid RPC response: -32602: Invalid params");
    }

    #[test]
    fn test_decode_events_page() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": 7,
            "result": {
                "data": [{
                    "id": { "txDigest": "Dg1", "eventSeq": "0" },
                    "parsedJson": { "distributor": "0xa", "recipients": ["0xb"] },
                    "timestampMs": "1700000000000"
                }],
                "nextCursor": null,
                "hasNextPage": false
            }
        }"#;

        let page: Page<RawEvent> = decode_response(body, "suix_queryEvents").unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(!page.has_next_page);
    }

    #[test]
    fn test_decode_error_and_missing_result() {
        let err = decode_response::<Page<RawEvent>>(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"Method not found"}}"#,
            "suix_queryEvents",
        )
        .unwrap_err();
        assert!(matches!(err, RpcError::MethodNotSupported(_)));

        let err = decode_response::<Page<RawEvent>>(r#"{"jsonrpc":"2.0","id":1}"#, "suix_queryEvents")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid RPC response: Missing result field");

        assert!(decode_response::<Page<RawEvent>>("not json", "suix_queryEvents").is_err());
    }

    #[test]
    fn test_request_ids_increase() {
        let client = RpcClient::new("http://localhost:9000").unwrap();
        let first = client.request_id();
        let second = client.request_id();
        assert!(second > first);
        assert_eq!(client.rpc_url(), "http://localhost:9000");
    }
}
