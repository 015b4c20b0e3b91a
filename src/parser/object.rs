//! Decoder for on-chain `DistributionEvent` objects.

use super::distribution::{decode_name, millis_to_datetime, parse_u64_value};
use super::schema::EventDetails;
use crate::rpc::types::ObjectResponse;
use log::debug;
use serde_json::Value;

/// Decode a `sui_getObject` response into event details
///
/// Returns `None` for missing objects and for anything that is not a
/// Move object (packages, deleted objects).
pub fn decode_event_details(response: &ObjectResponse) -> Option<EventDetails> {
    let data = response.data.as_ref()?;
    let content = data.content.as_ref()?;

    if content.data_type != "moveObject" {
        debug!(
            "Object {} is a {}, not a Move object",
            data.object_id, content.data_type
        );
        return None;
    }

    let fields = content.fields.as_object()?;

    Some(EventDetails {
        id: data.object_id.clone(),
        name: fields.get("name").map(decode_name).unwrap_or_default(),
        creator: fields
            .get("creator")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        total_deposited: fields
            .get("total_deposited")
            .map(balance_value)
            .unwrap_or(0),
        recipients: fields
            .get("recipients")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(|r| r.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        is_active: fields
            .get("is_active")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        created_at: fields
            .get("created_at")
            .and_then(|v| parse_u64_value(v).ok())
            .and_then(millis_to_datetime),
    })
}

/// Read a `Balance<SUI>` field
///
/// Nodes render balances either as a bare u64 string or as a nested
/// struct `{ "type": ..., "fields": { "value": "..." } }`.
fn balance_value(value: &Value) -> u64 {
    if let Ok(amount) = parse_u64_value(value) {
        return amount;
    }

    value
        .get("value")
        .or_else(|| value.get("fields").and_then(|f| f.get("value")))
        .and_then(|v| parse_u64_value(v).ok())
        .unwrap_or(0)
}
