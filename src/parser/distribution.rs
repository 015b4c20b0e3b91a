//! Decoder for `InstantDistribution` event payloads.
//!
//! Turns the opaque `parsedJson` of a raw event into a `DistributionEvent`.
//! Amount fields are forgiving: malformed or missing values are zero-filled.
//! Identity fields are strict: an event without a distributor or without
//! recipients is skipped.

use super::schema::DistributionEvent;
use crate::rpc::types::RawEvent;
use crate::utils::error::ParseError;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

/// Decode a window of raw events, skipping the ones that fail
///
/// **Public** - main entry point used by the aggregator
///
/// # Errors
/// * `ParseError::InvalidFormat` - every event in a non-empty window failed
pub fn decode_distribution_events(raw_events: &[RawEvent]) -> Result<Vec<DistributionEvent>, ParseError> {
    let mut events = Vec::with_capacity(raw_events.len());

    for (index, raw) in raw_events.iter().enumerate() {
        match decode_distribution_event(raw) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - one bad event must not hide the window
                warn!("Skipping event {} ({}): {}", index, raw.id.tx_digest, e);
            }
        }
    }

    if events.is_empty() && !raw_events.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All distribution events failed to decode".to_string(),
        ));
    }

    debug!("Decoded {}/{} distribution events", events.len(), raw_events.len());

    Ok(events)
}

/// Decode one raw event
///
/// # Errors
/// * `ParseError::InvalidFormat` - payload is not an object or recipients are empty
/// * `ParseError::MissingField` - distributor or recipients absent
pub fn decode_distribution_event(raw: &RawEvent) -> Result<DistributionEvent, ParseError> {
    let payload = raw.parsed_json.as_object().ok_or_else(|| {
        ParseError::InvalidFormat("parsedJson must be a JSON object".to_string())
    })?;

    let distributor = payload
        .get("distributor")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::MissingField("distributor".to_string()))?
        .to_string();

    let recipients: Vec<String> = payload
        .get("recipients")
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::MissingField("recipients".to_string()))?
        .iter()
        .filter_map(|r| r.as_str().map(str::to_string))
        .collect();

    if recipients.is_empty() {
        return Err(ParseError::InvalidFormat(
            "recipients list is empty".to_string(),
        ));
    }

    let event_name = payload
        .get("event_name")
        .map(decode_name)
        .unwrap_or_default();

    let total_amount = amount_or_zero(payload.get("total_amount"), "total_amount", raw);
    let amount_per_recipient =
        amount_or_zero(payload.get("amount_per_recipient"), "amount_per_recipient", raw);

    // Contract timestamp first, node checkpoint timestamp as fallback
    let timestamp = payload
        .get("timestamp")
        .and_then(|v| parse_u64_value(v).ok())
        .or_else(|| raw.timestamp_ms.as_deref().and_then(|s| s.parse().ok()))
        .and_then(millis_to_datetime)
        .unwrap_or_default();

    Ok(DistributionEvent {
        id: raw.id.tx_digest.clone(),
        distributor,
        event_name,
        total_amount,
        recipients,
        amount_per_recipient,
        timestamp,
    })
}

/// Decode a Move `vector<u8>` name (JSON array of bytes) or a plain string
///
/// **Public** - shared with the object decoder
pub fn decode_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(bytes) => {
            let bytes: Vec<u8> = bytes
                .iter()
                .filter_map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect();
            String::from_utf8_lossy(&bytes).into_owned()
        }
        _ => String::new(),
    }
}

/// Parse a u64 from a JSON number or a decimal / hex string
///
/// Sui serialises u64 fields as strings.
pub fn parse_u64_value(value: &Value) -> Result<u64, ParseError> {
    if let Some(n) = value.as_u64() {
        Ok(n)
    } else if let Some(s) = value.as_str() {
        parse_u64_str(s.trim())
    } else {
        Err(ParseError::InvalidFormat(format!(
            "Expected number or string, found {}",
            value
        )))
    }
}

fn parse_u64_str(value: &str) -> Result<u64, ParseError> {
    if let Some(hex_str) = value.strip_prefix("0x") {
        u64::from_str_radix(hex_str, 16)
            .map_err(|e| ParseError::InvalidFormat(format!("Invalid hex amount: {}", e)))
    } else {
        value
            .parse::<u64>()
            .map_err(|e| ParseError::InvalidFormat(format!("Invalid decimal amount: {}", e)))
    }
}

fn amount_or_zero(value: Option<&Value>, field: &str, raw: &RawEvent) -> u64 {
    match value.map(parse_u64_value) {
        Some(Ok(amount)) => amount,
        Some(Err(e)) => {
            warn!(
                "Malformed {} in event {}: {}; using 0",
                field, raw.id.tx_digest, e
            );
            0
        }
        None => {
            warn!("Missing {} in event {}; using 0", field, raw.id.tx_digest);
            0
        }
    }
}

pub(crate) fn millis_to_datetime(millis: u64) -> Option<DateTime<Utc>> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::types::EventId;
    use serde_json::json;

    fn raw(digest: &str, parsed_json: Value) -> RawEvent {
        RawEvent {
            id: EventId {
                tx_digest: digest.to_string(),
                event_seq: "0".to_string(),
            },
            package_id: None,
            transaction_module: None,
            sender: None,
            event_type: None,
            parsed_json,
            timestamp_ms: Some("1700000000000".to_string()),
        }
    }

    #[test]
    fn test_decode_full_event() {
        let raw = raw(
            "Dg1",
            json!({
                "distributor": "0xa",
                "event_name": [104, 105],
                "total_amount": "2000000000",
                "recipients": ["0xb", "0xc"],
                "amount_per_recipient": "1000000000",
                "timestamp": "1700000001000"
            }),
        );

        let event = decode_distribution_event(&raw).unwrap();
        assert_eq!(event.id, "Dg1");
        assert_eq!(event.event_name, "hi");
        assert_eq!(event.total_amount, 2_000_000_000);
        assert_eq!(event.amount_per_recipient, 1_000_000_000);
        assert_eq!(event.recipients, vec!["0xb", "0xc"]);
        assert_eq!(event.timestamp.timestamp_millis(), 1_700_000_001_000);
    }

    #[test]
    fn test_malformed_amount_is_zero_filled() {
        let raw = raw(
            "Dg2",
            json!({
                "distributor": "0xa",
                "total_amount": "lots",
                "recipients": ["0xb"]
            }),
        );

        let event = decode_distribution_event(&raw).unwrap();
        assert_eq!(event.total_amount, 0);
        assert_eq!(event.amount_per_recipient, 0);
        // Falls back to the node timestamp
        assert_eq!(event.timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_missing_recipients_is_rejected() {
        let missing = raw("Dg3", json!({ "distributor": "0xa" }));
        assert!(matches!(
            decode_distribution_event(&missing),
            Err(ParseError::MissingField(f)) if f == "recipients"
        ));

        let empty = raw("Dg4", json!({ "distributor": "0xa", "recipients": [] }));
        assert!(decode_distribution_event(&empty).is_err());
    }

    #[test]
    fn test_window_skips_bad_events() {
        let events = vec![
            raw("ok", json!({ "distributor": "0xa", "recipients": ["0xb"] })),
            raw("bad", json!("not an object")),
        ];

        let decoded = decode_distribution_events(&events).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, "ok");
    }

    #[test]
    fn test_window_all_bad_is_error() {
        let events = vec![raw("bad", json!(null))];
        assert!(decode_distribution_events(&events).is_err());
        assert!(decode_distribution_events(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_parse_u64_value() {
        assert_eq!(parse_u64_value(&json!(5)).unwrap(), 5);
        assert_eq!(parse_u64_value(&json!("42")).unwrap(), 42);
        assert_eq!(parse_u64_value(&json!("0x10")).unwrap(), 16);
        assert!(parse_u64_value(&json!(-1)).is_err());
        assert!(parse_u64_value(&json!(true)).is_err());
    }

    #[test]
    fn test_decode_name() {
        assert_eq!(decode_name(&json!("plain")), "plain");
        assert_eq!(decode_name(&json!([0x53, 0x55, 0x49])), "SUI");
        assert_eq!(decode_name(&json!(7)), "");
    }
}
