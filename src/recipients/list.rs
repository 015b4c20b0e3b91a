//! Recipient lists from pasted text and CSV uploads.

use super::address::validate_sui_address;
use super::amount::parse_sui_amount;
use crate::utils::error::InputError;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::Serialize;

/// One recipient entry as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientRow {
    pub address: String,

    /// Optional per-recipient SUI amount (custom airdrops)
    pub amount: Option<String>,

    pub is_valid: bool,
}

impl RecipientRow {
    pub fn new(address: impl Into<String>, amount: Option<String>) -> Self {
        let address = address.into();
        let is_valid = validate_sui_address(&address);
        Self {
            address,
            amount,
            is_valid,
        }
    }
}

/// Parse pasted addresses: one per line and/or comma separated
///
/// Every non-empty entry is kept and flagged valid or invalid so the
/// caller can show which ones to fix.
pub fn parse_recipient_list(text: &str) -> Vec<RecipientRow> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| RecipientRow::new(part, None))
        .collect()
}

/// Parse an uploaded CSV: address in column 0, optional amount in column 1
///
/// Empty rows are dropped. The first row is treated as a header when any
/// of its cells mentions "address" or "amount".
///
/// # Errors
/// * `InputError::EmptyCsv` - no non-empty rows
/// * `InputError::NoAddresses` - no row carries an address
/// * `InputError::MalformedCsv` - the CSV reader failed
pub fn parse_recipient_csv(text: &str) -> Result<Vec<RecipientRow>, InputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| InputError::MalformedCsv(e.to_string()))?;
        if record.iter().any(|cell| !cell.is_empty()) {
            rows.push(record.iter().map(str::to_string).collect());
        }
    }

    if rows.is_empty() {
        return Err(InputError::EmptyCsv);
    }

    let has_header = rows[0].iter().any(|cell| {
        let cell = cell.to_lowercase();
        cell.contains("address") || cell.contains("amount")
    });
    let start = usize::from(has_header);

    let recipients: Vec<RecipientRow> = rows[start..]
        .iter()
        .filter(|row| row.first().is_some_and(|a| !a.is_empty()))
        .map(|row| {
            let amount = row.get(1).filter(|a| !a.is_empty()).cloned();
            RecipientRow::new(row[0].clone(), amount)
        })
        .collect();

    if recipients.is_empty() {
        return Err(InputError::NoAddresses);
    }

    debug!(
        "Parsed {} recipients from CSV (header: {})",
        recipients.len(),
        has_header
    );

    Ok(recipients)
}

/// Addresses of a list that is ready to submit
///
/// # Errors
/// * `InputError::EmptyRecipients` - nothing entered
/// * `InputError::InvalidAddresses` - some entries are not Sui addresses
pub fn valid_addresses(rows: &[RecipientRow]) -> Result<Vec<String>, InputError> {
    if rows.is_empty() {
        return Err(InputError::EmptyRecipients);
    }

    let invalid = rows.iter().filter(|r| !r.is_valid).count();
    if invalid > 0 {
        return Err(InputError::InvalidAddresses(invalid));
    }

    Ok(rows.iter().map(|r| r.address.trim().to_string()).collect())
}

/// Per-recipient amounts in MIST, if the list carries any
///
/// Returns `Ok(None)` when no row has an amount (equal split).
///
/// # Errors
/// * `InputError::AmountCountMismatch` - only some rows have amounts
/// * `InputError::InvalidAmount` - an amount does not parse
pub fn row_amounts(rows: &[RecipientRow]) -> Result<Option<Vec<u64>>, InputError> {
    let with_amount = rows.iter().filter(|r| r.amount.is_some()).count();
    if with_amount == 0 {
        return Ok(None);
    }
    if with_amount != rows.len() {
        return Err(InputError::AmountCountMismatch {
            recipients: rows.len(),
            amounts: with_amount,
        });
    }

    rows.iter()
        .map(|r| parse_sui_amount(r.amount.as_deref().unwrap_or_default()))
        .collect::<Result<Vec<u64>, InputError>>()
        .map(Some)
}

/// Downloadable CSV template
pub fn csv_template() -> &'static str {
    "wallet_address
0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef
0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890
0x9876543210fedcba9876543210fedcba9876543210fedcba9876543210fedcba
"
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";
    const B: &str = "0xabcdef1234567890abcdef1234567890abcdef1234567890abcdef1234567890";

    #[test]
    fn test_parse_recipient_list_mixed_separators() {
        let text = format!("{}, {}\n\n  nope  \n", A, B);
        let rows = parse_recipient_list(&text);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_valid);
        assert!(rows[1].is_valid);
        assert_eq!(rows[2].address, "nope");
        assert!(!rows[2].is_valid);
    }

    #[test]
    fn test_csv_with_header_and_amounts() {
        let text = format!("address,amount\n{},1.5\n,\n{},2\n", A, B);
        let rows = parse_recipient_csv(&text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, A);
        assert_eq!(rows[0].amount.as_deref(), Some("1.5"));
        assert_eq!(
            row_amounts(&rows).unwrap(),
            Some(vec![1_500_000_000, 2_000_000_000])
        );
    }

    #[test]
    fn test_csv_without_header() {
        let text = format!("{}\n{}\n", A, B);
        let rows = parse_recipient_csv(&text).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(row_amounts(&rows).unwrap(), None);
        assert_eq!(valid_addresses(&rows).unwrap(), vec![A, B]);
    }

    #[test]
    fn test_csv_errors() {
        assert_eq!(parse_recipient_csv("\n\n"), Err(InputError::EmptyCsv));
        assert_eq!(parse_recipient_csv("wallet_address\n"), Err(InputError::NoAddresses));
    }

    #[test]
    fn test_template_parses() {
        let rows = parse_recipient_csv(csv_template()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.is_valid));
    }

    #[test]
    fn test_valid_addresses_reports_invalid_count() {
        let rows = parse_recipient_list(&format!("{}\nbad1\nbad2", A));
        assert_eq!(valid_addresses(&rows), Err(InputError::InvalidAddresses(2)));
        assert_eq!(valid_addresses(&[]), Err(InputError::EmptyRecipients));
    }

    #[test]
    fn test_partial_amounts_rejected() {
        let rows = vec![
            RecipientRow::new(A, Some("1".to_string())),
            RecipientRow::new(B, None),
        ];
        assert_eq!(
            row_amounts(&rows),
            Err(InputError::AmountCountMismatch { recipients: 2, amounts: 1 })
        );
    }
}
