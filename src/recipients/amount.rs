//! SUI amount parsing (decimal SUI string -> MIST).

use crate::utils::config::SUI_DECIMALS;
use crate::utils::error::InputError;

/// Parse a positive decimal SUI amount into MIST
///
/// Digits past the ninth decimal place are truncated, matching how
/// wallets floor fractional MIST.
///
/// # Errors
/// * `InputError::InvalidAmount` - not a number, negative, zero, or overflowing
pub fn parse_sui_amount(text: &str) -> Result<u64, InputError> {
    let trimmed = text.trim();
    let invalid = || InputError::InvalidAmount(trimmed.to_string());

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    let mut fraction: String = fraction.chars().take(SUI_DECIMALS).collect();
    while fraction.len() < SUI_DECIMALS {
        fraction.push('0');
    }
    let fraction: u64 = fraction.parse().map_err(|_| invalid())?;

    let mist = whole
        .checked_mul(crate::utils::config::MIST_PER_SUI)
        .and_then(|m| m.checked_add(fraction))
        .ok_or_else(invalid)?;

    if mist == 0 {
        return Err(invalid());
    }

    Ok(mist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(parse_sui_amount("1").unwrap(), 1_000_000_000);
        assert_eq!(parse_sui_amount("1.5").unwrap(), 1_500_000_000);
        assert_eq!(parse_sui_amount(" .25 ").unwrap(), 250_000_000);
        assert_eq!(parse_sui_amount("0.000000001").unwrap(), 1);
        assert_eq!(parse_sui_amount("2.").unwrap(), 2_000_000_000);
    }

    #[test]
    fn test_extra_decimals_truncate() {
        assert_eq!(parse_sui_amount("0.0000000019").unwrap(), 1);
        assert!(parse_sui_amount("0.0000000001").is_err());
    }

    #[test]
    fn test_rejects_non_positive_and_garbage() {
        for bad in ["", "0", "0.0", "-1", "abc", "1e9", "1.2.3", ".", "99999999999999999999"] {
            assert!(parse_sui_amount(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
