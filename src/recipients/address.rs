//! Sui address validation and display.

use crate::utils::config::ADDRESS_HEX_LEN;
use crate::utils::error::InputError;

/// Check for `0x` followed by exactly 64 hex digits (surrounding whitespace ignored)
pub fn validate_sui_address(address: &str) -> bool {
    address
        .trim()
        .strip_prefix("0x")
        .map(|hex| hex.len() == ADDRESS_HEX_LEN && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

/// Validate and return the trimmed address
pub fn require_sui_address(address: &str) -> Result<String, InputError> {
    if validate_sui_address(address) {
        Ok(address.trim().to_string())
    } else {
        Err(InputError::InvalidAddress(address.trim().to_string()))
    }
}

/// Validate and lowercase, matching how the node renders addresses
pub fn normalize_sui_address(address: &str) -> Result<String, InputError> {
    require_sui_address(address).map(|a| a.to_ascii_lowercase())
}

/// Shorten an address for display: `0x1234...abcd`
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

    #[test]
    fn test_validate_sui_address() {
        assert!(validate_sui_address(VALID));
        assert!(validate_sui_address(&format!("  {}  ", VALID)));
        assert!(validate_sui_address(&VALID.to_uppercase().replace("0X", "0x")));
        assert!(!validate_sui_address(&VALID[2..]));
        assert!(!validate_sui_address("0x1234"));
        assert!(!validate_sui_address(&VALID.replace('a', "g")));
        assert!(!validate_sui_address(""));
    }

    #[test]
    fn test_require_sui_address() {
        assert_eq!(require_sui_address(&format!(" {}\n", VALID)).unwrap(), VALID);
        assert_eq!(
            require_sui_address("0xnope"),
            Err(InputError::InvalidAddress("0xnope".to_string()))
        );
    }

    #[test]
    fn test_normalize_sui_address() {
        let mixed = VALID.to_uppercase().replace("0X", "0x");
        assert_eq!(normalize_sui_address(&mixed).unwrap(), VALID);
        assert!(normalize_sui_address("0xAA").is_err());
    }

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address(VALID), "0x1234...cdef");
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }
}
