//! Recipient input: address validation, list and CSV parsing, amounts.

pub mod address;
pub mod amount;
pub mod list;

pub use address::{
    normalize_sui_address, require_sui_address, shorten_address, validate_sui_address,
};
pub use amount::parse_sui_amount;
pub use list::{
    csv_template, parse_recipient_csv, parse_recipient_list, row_amounts, valid_addresses,
    RecipientRow,
};
