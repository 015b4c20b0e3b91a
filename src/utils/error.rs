//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur during RPC communication
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Method not supported by this RPC endpoint: {0}")]
    MethodNotSupported(String),
}

/// Errors that can occur while decoding chain payloads
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid payload format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from one dashboard fetch cycle
#[derive(Error, Debug)]
pub enum FetchError {
    /// Superseded by a newer request; never surfaced
    #[error("Request cancelled")]
    Cancelled,

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Invalid user input; blocks submission until re-edited
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid Sui address: {0}")]
    InvalidAddress(String),

    #[error("{0} invalid address(es) found")]
    InvalidAddresses(usize),

    #[error("Please enter a valid amount greater than 0 (got '{0}')")]
    InvalidAmount(String),

    #[error("Please add at least one recipient")]
    EmptyRecipients,

    #[error("Event name is required")]
    EmptyName,

    #[error("Amount list has {amounts} entries but there are {recipients} recipients")]
    AmountCountMismatch { recipients: usize, amounts: usize },

    #[error("Amounts sum to {required} MIST but only {available} MIST is provided")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("CSV file is empty or contains no valid data")]
    EmptyCsv,

    #[error("No valid addresses found in the CSV file")]
    NoAddresses,

    #[error("Failed to parse CSV file: {0}")]
    MalformedCsv(String),
}

/// Wallet / signing provider failures
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet not connected")]
    NotConnected,

    #[error("No signer configured; use --signer-cmd or write the intent with --out")]
    NoSigner,

    #[error("Transaction rejected by signer: {0}")]
    Rejected(String),

    #[error("Invalid signer output: {0}")]
    InvalidOutput(String),

    #[error("Signer I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode transaction intent: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors loading the settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}
