//! Utility modules for configuration and error handling.

pub mod config;
pub mod error;

// Re-export commonly used error types for convenience
pub use config::{load_settings, Settings};
pub use error::{
    ConfigError, FetchError, InputError, OutputError, ParseError, RpcError, WalletError,
};
