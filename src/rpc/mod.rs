//! RPC client for the Sui full node read API.

pub mod client;
pub mod types;

// Re-export main types
pub use client::{ChainReader, RpcClient};
pub use types::{EventOrder, ObjectResponse, RawEvent};
