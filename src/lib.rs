//! Sui Split Studio
//!
//! Distribution statistics and contract calls for the Sui fund
//! distributor and splitter packages.
//!
//! This crate provides the core implementation for the
//! `sui-split` CLI tool: history fetches over the Sui JSON-RPC read API,
//! global and per-viewer aggregation, a stale-request-safe live
//! dashboard, recipient list parsing, and transaction intents for an
//! external signer.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install sui-split-studio
//! sui-split stats --mode all
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod poller;
pub mod recipients;
pub mod rpc;
pub mod transaction;
pub mod utils;
pub mod wallet;
