//! Configuration and constants for the CLI.
//!
//! Deployment addresses and protocol constants live here as defaults.
//! A TOML settings file can override the ones that vary per network.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default timeout for RPC requests
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Public Sui testnet full node
pub const DEFAULT_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";

/// Current snapshot schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// 1 SUI = 10^9 MIST; every on-chain amount is in MIST
pub const MIST_PER_SUI: u64 = 1_000_000_000;
pub const SUI_DECIMALS: usize = 9;

/// Fund distributor deployment (testnet, emits InstantDistribution)
pub const DEFAULT_PACKAGE_ID: &str =
    "0xb3aae90f6f074bb83d8b42ad52d6bb12c71fa0696ab8e0d783cb709542c515de";
pub const DEFAULT_MODULE_NAME: &str = "fund_distributor";

/// Splitter deployment (mainnet) used by equal-split and airdrop calls
pub const DEFAULT_SPLITTER_PACKAGE_ID: &str =
    "0x0b06ccbf49c99410c3f1584cebaaf1e027c73f5407e1608804d7a2c23bb9bea1";
pub const DEFAULT_SPLITTER_OBJECT_ID: &str =
    "0x3b2dc3d948be777433677be129102a1cde8d9410b555127043f1779e7cb77b27";
pub const SPLITTER_MODULE_NAME: &str = "splitter";
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

// Move struct names emitted / owned by the fund distributor module
pub const DISTRIBUTION_EVENT_TYPE: &str = "InstantDistribution";
pub const DISTRIBUTION_OBJECT_TYPE: &str = "DistributionEvent";

/// Dashboard window: most recent N events
pub const HISTORY_LIMIT: usize = 50;

/// Background refresh cadence for `watch`
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Recipient ticker length
pub const FEED_LIMIT: usize = 50;

/// Hex digits in a Sui address (32 bytes)
pub const ADDRESS_HEX_LEN: usize = 64;

pub const DEFAULT_EXPLORER_URL: &str = "https://testnet.suivision.xyz/txblock";

/// Runtime settings, optionally loaded from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rpc_url: String,
    pub package_id: String,
    pub module_name: String,
    pub splitter_package_id: String,
    pub splitter_object_id: String,
    pub history_limit: usize,
    pub poll_interval_secs: u64,
    pub explorer_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            package_id: DEFAULT_PACKAGE_ID.to_string(),
            module_name: DEFAULT_MODULE_NAME.to_string(),
            splitter_package_id: DEFAULT_SPLITTER_PACKAGE_ID.to_string(),
            splitter_object_id: DEFAULT_SPLITTER_OBJECT_ID.to_string(),
            history_limit: HISTORY_LIMIT,
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
        }
    }
}

impl Settings {
    /// Fully qualified Move event type queried for the dashboard
    pub fn distribution_event_type(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package_id, self.module_name, DISTRIBUTION_EVENT_TYPE
        )
    }

    /// Fully qualified struct type of distribution event objects
    pub fn distribution_object_type(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package_id, self.module_name, DISTRIBUTION_OBJECT_TYPE
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn explorer_link(&self, digest: &str) -> String {
        format!("{}/{}", self.explorer_url.trim_end_matches('/'), digest)
    }
}

/// Load settings from a TOML file
///
/// Missing keys fall back to the built-in defaults.
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Parse` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let settings = load_settings("sui-split.toml")?;
/// ```
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&contents)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = toml::from_str("history_limit = 10\n").unwrap();
        assert_eq!(settings.history_limit, 10);
        assert_eq!(settings.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(settings.module_name, DEFAULT_MODULE_NAME);
    }

    #[test]
    fn test_event_type_formatting() {
        let settings = Settings {
            package_id: "0xabc".to_string(),
            ..Default::default()
        };
        assert_eq!(
            settings.distribution_event_type(),
            "0xabc::fund_distributor::InstantDistribution"
        );
        assert_eq!(
            settings.distribution_object_type(),
            "0xabc::fund_distributor::DistributionEvent"
        );
    }

    #[test]
    fn test_explorer_link_trims_slash() {
        let settings = Settings {
            explorer_url: "https://example.org/tx/".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.explorer_link("Dg1"), "https://example.org/tx/Dg1");
    }

    #[test]
    fn test_load_settings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sui-split.toml");
        std::fs::write(&path, "rpc_url = \"http://localhost:9000\"\npoll_interval_secs = 5\n")
            .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.rpc_url, "http://localhost:9000");
        assert_eq!(settings.poll_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_settings_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "history_limit = \"many\"").unwrap();

        assert!(matches!(load_settings(&path), Err(ConfigError::Parse(_))));
    }
}
