//! Faucet configuration.
//!
//! Values come from the environment:
//! - `PRUV_FAUCET_CONTRACT_ADDRESS` - MockRWAToken contract (default: zero address)
//! - `PRUV_FAUCET_RPC_URL` - RPC endpoint registered with the wallet (default: empty)
//! - `PRUV_FAUCET_BLOCK_EXPLORER_URL` - explorer registered with the wallet (default: empty)
//! - `PRUV_FAUCET_RECEIPT_POLL_MS` - receipt polling interval (default: 4000)

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::address::{parse_address, Address};
use crate::chain::ChainDescriptor;
use crate::error::{FaucetError, Result};

/// Environment variable holding the contract address.
pub const ENV_CONTRACT_ADDRESS: &str = "PRUV_FAUCET_CONTRACT_ADDRESS";
/// Environment variable holding the RPC URL.
pub const ENV_RPC_URL: &str = "PRUV_FAUCET_RPC_URL";
/// Environment variable holding the block explorer URL.
pub const ENV_BLOCK_EXPLORER_URL: &str = "PRUV_FAUCET_BLOCK_EXPLORER_URL";
/// Environment variable holding the receipt polling interval in milliseconds.
pub const ENV_RECEIPT_POLL_MS: &str = "PRUV_FAUCET_RECEIPT_POLL_MS";

/// Explorer used for transaction links when none is configured.
pub const DEFAULT_EXPLORER_URL: &str = "https://explorer.testnet.pruv.network";

/// Default receipt polling interval in milliseconds.
pub const DEFAULT_RECEIPT_POLL_MS: u64 = 4_000;

/// Banner text shown while the contract address is unconfigured.
pub const UNCONFIGURED_CONTRACT_WARNING: &str = "Please update the CONTRACT_ADDRESS in the code \
     with the actual MockRWAToken contract address.";

/// Faucet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetConfig {
    /// MockRWAToken contract address.
    #[serde(default)]
    pub contract_address: Address,
    /// RPC endpoint used when registering the chain.
    #[serde(default)]
    pub rpc_url: String,
    /// Block explorer used when registering the chain.
    #[serde(default)]
    pub block_explorer_url: String,
    /// Interval between receipt polls while awaiting confirmation.
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_interval_ms: u64,
}

const fn default_receipt_poll_ms() -> u64 {
    DEFAULT_RECEIPT_POLL_MS
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            contract_address: Address::ZERO,
            rpc_url: String::new(),
            block_explorer_url: String::new(),
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_MS,
        }
    }
}

impl FaucetConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable holds an invalid value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset and blank values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a set value is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = get(ENV_CONTRACT_ADDRESS) {
            config.contract_address = parse_address(&raw).map_err(|_| {
                FaucetError::config(format!("{ENV_CONTRACT_ADDRESS} is not a valid address: '{raw}'"))
            })?;
        }
        if let Some(url) = get(ENV_RPC_URL) {
            config.rpc_url = url;
        }
        if let Some(url) = get(ENV_BLOCK_EXPLORER_URL) {
            config.block_explorer_url = url;
        }
        if let Some(raw) = get(ENV_RECEIPT_POLL_MS) {
            config.receipt_poll_interval_ms = raw.parse().map_err(|_| {
                FaucetError::config(format!("{ENV_RECEIPT_POLL_MS} must be an integer, got '{raw}'"))
            })?;
        }

        config.validate()?;
        debug!(
            contract = %config.contract_address,
            configured = config.is_contract_configured(),
            "loaded faucet configuration"
        );
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.receipt_poll_interval_ms == 0 {
            return Err(FaucetError::config(
                "receipt_poll_interval_ms must be greater than 0",
            ));
        }
        for (name, url) in [
            ("rpc_url", &self.rpc_url),
            ("block_explorer_url", &self.block_explorer_url),
        ] {
            if !url.is_empty() {
                parse_http_url(name, url)?;
            }
        }
        Ok(())
    }

    /// Set the contract address.
    #[must_use]
    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = address;
        self
    }

    /// Set the RPC URL.
    #[must_use]
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    /// Set the block explorer URL.
    #[must_use]
    pub fn with_block_explorer_url(mut self, url: impl Into<String>) -> Self {
        self.block_explorer_url = url.into();
        self
    }

    /// Set the receipt polling interval.
    #[must_use]
    pub fn with_receipt_poll_interval(mut self, interval: Duration) -> Self {
        self.receipt_poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// False while the contract address is still the zero address.
    #[must_use]
    pub fn is_contract_configured(&self) -> bool {
        !self.contract_address.is_zero()
    }

    /// Receipt polling interval.
    #[must_use]
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    /// The chain descriptor registered with the wallet.
    #[must_use]
    pub fn chain(&self) -> ChainDescriptor {
        ChainDescriptor::pruv_testnet(self.rpc_url.clone(), self.block_explorer_url.clone())
    }

    /// Explorer link for a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured explorer URL is invalid or the
    /// hash does not form a valid path segment.
    pub fn transaction_url(&self, tx_hash: &str) -> Result<Url> {
        let raw = if self.block_explorer_url.is_empty() {
            DEFAULT_EXPLORER_URL
        } else {
            self.block_explorer_url.as_str()
        };
        let mut base = parse_http_url("block_explorer_url", raw)?;
        // join() replaces the last segment unless the base path ends in '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(&format!("tx/{tx_hash}"))
            .map_err(|e| FaucetError::config(format!("invalid transaction link for '{tx_hash}': {e}")))
    }
}

/// Parse an absolute http(s) URL with a host.
fn parse_http_url(name: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| FaucetError::config(format!("{name} is not a valid URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FaucetError::config(format!(
            "{name} must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if url.host_str().filter(|host| !host.is_empty()).is_none() {
        return Err(FaucetError::config(format!("{name} has no host: '{raw}'")));
    }
    Ok(url)
}
