//! The Pruv testnet chain descriptor.

use serde::{Deserialize, Serialize};

/// Pruv testnet chain id.
pub const PRUV_TESTNET_CHAIN_ID: u64 = 7336;

/// Pruv testnet chain id as the hex quantity wallets expect.
pub const PRUV_TESTNET_CHAIN_ID_HEX: &str = "0x1ca8";

/// Chain name registered with the wallet.
pub const PRUV_TESTNET_NAME: &str = "pruvtest";

/// Native currency metadata of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Currency name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimals of the native currency.
    pub decimals: u8,
}

/// Everything a wallet needs to register an unknown network.
///
/// Serializes to the `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Hex chain id (`0x`-prefixed).
    pub chain_id: String,
    /// Display name.
    pub chain_name: String,
    /// Native currency.
    pub native_currency: NativeCurrency,
    /// RPC endpoints.
    pub rpc_urls: Vec<String>,
    /// Block explorer URLs.
    pub block_explorer_urls: Vec<String>,
}

impl ChainDescriptor {
    /// The Pruv testnet descriptor with the configured endpoints.
    ///
    /// Endpoints are passed through as given, including empty strings.
    #[must_use]
    pub fn pruv_testnet(rpc_url: impl Into<String>, block_explorer_url: impl Into<String>) -> Self {
        Self {
            chain_id: PRUV_TESTNET_CHAIN_ID_HEX.to_string(),
            chain_name: PRUV_TESTNET_NAME.to_string(),
            native_currency: NativeCurrency {
                name: "MockRWAToken".to_string(),
                symbol: "MOCKRWA".to_string(),
                decimals: 18,
            },
            rpc_urls: vec![rpc_url.into()],
            block_explorer_urls: vec![block_explorer_url.into()],
        }
    }
}
