//! # pruv-faucet
//!
//! Testnet faucet client for the Pruv network.
//!
//! A user supplies a recipient address and confirms they are human; the
//! faucet then mints 10 MockRWATokens to that address through an injected
//! EIP-1193 wallet provider.
//!
//! This crate provides:
//! - Wallet session state with observable updates
//! - Silent and explicit wallet connection
//! - Network assurance (switch, or register the chain if the wallet lacks it)
//! - The mint workflow, from validation to confirmed receipt
//!
//! ## Network Details
//!
//! - **Chain**: `pruvtest`, id 7336 (`0x1ca8`)
//! - **Native currency**: MockRWAToken (MOCKRWA), 18 decimals
//! - **Token**: MockRWAToken, `decimals()` and `mint(address,uint256)`
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pruv_faucet::{Eip1193Provider, Faucet, FaucetConfig};
//!
//! # async fn example(wallet: Arc<dyn Eip1193Provider>) -> pruv_faucet::Result<()> {
//! let config = FaucetConfig::from_env()?;
//! let faucet = Faucet::start(config, Some(wallet)).await;
//!
//! faucet.session().set_candidate_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
//! faucet.session().set_human_verified(true);
//!
//! let tx_hash = faucet.mint_tokens().await?;
//! println!("Minted: {}", faucet.transaction_url(&tx_hash)?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod amount;
pub mod chain;
pub mod config;
pub mod contract;
pub mod error;
pub mod faucet;
pub mod network;
pub mod provider;
pub mod session;
pub mod status;

#[cfg(test)]
mod mock;

pub use address::{is_address, parse_address, Address};
pub use amount::{TokenAmount, DEFAULT_DECIMALS, U256};
pub use chain::{ChainDescriptor, NativeCurrency, PRUV_TESTNET_CHAIN_ID, PRUV_TESTNET_CHAIN_ID_HEX};
pub use config::FaucetConfig;
pub use contract::{MockRwaToken, PendingTransaction};
pub use error::{FaucetError, ProviderError, Result};
pub use faucet::{Faucet, MINT_QUANTITY};
pub use network::ensure_network;
pub use provider::{BrowserProvider, Eip1193Provider, Signer, TransactionReceipt};
pub use session::{SessionState, WalletSession};
pub use status::{StatusKind, TransactionStatus};
