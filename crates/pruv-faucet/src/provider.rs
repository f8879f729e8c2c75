//! Injected wallet provider.
//!
//! The only seam to the browser wallet is [`Eip1193Provider::request`].
//! [`BrowserProvider`] builds the account, chain and transaction
//! capabilities the faucet needs on top of it.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use alloy_primitives::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::address::{parse_address, Address};
use crate::chain::ChainDescriptor;
use crate::error::{ProviderError, SERVER_ERROR};

/// An EIP-1193 provider, such as the object a wallet extension injects.
pub trait Eip1193Provider: Send + Sync + fmt::Debug {
    /// Send a JSON-RPC request through the wallet.
    ///
    /// # Errors
    ///
    /// Returns the wallet's error object if the request is rejected or fails.
    fn request<'a>(
        &'a self,
        method: &'a str,
        params: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Value, ProviderError>> + Send + 'a>>;
}

/// A mined transaction receipt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Hash of the transaction.
    pub transaction_hash: String,
    /// Block the transaction was included in.
    #[serde(default)]
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` on revert.
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Check if the transaction reverted.
    #[must_use]
    pub fn is_reverted(&self) -> bool {
        matches!(self.status.as_deref(), Some("0x0" | "0x00"))
    }
}

/// Typed access to an injected provider.
#[derive(Clone)]
pub struct BrowserProvider {
    inner: Arc<dyn Eip1193Provider>,
}

impl BrowserProvider {
    /// Wrap an injected provider.
    #[must_use]
    pub fn new(inner: Arc<dyn Eip1193Provider>) -> Self {
        Self { inner }
    }

    async fn send<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ProviderError> {
        debug!(method, "provider request");
        let value = self.inner.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| {
            ProviderError::internal(format!("malformed {method} response: {e}"))
        })
    }

    /// Accounts the wallet exposes to this page.
    ///
    /// With `silent` set, only already-authorized accounts are returned and
    /// the user is never prompted. Otherwise the wallet may prompt, and the
    /// user may reject.
    pub async fn request_accounts(&self, silent: bool) -> Result<Vec<String>, ProviderError> {
        let method = if silent {
            "eth_accounts"
        } else {
            "eth_requestAccounts"
        };
        self.send(method, json!([])).await
    }

    /// Ask the wallet to switch to `chain_id`.
    pub async fn switch_chain(&self, chain_id: &str) -> Result<(), ProviderError> {
        let _: Value = self
            .send("wallet_switchEthereumChain", json!([{ "chainId": chain_id }]))
            .await?;
        Ok(())
    }

    /// Ask the wallet to register (and activate) a chain.
    pub async fn add_chain(&self, chain: &ChainDescriptor) -> Result<(), ProviderError> {
        let _: Value = self
            .send("wallet_addEthereumChain", json!([chain]))
            .await?;
        Ok(())
    }

    /// A signer bound to the wallet's first account.
    ///
    /// Prompts for authorization only if no account is exposed yet.
    pub async fn get_signer(&self) -> Result<Signer, ProviderError> {
        let mut accounts = self.request_accounts(true).await?;
        if accounts.is_empty() {
            accounts = self.request_accounts(false).await?;
        }
        let account = accounts
            .first()
            .ok_or_else(|| ProviderError::internal("wallet returned no accounts"))?;
        let address = parse_address(account).map_err(|_| {
            ProviderError::internal(format!("wallet returned an invalid account: {account}"))
        })?;
        Ok(Signer {
            provider: self.clone(),
            address,
        })
    }

    /// Execute a read-only contract call against the latest block.
    pub async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, ProviderError> {
        let result: Bytes = self
            .send(
                "eth_call",
                json!([{ "to": to.to_checksum(None), "data": Bytes::copy_from_slice(data) }, "latest"]),
            )
            .await?;
        Ok(result.to_vec())
    }

    /// Fetch a receipt; `None` while the transaction is pending.
    pub async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> Result<Option<TransactionReceipt>, ProviderError> {
        self.send("eth_getTransactionReceipt", json!([tx_hash])).await
    }
}

impl fmt::Debug for BrowserProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserProvider")
            .field("inner", &self.inner)
            .finish()
    }
}

/// An account able to authorize transactions through the wallet.
#[derive(Debug, Clone)]
pub struct Signer {
    provider: BrowserProvider,
    address: Address,
}

impl Signer {
    /// The signing account.
    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    /// The provider this signer sends through.
    #[must_use]
    pub const fn provider(&self) -> &BrowserProvider {
        &self.provider
    }

    /// Send a transaction; the wallet prompts the user to approve it.
    ///
    /// Returns the transaction hash.
    pub async fn send_transaction(&self, to: &Address, data: &[u8]) -> Result<String, ProviderError> {
        let hash: String = self
            .provider
            .send(
                "eth_sendTransaction",
                json!([{
                    "from": self.address.to_checksum(None),
                    "to": to.to_checksum(None),
                    "data": Bytes::copy_from_slice(data),
                }]),
            )
            .await?;
        if hash.is_empty() {
            return Err(ProviderError::new(
                SERVER_ERROR,
                "wallet returned an empty transaction hash",
            ));
        }
        Ok(hash)
    }
}
