//! MockRWAToken contract binding.
//!
//! Only the two entry points the faucet uses are bound:
//! `decimals() view returns (uint8)` and `mint(address,uint256)`.

use std::time::Duration;

use alloy_sol_types::{sol, SolCall};
use tracing::debug;

use crate::address::Address;
use crate::amount::TokenAmount;
use crate::error::{ProviderError, SERVER_ERROR};
use crate::provider::{BrowserProvider, Signer, TransactionReceipt};

sol! {
    function decimals() external view returns (uint8);
    function mint(address recipient, uint256 amount) external;
}

/// Calldata for `decimals()`.
#[must_use]
pub fn encode_decimals() -> Vec<u8> {
    decimalsCall {}.abi_encode()
}

/// Calldata for `mint(recipient, amount)`.
#[must_use]
pub fn encode_mint(recipient: Address, amount: TokenAmount) -> Vec<u8> {
    mintCall {
        recipient,
        amount: amount.base_units(),
    }
    .abi_encode()
}

/// Decode the `decimals()` return value.
///
/// Fails unless the data is one 32-byte word whose value fits in a byte.
pub fn decode_decimals(data: &[u8]) -> Result<u8, ProviderError> {
    decimalsCall::abi_decode_returns(data, true)
        .map(|ret| ret._0)
        .map_err(|e| ProviderError::internal(format!("invalid decimals() return data: {e}")))
}

/// A handle to the MockRWAToken contract, bound to a signer.
#[derive(Debug, Clone)]
pub struct MockRwaToken {
    address: Address,
    signer: Signer,
    poll_interval: Duration,
}

impl MockRwaToken {
    /// Bind the contract at `address` to `signer`.
    #[must_use]
    pub fn new(address: Address, signer: Signer, poll_interval: Duration) -> Self {
        Self {
            address,
            signer,
            poll_interval,
        }
    }

    /// Read the token's decimals.
    pub async fn decimals(&self) -> Result<u8, ProviderError> {
        let data = self
            .signer
            .provider()
            .call(&self.address, &encode_decimals())
            .await?;
        decode_decimals(&data)
    }

    /// Submit `mint(recipient, amount)` through the signer.
    pub async fn mint(
        &self,
        recipient: &Address,
        amount: TokenAmount,
    ) -> Result<PendingTransaction, ProviderError> {
        let data = encode_mint(*recipient, amount);
        let hash = self.signer.send_transaction(&self.address, &data).await?;
        Ok(PendingTransaction {
            hash,
            provider: self.signer.provider().clone(),
            poll_interval: self.poll_interval,
        })
    }
}

/// A submitted transaction awaiting inclusion.
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    hash: String,
    provider: BrowserProvider,
    poll_interval: Duration,
}

impl PendingTransaction {
    /// Hash reported by the wallet at submission.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Wait until the transaction is mined.
    ///
    /// Polls for the receipt without a deadline; timeouts are whatever the
    /// provider enforces.
    pub async fn wait(self) -> Result<TransactionReceipt, ProviderError> {
        loop {
            if let Some(receipt) = self.provider.transaction_receipt(&self.hash).await? {
                if receipt.is_reverted() {
                    return Err(ProviderError::new(
                        SERVER_ERROR,
                        "transaction execution reverted",
                    ));
                }
                return Ok(receipt);
            }
            debug!(tx_hash = %self.hash, "receipt not available yet");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
