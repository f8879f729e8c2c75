//! Network assurance.

use tracing::{debug, info};

use crate::chain::ChainDescriptor;
use crate::error::{FaucetError, Result};
use crate::provider::BrowserProvider;

/// Make `chain` the wallet's active network.
///
/// Switches first. A wallet that does not know the chain (code 4902) is
/// asked to register it, which also activates it.
///
/// # Errors
///
/// Returns [`FaucetError::NetworkAddFailed`] if registration fails, and the
/// classified switch error otherwise.
pub async fn ensure_network(provider: &BrowserProvider, chain: &ChainDescriptor) -> Result<()> {
    let err = match provider.switch_chain(&chain.chain_id).await {
        Ok(()) => {
            info!(chain_id = %chain.chain_id, "switched network");
            return Ok(());
        }
        Err(err) => err,
    };

    if !err.is_unrecognized_chain() {
        return Err(FaucetError::from_provider(err, |e| {
            FaucetError::network_switch_failed(e.code, e.message)
        }));
    }

    debug!(chain_id = %chain.chain_id, "chain unknown to wallet, adding it");
    provider
        .add_chain(chain)
        .await
        .map_err(|e| FaucetError::NetworkAddFailed { message: e.message })?;
    info!(chain_id = %chain.chain_id, chain_name = %chain.chain_name, "added network");
    Ok(())
}
