//! The faucet: connection check, explicit connect, network assurance and the
//! mint workflow, all driving one [`WalletSession`].

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::address::{parse_address, Address};
use crate::amount::{TokenAmount, DEFAULT_DECIMALS};
use crate::chain::ChainDescriptor;
use crate::config::{FaucetConfig, UNCONFIGURED_CONTRACT_WARNING};
use crate::contract::MockRwaToken;
use crate::error::{FaucetError, Result};
use crate::network::ensure_network;
use crate::provider::{BrowserProvider, Eip1193Provider};
use crate::session::{SessionState, WalletSession};
use crate::status::{messages, TransactionStatus};

/// Whole tokens minted per request.
pub const MINT_QUANTITY: u64 = 10;

/// Faucet client bound to one optional injected provider.
#[derive(Debug)]
pub struct Faucet {
    config: FaucetConfig,
    chain: ChainDescriptor,
    provider: Option<BrowserProvider>,
    session: WalletSession,
    operation: Mutex<()>,
}

impl Faucet {
    /// `provider` is `None` when no wallet is injected.
    pub(crate) fn new(config: FaucetConfig, provider: Option<Arc<dyn Eip1193Provider>>) -> Self {
        let chain = config.chain();
        Self {
            config,
            chain,
            provider: provider.map(BrowserProvider::new),
            session: WalletSession::new(),
            operation: Mutex::new(()),
        }
    }

    /// Create a faucet and run the silent connection check.
    ///
    /// `provider` is `None` when no wallet is injected.
    pub async fn start(config: FaucetConfig, provider: Option<Arc<dyn Eip1193Provider>>) -> Self {
        let faucet = Self::new(config, provider);
        faucet.check_wallet_connection().await;
        faucet
    }

    /// The session this faucet drives.
    #[must_use]
    pub const fn session(&self) -> &WalletSession {
        &self.session
    }

    /// The network the faucet mints on.
    #[must_use]
    pub const fn chain(&self) -> &ChainDescriptor {
        &self.chain
    }

    /// Whether a wallet provider is injected.
    #[must_use]
    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Warning to display while the contract address is unconfigured.
    #[must_use]
    pub fn contract_warning(&self) -> Option<&'static str> {
        (!self.config.is_contract_configured()).then_some(UNCONFIGURED_CONTRACT_WARNING)
    }

    /// Explorer link for a transaction.
    ///
    /// # Errors
    ///
    /// See [`FaucetConfig::transaction_url`].
    pub fn transaction_url(&self, tx_hash: &str) -> Result<Url> {
        self.config.transaction_url(tx_hash)
    }

    /// Pick up an account the wallet already exposes, without prompting.
    ///
    /// Never changes the status. Failures are logged only. Skipped while a
    /// connect or mint is running.
    pub async fn check_wallet_connection(&self) {
        let Some(provider) = &self.provider else {
            debug!("no wallet provider injected, skipping connection check");
            return;
        };
        let Ok(_guard) = self.operation.try_lock() else {
            debug!("wallet operation in progress, skipping connection check");
            return;
        };

        match provider.request_accounts(true).await {
            Ok(accounts) => {
                if let Some(account) = accounts.first() {
                    self.session.update(|s| s.connect_account(account));
                    info!(address = %account, "wallet already connected");
                }
            }
            Err(e) => error!(error = %e, code = e.code, "error checking wallet connection"),
        }
    }

    /// Ask the wallet for an account, prompting the user if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FaucetError::Busy`] if another operation is running,
    /// [`FaucetError::ProviderMissing`] without a provider, and
    /// [`FaucetError::ConnectionFailed`] if the wallet refuses.
    pub async fn connect_wallet(&self) -> Result<()> {
        let _guard = self.acquire("connect")?;

        let Some(provider) = &self.provider else {
            self.session
                .set_status(TransactionStatus::error(messages::METAMASK_NOT_INSTALLED_CONNECT));
            warn!("connect attempted without a wallet provider");
            return Err(FaucetError::ProviderMissing);
        };

        match self.connect_with(provider).await {
            Ok(()) => Ok(()),
            Err(e) => self.fail(e),
        }
    }

    /// Make the Pruv testnet the wallet's active network.
    ///
    /// # Errors
    ///
    /// Returns [`FaucetError::ProviderMissing`] without a provider, otherwise
    /// see [`ensure_network`].
    pub async fn switch_network(&self) -> Result<()> {
        let provider = self.provider.as_ref().ok_or(FaucetError::ProviderMissing)?;
        ensure_network(provider, &self.chain).await
    }

    /// Mint [`MINT_QUANTITY`] tokens to the session's candidate address.
    ///
    /// Every outcome except [`FaucetError::Busy`] is also written to the
    /// session status. Returns the confirmed transaction hash.
    ///
    /// # Errors
    ///
    /// Returns the first validation, connection, network or contract failure.
    pub async fn mint_tokens(&self) -> Result<String> {
        let _guard = self.acquire("mint")?;
        let state = self.session.snapshot();

        let (provider, recipient) = match self.validate(&state) {
            Ok(valid) => valid,
            Err(e) => {
                debug!(error = %e, "mint request failed validation");
                self.session.set_status(TransactionStatus::error(e.status_message()));
                return Err(e);
            }
        };

        match self.run_mint(provider, &recipient, state.is_connected).await {
            Ok(tx_hash) => Ok(tx_hash),
            Err(e) => self.fail(e),
        }
    }

    fn acquire(&self, operation: &str) -> Result<tokio::sync::MutexGuard<'_, ()>> {
        self.operation.try_lock().map_err(|_| {
            warn!(operation, "rejected overlapping wallet operation");
            FaucetError::Busy
        })
    }

    fn validate<'a>(&'a self, state: &SessionState) -> Result<(&'a BrowserProvider, Address)> {
        let recipient = parse_address(&state.candidate_address)?;
        if !state.is_human_verified {
            return Err(FaucetError::NotHumanVerified);
        }
        let provider = self.provider.as_ref().ok_or(FaucetError::ProviderMissing)?;
        Ok((provider, recipient))
    }

    async fn connect_with(&self, provider: &BrowserProvider) -> Result<()> {
        self.session
            .set_status(TransactionStatus::loading(messages::CONNECTING_TO_METAMASK));

        let accounts = provider
            .request_accounts(false)
            .await
            .map_err(|e| FaucetError::ConnectionFailed { message: e.message })?;
        let account = accounts.first().ok_or_else(|| FaucetError::ConnectionFailed {
            message: "no accounts returned".to_string(),
        })?;

        self.session.update(|s| {
            s.connect_account(account);
            s.status = TransactionStatus::Idle;
        });
        info!(address = %account, "wallet connected");
        Ok(())
    }

    async fn run_mint(
        &self,
        provider: &BrowserProvider,
        recipient: &Address,
        connected: bool,
    ) -> Result<String> {
        self.step(messages::CONNECTING_TO_WALLET);
        if !connected {
            self.connect_with(provider).await?;
        }

        self.step(messages::SWITCHING_NETWORK);
        ensure_network(provider, &self.chain).await?;

        self.step(messages::PREPARING_TRANSACTION);
        let signer = provider
            .get_signer()
            .await
            .map_err(FaucetError::from_contract)?;
        let token = MockRwaToken::new(
            self.config.contract_address,
            signer,
            self.config.receipt_poll_interval(),
        );

        let decimals = match token.decimals().await {
            Ok(decimals) => decimals,
            Err(e) => {
                warn!(error = %e, fallback = DEFAULT_DECIMALS, "could not read token decimals, using default");
                DEFAULT_DECIMALS
            }
        };
        let amount = TokenAmount::from_units(MINT_QUANTITY, decimals)?;
        debug!(decimals, amount = %amount, "computed mint amount");

        self.step(messages::CONFIRM_IN_WALLET);
        let pending = token
            .mint(recipient, amount)
            .await
            .map_err(FaucetError::from_contract)?;
        info!(tx_hash = %pending.hash(), recipient = %recipient, "mint submitted");

        self.step(messages::WAITING_FOR_CONFIRMATION);
        let receipt = pending.wait().await.map_err(FaucetError::from_contract)?;
        let tx_hash = receipt.transaction_hash;

        self.session.update(|s| {
            s.status = TransactionStatus::success(messages::MINT_SUCCEEDED, tx_hash.clone());
            if s.candidate_address != s.connected_address {
                s.candidate_address.clear();
            }
            s.is_human_verified = false;
        });
        info!(tx_hash = %tx_hash, block = ?receipt.block_number, "mint confirmed");
        Ok(tx_hash)
    }

    fn step(&self, message: &'static str) {
        debug!(step = message, "mint workflow");
        self.session.set_status(TransactionStatus::loading(message));
    }

    fn fail<T>(&self, e: FaucetError) -> Result<T> {
        error!(error = %e, "wallet operation failed");
        self.session.set_status(TransactionStatus::error(e.status_message()));
        Err(e)
    }
}
