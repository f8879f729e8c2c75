//! Wallet session state.
//!
//! One [`WalletSession`] exists per faucet. It is the single source of truth
//! for everything the presentation layer renders. Updates are applied
//! synchronously and broadcast through a [`tokio::sync::watch`] channel, so a
//! subscriber always sees the latest state before the next workflow step
//! runs.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::status::TransactionStatus;

/// A snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Recipient entered by the user or supplied by the wallet. Not validated.
    pub candidate_address: String,
    /// Whether a wallet account has been established this session.
    pub is_connected: bool,
    /// Account reported by the wallet; empty until connected.
    pub connected_address: String,
    /// User-asserted human verification.
    pub is_human_verified: bool,
    /// Current operation status.
    pub status: TransactionStatus,
}

impl SessionState {
    /// Whether the connect control should be enabled.
    #[must_use]
    pub fn can_connect(&self) -> bool {
        !self.is_connected && !self.status.is_loading()
    }

    /// Whether the mint control should be enabled.
    #[must_use]
    pub fn can_mint(&self) -> bool {
        !self.status.is_loading() && !self.candidate_address.is_empty() && self.is_human_verified
    }

    /// Record an established wallet account.
    ///
    /// The account also becomes the candidate recipient.
    pub(crate) fn connect_account(&mut self, account: &str) {
        self.is_connected = true;
        self.connected_address = account.to_string();
        self.candidate_address = account.to_string();
    }
}

/// Observable wallet session.
#[derive(Debug)]
pub struct WalletSession {
    state: watch::Sender<SessionState>,
}

impl WalletSession {
    /// Create a session with default state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { state }
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> TransactionStatus {
        self.state.borrow().status.clone()
    }

    /// Replace the candidate address. No validation happens here.
    pub fn set_candidate_address(&self, address: impl Into<String>) {
        let address = address.into();
        self.state.send_modify(|s| s.candidate_address = address);
    }

    /// Replace the human-verification flag.
    pub fn set_human_verified(&self, verified: bool) {
        self.state.send_modify(|s| s.is_human_verified = verified);
    }

    /// Replace the status.
    pub fn set_status(&self, status: TransactionStatus) {
        self.state.send_modify(|s| s.status = status);
    }

    /// Apply several field changes as one observable update.
    pub(crate) fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(f);
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}
