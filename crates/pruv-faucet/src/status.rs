//! Transaction status shown to the user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress and result messages emitted by the faucet workflows.
pub mod messages {
    /// Explicit connect in progress.
    pub const CONNECTING_TO_METAMASK: &str = "Connecting to MetaMask...";
    /// Explicit connect attempted without an injected provider.
    pub const METAMASK_NOT_INSTALLED_CONNECT: &str =
        "MetaMask is not installed. Please install MetaMask to use this faucet.";
    /// Mint workflow started.
    pub const CONNECTING_TO_WALLET: &str = "Connecting to wallet...";
    /// Network assurance in progress.
    pub const SWITCHING_NETWORK: &str = "Switching to Pruv Network...";
    /// Signer and contract being prepared.
    pub const PREPARING_TRANSACTION: &str = "Preparing transaction...";
    /// Waiting for the user to approve the mint.
    pub const CONFIRM_IN_WALLET: &str = "Confirm transaction in MetaMask...";
    /// Mint submitted, waiting for the receipt.
    pub const WAITING_FOR_CONFIRMATION: &str =
        "Transaction submitted. Waiting for confirmation...";
    /// Mint confirmed.
    pub const MINT_SUCCEEDED: &str = "Successfully minted 10 MockRWATokens!";
}

/// Which variant a [`TransactionStatus`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// Nothing to show.
    Idle,
    /// Work in progress.
    Loading,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Error,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Status of the current wallet operation.
///
/// Always replaced as a whole; observers never see a mix of two variants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionStatus {
    /// No message.
    #[default]
    Idle,
    /// Operation in progress.
    Loading {
        /// Progress description.
        message: String,
    },
    /// Mint confirmed.
    Success {
        /// Result description.
        message: String,
        /// Hash of the confirmed transaction.
        #[serde(rename = "txHash")]
        tx_hash: String,
    },
    /// Operation failed.
    Error {
        /// Cause of the failure.
        message: String,
    },
}

impl TransactionStatus {
    /// Create a loading status.
    #[must_use]
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Loading {
            message: message.into(),
        }
    }

    /// Create a success status.
    #[must_use]
    pub fn success(message: impl Into<String>, tx_hash: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            tx_hash: tx_hash.into(),
        }
    }

    /// Create an error status.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// The variant of this status.
    #[must_use]
    pub const fn kind(&self) -> StatusKind {
        match self {
            Self::Idle => StatusKind::Idle,
            Self::Loading { .. } => StatusKind::Loading,
            Self::Success { .. } => StatusKind::Success,
            Self::Error { .. } => StatusKind::Error,
        }
    }

    /// The message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { message } | Self::Success { message, .. } | Self::Error { message } => {
                Some(message)
            }
        }
    }

    /// The confirmed transaction hash, if any.
    #[must_use]
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            Self::Success { tx_hash, .. } => Some(tx_hash),
            _ => None,
        }
    }

    /// Check if an operation is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Check if this is a terminal status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Error { .. })
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{}: {message}", self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}
