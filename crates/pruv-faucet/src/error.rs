//! Error types for faucet operations.
//!
//! Every variant renders (via `Display`) as the human-readable text that ends
//! up in [`TransactionStatus::Error`](crate::TransactionStatus::Error).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for faucet operations.
pub type Result<T> = std::result::Result<T, FaucetError>;

/// Message shown when a failure carries no text of its own.
pub const GENERIC_FAILURE: &str = "Transaction failed";

/// EIP-1193 error code: the user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// EIP-1193 error code: the requested method is not supported.
pub const UNSUPPORTED_METHOD: i64 = 4200;

/// EIP-3326 error code: the wallet does not know the requested chain.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// JSON-RPC internal error, used for malformed provider responses.
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC server error, used for reverted transactions.
pub const SERVER_ERROR: i64 = -32000;

/// An error object returned by an injected EIP-1193 provider.
///
/// The shape mirrors the `ProviderRpcError` objects wallets reject with.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    /// Numeric error code.
    pub code: i64,
    /// Human-readable message supplied by the wallet.
    #[serde(default)]
    pub message: String,
    /// Optional wallet-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ProviderError {
    /// Create a provider error with a code and message.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an internal error for a response this client could not decode.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// Create the error a wallet returns when the user declines a prompt.
    #[must_use]
    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED_REQUEST, "user rejected the request")
    }

    /// True when the user declined the wallet prompt.
    ///
    /// The structured code is checked first; wallets that wrap the rejection
    /// in another code are caught by the message text.
    #[must_use]
    pub fn is_user_rejected(&self) -> bool {
        if self.code == USER_REJECTED_REQUEST {
            return true;
        }
        let message = self.message.to_ascii_lowercase();
        message.contains("user rejected") || message.contains("user denied")
    }

    /// True when the account cannot cover the network fee.
    #[must_use]
    pub fn is_insufficient_funds(&self) -> bool {
        self.message
            .to_ascii_lowercase()
            .contains("insufficient funds")
    }

    /// True when the wallet does not know the requested chain.
    #[must_use]
    pub const fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN
    }
}

/// Errors that terminate a faucet operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaucetError {
    /// No wallet provider is injected.
    #[error("MetaMask is not installed")]
    ProviderMissing,

    /// The recipient is empty or not a syntactically valid EVM address.
    #[error("Please enter a valid Ethereum address")]
    InvalidAddress {
        /// Why the input was rejected.
        reason: String,
    },

    /// The human-verification checkbox is not set.
    #[error("Please verify that you are human")]
    NotHumanVerified,

    /// The user declined a wallet prompt.
    #[error("Transaction rejected by user")]
    UserRejected {
        /// Wallet-supplied message.
        message: String,
    },

    /// The account cannot pay the network fee.
    #[error("Insufficient funds for gas fee")]
    InsufficientFunds {
        /// Wallet-supplied message.
        message: String,
    },

    /// Account authorization failed during an explicit connect.
    #[error("Failed to connect wallet: {message}")]
    ConnectionFailed {
        /// Wallet-supplied message.
        message: String,
    },

    /// Switching the wallet to the target chain failed.
    #[error("{message}")]
    NetworkSwitchFailed {
        /// Provider error code.
        code: i64,
        /// Wallet-supplied message.
        message: String,
    },

    /// Registering the target chain with the wallet failed.
    #[error("Failed to add network to wallet")]
    NetworkAddFailed {
        /// Wallet-supplied message.
        message: String,
    },

    /// Signer, decimals, mint or confirmation failure.
    #[error("{message}")]
    ContractCallFailed {
        /// Failure message.
        message: String,
    },

    /// Another connect or mint is already running on this session.
    #[error("a wallet operation is already in progress")]
    Busy,

    /// The environment configuration is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },
}

impl FaucetError {
    /// Create an invalid address error.
    #[must_use]
    pub fn invalid_address(reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            reason: reason.into(),
        }
    }

    /// Create a contract call failure, substituting the generic message
    /// when none is available.
    #[must_use]
    pub fn contract_call_failed(message: impl Into<String>) -> Self {
        Self::ContractCallFailed {
            message: non_empty(message.into()),
        }
    }

    /// Create a network switch failure.
    #[must_use]
    pub fn network_switch_failed(code: i64, message: impl Into<String>) -> Self {
        Self::NetworkSwitchFailed {
            code,
            message: non_empty(message.into()),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify an opaque provider failure.
    ///
    /// Rejections and insufficient-funds failures get their own kinds;
    /// everything else is handed to `otherwise`.
    pub fn from_provider(
        err: ProviderError,
        otherwise: impl FnOnce(ProviderError) -> Self,
    ) -> Self {
        if err.is_user_rejected() {
            Self::UserRejected {
                message: err.message,
            }
        } else if err.is_insufficient_funds() {
            Self::InsufficientFunds {
                message: err.message,
            }
        } else {
            otherwise(err)
        }
    }

    /// Classify a failure from the signer, contract or receipt stage.
    #[must_use]
    pub fn from_contract(err: ProviderError) -> Self {
        Self::from_provider(err, |e| Self::contract_call_failed(e.message))
    }

    /// The text shown to the user for this failure.
    #[must_use]
    pub fn status_message(&self) -> String {
        self.to_string()
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        message
    }
}
