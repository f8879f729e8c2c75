//! Token amounts in base units.
//!
//! A human quantity is scaled by `10^decimals` with checked `uint256`
//! arithmetic; nothing here ever touches floating point.

pub use alloy_primitives::U256;

use crate::error::{FaucetError, Result};
use std::fmt;

/// Decimals assumed when the token contract does not report its own.
pub const DEFAULT_DECIMALS: u8 = 18;

/// An amount of tokens in the contract's base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount {
    base_units: U256,
}

impl TokenAmount {
    /// Scale a whole-token quantity to base units.
    ///
    /// # Errors
    ///
    /// Returns [`FaucetError::ContractCallFailed`] if `quantity * 10^decimals`
    /// does not fit in a `uint256`.
    pub fn from_units(quantity: u64, decimals: u8) -> Result<Self> {
        U256::from(10u8)
            .checked_pow(U256::from(decimals))
            .and_then(|scale| scale.checked_mul(U256::from(quantity)))
            .map(|base_units| Self { base_units })
            .ok_or_else(|| {
                FaucetError::contract_call_failed(format!(
                    "token amount overflows uint256 for {quantity} tokens at {decimals} decimals"
                ))
            })
    }

    /// The amount in base units.
    #[must_use]
    pub const fn base_units(&self) -> U256 {
        self.base_units
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_units)
    }
}
