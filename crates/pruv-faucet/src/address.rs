//! EVM account addresses.
//!
//! Parsing is purely syntactic: 20 bytes of hex, optionally `0x`-prefixed,
//! with the EIP-55 checksum enforced only when the input mixes letter case.

pub use alloy_primitives::Address;

use crate::error::{FaucetError, Result};

/// Hex digits in an address, without the prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Parse a user-supplied address string.
///
/// # Errors
///
/// Returns [`FaucetError::InvalidAddress`] if the input is empty, has the
/// wrong length, contains non-hex characters, or carries a mixed-case
/// checksum that does not match.
pub fn parse_address(input: &str) -> Result<Address> {
    if input.is_empty() {
        return Err(FaucetError::invalid_address("address is empty"));
    }

    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() != ADDRESS_HEX_LEN {
        return Err(FaucetError::invalid_address(format!(
            "expected 40 hex digits, got {}",
            digits.len()
        )));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FaucetError::invalid_address("contains non-hex characters"));
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{digits}"), None)
            .map_err(|_| FaucetError::invalid_address("bad address checksum"));
    }

    digits
        .parse::<Address>()
        .map_err(|e| FaucetError::invalid_address(format!("invalid hex: {e}")))
}

/// True if `input` parses as an address.
#[must_use]
pub fn is_address(input: &str) -> bool {
    parse_address(input).is_ok()
}
