//! Ethereum address validation.
//!
//! Rules:
//! - optional `0x` / `0X` prefix followed by exactly 40 hex digits
//! - all-lowercase or all-uppercase digits are accepted without a checksum
//! - mixed case must be a valid EIP-55 checksum

use std::str::FromStr;

use alloy_primitives::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("expected 40 hex digits, got {0}")]
    Length(usize),

    #[error("non-hex character {0:?}")]
    NonHex(char),

    #[error("mixed-case address fails EIP-55 checksum")]
    Checksum,
}

/// Validate and parse `input` into an [`Address`].
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(AddressError::NonHex(bad));
    }
    if digits.len() != 40 {
        return Err(AddressError::Length(digits.len()));
    }

    let address = Address::from_str(digits).map_err(|_| AddressError::Length(digits.len()))?;

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        let checksummed = address.to_checksum(None);
        if checksummed[2..] != *digits {
            return Err(AddressError::Checksum);
        }
    }

    Ok(address)
}
