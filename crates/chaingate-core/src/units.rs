//! JSON-RPC quantity parsing and exact base-unit scaling.

use alloy_primitives::U256;
use thiserror::Error;

/// Decimal places between wei and ether.
pub const ETHER_DECIMALS: u8 = 18;
/// Decimal places between wei and gwei.
pub const GWEI_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity {0:?} is missing the 0x prefix")]
    MissingPrefix(String),

    #[error("quantity {0:?} has no digits")]
    Empty(String),

    #[error("quantity {0:?} is not valid hex: {1}")]
    Invalid(String, String),

    #[error("quantity {0} does not fit in 64 bits")]
    Overflow(U256),
}

/// Parse a `0x`-prefixed hex quantity as returned by `eth_*` methods.
pub fn parse_quantity(s: &str) -> Result<U256, QuantityError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| QuantityError::MissingPrefix(s.to_string()))?;
    if digits.is_empty() {
        return Err(QuantityError::Empty(s.to_string()));
    }
    // from_str_radix skips `_` separators
    if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(QuantityError::Invalid(s.to_string(), format!("unexpected character {c:?}")));
    }
    U256::from_str_radix(digits, 16).map_err(|e| QuantityError::Invalid(s.to_string(), e.to_string()))
}

/// Parse a hex quantity that must fit in a `u64` (block numbers, chain ids).
pub fn parse_quantity_u64(s: &str) -> Result<u64, QuantityError> {
    let value = parse_quantity(s)?;
    u64::try_from(value).map_err(|_| QuantityError::Overflow(value))
}

/// Render `value` base units as a decimal string scaled down by
/// `10^decimals`.
///
/// The result is exact: trailing fractional zeros are trimmed and the dot is
/// dropped for whole amounts.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let (whole, frac) = value.div_rem(divisor);
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> U256 {
        U256::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn one_ether() {
        assert_eq!(format_units(dec("1000000000000000000"), ETHER_DECIMALS), "1");
    }

    #[test]
    fn one_gwei() {
        assert_eq!(format_units(dec("1000000000"), GWEI_DECIMALS), "1");
    }

    #[test]
    fn fractional_amounts_are_exact() {
        assert_eq!(format_units(dec("1500000000000000000"), ETHER_DECIMALS), "1.5");
        assert_eq!(format_units(dec("12345678901"), GWEI_DECIMALS), "12.345678901");
        assert_eq!(format_units(U256::from(1u64), ETHER_DECIMALS), "0.000000000000000001");
        assert_eq!(format_units(U256::ZERO, ETHER_DECIMALS), "0");
    }

    #[test]
    fn large_values_keep_every_digit() {
        // 123456789.123456789123456789 ETH
        let wei = dec("123456789123456789123456789");
        assert_eq!(format_units(wei, ETHER_DECIMALS), "123456789.123456789123456789");
        assert_eq!(format_units(U256::MAX, 0), U256::MAX.to_string());
    }

    #[test]
    fn parse_quantities() {
        assert_eq!(parse_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(parse_quantity("0xde0b6b3a7640000").unwrap(), dec("1000000000000000000"));
        assert_eq!(parse_quantity_u64("0x1").unwrap(), 1);
        assert_eq!(parse_quantity_u64("0x121eac0").unwrap(), 19_000_000);
    }

    #[test]
    fn reject_malformed_quantities() {
        assert!(matches!(parse_quantity("123"), Err(QuantityError::MissingPrefix(_))));
        assert!(matches!(parse_quantity("0x"), Err(QuantityError::Empty(_))));
        assert!(matches!(parse_quantity("0xzz"), Err(QuantityError::Invalid(..))));
        assert!(matches!(parse_quantity("0x_"), Err(QuantityError::Invalid(..))));
        assert!(matches!(parse_quantity("0x1_0"), Err(QuantityError::Invalid(..))));
        assert!(matches!(parse_quantity("0x 1"), Err(QuantityError::Invalid(..))));
        assert!(matches!(
            parse_quantity_u64("0x10000000000000000"),
            Err(QuantityError::Overflow(_))
        ));
    }
}
