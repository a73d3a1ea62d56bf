//! Monetary helpers built on `rust_decimal`.
//!
//! Prices travel through JSON as plain numbers but are held as `Decimal`
//! so that sums like `69.99 * 2` stay exact.

use crate::error::StoreError;
use rust_decimal::prelude::*;

/// Monetary amount in the store currency.
pub type Money = Decimal;

/// Number of decimal places used for displayed amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds to cents, midpoint away from zero.
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Builds an amount from integer cents, e.g. `cents(4999)` is `49.99`.
pub fn cents(value: i64) -> Money {
    Decimal::new(value, MONEY_DECIMAL_PLACES)
}

/// Parses a decimal amount such as `"100"` or `"0.08"`.
///
/// `field` names the value in the error message.
pub fn parse_money(raw: &str, field: &str) -> Result<Money, StoreError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| StoreError::validation(format!("{field} must be a decimal number, got {raw:?}")))
}

/// Rejects negative amounts.
pub fn require_non_negative(value: Money, field: &str) -> Result<(), StoreError> {
    if value < Decimal::ZERO {
        return Err(StoreError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_midpoint() {
        assert_eq!(round_money(Decimal::new(11195, 3)), cents(1120));
        assert_eq!(round_money(Decimal::new(-11195, 3)), cents(-1120));
        assert_eq!(round_money(cents(6999)), cents(6999));
    }

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money(" 0.08 ", "TAX_RATE").unwrap(), Decimal::new(8, 2));
        let err = parse_money("ten", "FLAT_SHIPPING_FEE").unwrap_err();
        assert!(err.to_string().contains("FLAT_SHIPPING_FEE"));
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative(Decimal::ZERO, "price").is_ok());
        assert!(require_non_negative(cents(-1), "price").is_err());
    }
}
