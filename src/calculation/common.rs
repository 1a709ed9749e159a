//! Presentation rounding shared by the result models and the HTTP layer.
//!
//! Calculations never round; amounts are rounded only when displayed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to exactly two decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use policy_impact_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("123.455").unwrap()).to_string(), "123.46");
/// assert_eq!(round_currency(Decimal::from_str("123.454").unwrap()).to_string(), "123.45");
/// assert_eq!(round_currency(Decimal::from(4000)).to_string(), "4000.00");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
