//! Money calculation utilities using rust_decimal for precision
//!
//! All accumulation is done with `Decimal` internally, then converted to
//! `f64` for storage/serialization, rounded to 2 decimal places half-up.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Sum a sequence of f64 prices with precise arithmetic.
pub fn sum_prices(prices: impl Iterator<Item = f64>) -> f64 {
    let total: Decimal = prices.map(to_decimal).sum();
    to_f64(total)
}
