use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::RoundingStrategy;

/// Rounds a value to two decimal places for display output.
///
/// Uses decimal arithmetic so results are stable across platforms.
/// Non-finite or unrepresentable inputs are returned unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// Percentage of `part` within `total`, rounded to two decimal places.
///
/// Returns `0.0` when `total` is zero.
#[must_use]
pub fn percentage_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(part as f64 / total as f64 * 100.0)
}
