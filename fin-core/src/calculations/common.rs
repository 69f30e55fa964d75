//! Common utility functions for financial calculations.
//!
//! This module provides shared functionality used across multiple calculator
//! modules, including rounding and other common operations.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Arguments
///
/// * `value` - The decimal value to round
///
/// # Returns
///
/// The value rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fin_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(123.456)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value up to the next whole unit.
///
/// The budget tracker works in whole currency units and always rounds in the
/// saver's disfavor, so fractional amounts become the next integer toward
/// positive infinity (a true ceiling, not away-from-zero rounding).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fin_core::calculations::common::ceil_whole;
///
/// assert_eq!(ceil_whole(dec!(12.01)), dec!(13));
/// assert_eq!(ceil_whole(dec!(12.00)), dec!(12));
/// assert_eq!(ceil_whole(dec!(-0.5)), dec!(0));
/// ```
pub fn ceil_whole(value: Decimal) -> Decimal {
    value.ceil()
}

/// Returns the maximum of two decimal values.
///
/// # Arguments
///
/// * `a` - First decimal value
/// * `b` - Second decimal value
///
/// # Returns
///
/// The larger of the two values.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fin_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(200.00), dec!(100.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}
