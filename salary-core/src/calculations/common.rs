//! Common helpers shared by the salary calculations.
//!
//! Rounding and ratio rules that more than one calculation relies on live
//! here so they are applied the same way everywhere.

use rust_decimal::Decimal;

/// Drops the fractional part of a currency amount, moving toward zero.
///
/// Withholding is truncated, never rounded, once converted back from UVT.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::truncate;
///
/// assert_eq!(truncate(dec!(351379.99)), dec!(351379));
/// assert_eq!(truncate(dec!(-0.5)), dec!(0));
/// ```
pub fn truncate(value: Decimal) -> Decimal {
    value.trunc()
}

/// Expresses `part` as a percentage of `whole`.
///
/// Returns zero when `whole` is zero instead of dividing, and `None` when
/// the ratio does not fit a `Decimal`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::percent_of;
///
/// assert_eq!(percent_of(dec!(250), dec!(1000)), Some(dec!(25)));
/// assert_eq!(percent_of(dec!(250), dec!(0)), Some(dec!(0)));
/// ```
pub fn percent_of(
    part: Decimal,
    whole: Decimal,
) -> Option<Decimal> {
    if whole.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_div(whole)?.checked_mul(Decimal::ONE_HUNDRED)
}
