//! Common helpers shared by the area and pricing calculations.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fraction digits kept by [`format_thousands`].
const FRACTION_DIGITS: u32 = 3;

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(0)), dec!(0));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Whole buckets needed to give `area` the requested number of coats.
///
/// Buckets are never sold in fractions, so the quotient is rounded up.
/// Returns `None` if the count does not fit in a `u32`, including when the
/// intermediate product or quotient exceeds the range of [`Decimal`].
/// `coverage` must be positive; callers validate it through the pricing
/// table.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::bucket_count;
///
/// assert_eq!(bucket_count(dec!(150), 1, dec!(150)), Some(1));
/// assert_eq!(bucket_count(dec!(150.01), 1, dec!(150)), Some(2));
/// ```
pub fn bucket_count(
    area: Decimal,
    coats: u32,
    coverage: Decimal,
) -> Option<u32> {
    if coats == 0 || area <= Decimal::ZERO {
        return Some(0);
    }
    area.checked_mul(Decimal::from(coats))?
        .checked_div(coverage)?
        .ceil()
        .to_u32()
}

/// Formats a value with comma thousands separators and at most three
/// decimal places (half away from zero), trailing zeros dropped.
///
/// ```
/// use rust_decimal_macros::dec;
/// use paint_core::calculations::common::format_thousands;
///
/// assert_eq!(format_thousands(dec!(9074)), "9,074");
/// assert_eq!(format_thousands(dec!(1234567.891)), "1,234,567.891");
/// assert_eq!(format_thousands(dec!(4076.4155)), "4,076.416");
/// ```
pub fn format_thousands(value: Decimal) -> String {
    let text = value
        .round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // max tests
    // =========================================================================

    #[test]
    fn max_returns_larger_value() {
        assert_eq!(max(dec!(58.2), dec!(0)), dec!(58.2));
    }

    #[test]
    fn max_clamps_negative_to_zero() {
        assert_eq!(max(dec!(-12.5), Decimal::ZERO), Decimal::ZERO);
    }

    // =========================================================================
    // bucket_count tests
    // =========================================================================

    #[test]
    fn bucket_count_exact_coverage_is_one_bucket() {
        assert_eq!(bucket_count(dec!(150), 1, dec!(150)), Some(1));
    }

    #[test]
    fn bucket_count_just_over_coverage_needs_second_bucket() {
        assert_eq!(bucket_count(dec!(150.01), 1, dec!(150)), Some(2));
    }

    #[test]
    fn bucket_count_multiplies_by_coats() {
        assert_eq!(bucket_count(dec!(58.2), 2, dec!(150)), Some(1));
        assert_eq!(bucket_count(dec!(100), 2, dec!(150)), Some(2));
        assert_eq!(bucket_count(dec!(450), 3, dec!(150)), Some(9));
    }

    #[test]
    fn bucket_count_zero_coats_is_zero() {
        assert_eq!(bucket_count(dec!(500), 0, dec!(150)), Some(0));
    }

    #[test]
    fn bucket_count_zero_area_is_zero() {
        assert_eq!(bucket_count(dec!(0), 2, dec!(150)), Some(0));
    }

    #[test]
    fn bucket_count_overflow_is_none() {
        assert_eq!(bucket_count(dec!(1000000000000), 10, dec!(0.001)), None);
    }

    #[test]
    fn bucket_count_tiny_coverage_is_none() {
        let coverage = Decimal::new(1, 28);

        assert_eq!(bucket_count(dec!(58.2), 1, coverage), None);
    }

    #[test]
    fn bucket_count_product_beyond_decimal_range_is_none() {
        assert_eq!(bucket_count(Decimal::MAX, 2, dec!(150)), None);
    }

    // =========================================================================
    // format_thousands tests
    // =========================================================================

    #[test]
    fn format_thousands_groups_integer_part() {
        assert_eq!(format_thousands(dec!(9074)), "9,074");
        assert_eq!(format_thousands(dec!(1234567)), "1,234,567");
        assert_eq!(format_thousands(dec!(100)), "100");
    }

    #[test]
    fn format_thousands_keeps_fraction() {
        assert_eq!(format_thousands(dec!(4074.50)), "4,074.5");
        assert_eq!(format_thousands(dec!(58.2)), "58.2");
    }

    #[test]
    fn format_thousands_keeps_three_fraction_digits() {
        assert_eq!(format_thousands(dec!(4076.415)), "4,076.415");
        assert_eq!(format_thousands(dec!(4076.4155)), "4,076.416");
        assert_eq!(format_thousands(dec!(0.0004)), "0");
    }

    #[test]
    fn format_thousands_handles_zero_and_negative() {
        assert_eq!(format_thousands(dec!(0.00)), "0");
        assert_eq!(format_thousands(dec!(-12345.6)), "-12,345.6");
    }
}
