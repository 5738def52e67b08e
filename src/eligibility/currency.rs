//! Whole-dollar currency formatting for reason strings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats a whole-dollar amount as US currency with no decimal places.
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::eligibility::format_usd;
///
/// assert_eq!(format_usd(22_590u64), "$22,590");
/// assert_eq!(format_usd(-1_000i64), "-$1,000");
/// assert_eq!(format_usd(0u32), "$0");
/// ```
pub fn format_usd(amount: impl Into<i128>) -> String {
    let amount = amount.into();
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Formats a decimal amount, rounding half away from zero to whole dollars.
///
/// # Examples
///
/// ```
/// use fee_waiver_engine::eligibility::format_usd_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_usd_decimal(Decimal::new(225905, 1)), "$22,591");
/// ```
pub fn format_usd_decimal(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    match rounded.to_i128() {
        Some(whole) => format_usd(whole),
        None => format!("${}", rounded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(format_usd(0u32), "$0");
        assert_eq!(format_usd(7u32), "$7");
        assert_eq!(format_usd(405u32), "$405");
    }

    #[test]
    fn test_thousands_are_grouped() {
        assert_eq!(format_usd(1_000u32), "$1,000");
        assert_eq!(format_usd(15_060u64), "$15,060");
        assert_eq!(format_usd(1_000_000u64), "$1,000,000");
        assert_eq!(format_usd(123_456_789u64), "$123,456,789");
    }

    #[test]
    fn test_negative_amounts_lead_with_minus() {
        assert_eq!(format_usd(-5i64), "-$5");
        assert_eq!(format_usd(-12_345i64), "-$12,345");
    }

    #[test]
    fn test_u64_max_formats() {
        assert_eq!(format_usd(u64::MAX), "$18,446,744,073,709,551,615");
    }

    #[test]
    fn test_decimal_rounds_half_away_from_zero() {
        assert_eq!(format_usd_decimal(dec("22590")), "$22,590");
        assert_eq!(format_usd_decimal(dec("22590.5")), "$22,591");
        assert_eq!(format_usd_decimal(dec("22590.49")), "$22,590");
        assert_eq!(format_usd_decimal(dec("-10.5")), "-$11");
    }

    #[test]
    fn test_formatting_is_deterministic() {
        assert_eq!(format_usd(30_120u64), format_usd(30_120u64));
    }
}
