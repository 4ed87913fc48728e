//! Money and hour arithmetic using rust_decimal
//!
//! All amounts are `Decimal`. Rounding to cents is half-up
//! (`MidpointAwayFromZero`) everywhere.

use chrono::NaiveDateTime;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

const SECONDS_PER_HOUR: i64 = 3600;

/// Largest unit price, service value or hourly rate accepted
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest material quantity accepted
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(9999, 0, 0, false, 0);

/// Largest stored worklog duration accepted
pub const MAX_HOURS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Largest displacement distance accepted
pub const MAX_KM: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Clamp a coerced input into `[-max, max]`.
///
/// Keeps every product in the totals engine far from `Decimal` overflow.
pub fn clamp_input(value: Decimal, max: Decimal, field: &'static str) -> Decimal {
    let clamped = value.clamp(-max, max);
    if clamped != value {
        tracing::warn!(field, %value, %max, "Input exceeds maximum, clamped");
    }
    clamped
}

/// Round a monetary value to cents, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round hours up to the next half hour (2.5 stays 2.5, 2.51 becomes 3.0)
///
/// This is a ceiling, not nearest-half-hour rounding: 2.1 bills as 2.5
/// even though 2.0 is closer. Started half hours are billed in full.
pub fn round_up_to_half_hour(hours: Decimal) -> Decimal {
    let two = Decimal::TWO;
    (hours * two).ceil() / two
}

/// Whole seconds between two timestamps, floored at zero
pub fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds().max(0)
}

/// Convert a second count to hours without rounding
pub fn seconds_to_hours(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Hours between two timestamps, rounded to 2 decimals and floored at zero
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    round_money(seconds_to_hours(seconds_between(start, end)))
}

/// Format an amount as Brazilian reais: `R$ 1.234,56`
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{}R$ {},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_round_money_half_up() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_money(Decimal::new(-12345, 3)), Decimal::new(-1235, 2));
        assert_eq!(round_money(Decimal::new(30840, 2)), Decimal::new(30840, 2));
    }

    #[test]
    fn test_round_up_to_half_hour() {
        assert_eq!(round_up_to_half_hour(Decimal::new(25, 1)), Decimal::new(25, 1));
        assert_eq!(round_up_to_half_hour(Decimal::new(251, 2)), Decimal::from(3));
        assert_eq!(round_up_to_half_hour(Decimal::new(233, 2)), Decimal::new(25, 1));
        assert_eq!(round_up_to_half_hour(Decimal::from(2)), Decimal::from(2));
        assert_eq!(round_up_to_half_hour(Decimal::ZERO), Decimal::ZERO);
        // Ceiling, not nearest
        assert_eq!(round_up_to_half_hour(Decimal::new(21, 1)), Decimal::new(25, 1));
        assert_eq!(round_up_to_half_hour(Decimal::new(201, 2)), Decimal::new(25, 1));
    }

    #[test]
    fn test_clamp_input() {
        assert_eq!(clamp_input(Decimal::from(12), MAX_QUANTITY, "quantity"), Decimal::from(12));
        assert_eq!(clamp_input(Decimal::MAX, MAX_QUANTITY, "quantity"), MAX_QUANTITY);
        assert_eq!(clamp_input(Decimal::MIN, MAX_PRICE, "unit_price"), -MAX_PRICE);
    }

    #[test]
    fn test_seconds_between() {
        assert_eq!(seconds_between(at(9, 0), at(9, 20)), 1200);
        assert_eq!(seconds_between(at(11, 0), at(9, 0)), 0);
        assert_eq!(seconds_to_hours(3600 * 3), Decimal::from(3));
    }

    #[test]
    fn test_hours_between() {
        assert_eq!(hours_between(at(9, 0), at(11, 30)), Decimal::new(25, 1));
        assert_eq!(hours_between(at(9, 0), at(9, 20)), Decimal::new(33, 2));
        assert_eq!(hours_between(at(11, 0), at(9, 0)), Decimal::ZERO);
        assert_eq!(hours_between(at(9, 0), at(9, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1.234,56");
        assert_eq!(format_brl(Decimal::from(375)), "R$ 375,00");
        assert_eq!(format_brl(Decimal::new(1234567891, 2)), "R$ 12.345.678,91");
        assert_eq!(format_brl(Decimal::new(-105, 1)), "-R$ 10,50");
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
    }
}
