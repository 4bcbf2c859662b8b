//! Display formatting for monetary amounts (fr-FR, euro).
//!
//! Matches `Intl.NumberFormat("fr-FR", { style: "currency", currency: "EUR" })`
//! so that figures rendered by the CLI and by a web page read identically.

use rust_decimal::RoundingStrategy;

use crate::types::Money;

const GROUP_SEPARATOR: char = '\u{202F}';
const DECIMAL_SEPARATOR: char = ',';
const SYMBOL_SEPARATOR: char = '\u{00A0}';
const CURRENCY_SYMBOL: char = '€';

/// Format an amount as euros with French separators, e.g. `2 309,75 €`.
pub fn format_currency(amount: Money) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded = rounded.abs();
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    out.push(DECIMAL_SEPARATOR);
    // Near Decimal::MAX the mantissa cannot hold two decimals; rescale stops short.
    out.push_str(&format!("{frac_part:0<2}"));
    out.push(SYMBOL_SEPARATOR);
    out.push(CURRENCY_SYMBOL);
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 * GROUP_SEPARATOR.len_utf8());
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annuity_display() {
        assert_eq!(format_currency(dec!(2309.7479)), "2\u{202f}309,75\u{a0}€");
    }

    #[test]
    fn test_small_and_zero_amounts() {
        assert_eq!(format_currency(dec!(0)), "0,00\u{a0}€");
        assert_eq!(format_currency(dec!(7.5)), "7,50\u{a0}€");
        assert_eq!(format_currency(dec!(999.999)), "1\u{202f}000,00\u{a0}€");
    }

    #[test]
    fn test_negative_amount() {
        assert_eq!(
            format_currency(dec!(-1234567.891)),
            "-1\u{202f}234\u{202f}567,89\u{a0}€"
        );
    }

    #[test]
    fn test_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.001)), "0,00\u{a0}€");
    }

    #[test]
    fn test_largest_amounts_keep_two_decimals() {
        let near_max: Money = "7922816251426433759354395033".parse().unwrap();
        assert_eq!(
            format_currency(near_max),
            "7\u{202f}922\u{202f}816\u{202f}251\u{202f}426\u{202f}433\u{202f}759\u{202f}354\u{202f}395\u{202f}033,00\u{a0}€"
        );
        assert!(format_currency(rust_decimal::Decimal::MAX).ends_with("950\u{202f}335,00\u{a0}€"));
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(format_currency(dec!(0.125)), "0,13\u{a0}€");
        assert_eq!(format_currency(dec!(-0.125)), "-0,13\u{a0}€");
    }
}
