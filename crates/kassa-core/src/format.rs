//! # Formatting Module
//!
//! Turns amounts into display strings for report pages, receipts and the
//! price manager.
//!
//! ## Formatter Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     format_large_currency(amount, code)                 │
//! │                                                                         │
//! │   amount >= 1,000,000 ──► "$1.5M"   (symbol + to_fixed(m, 1) + "M")    │
//! │        │                                                                │
//! │   amount >= 1,000 ──────► "$2.5K"   (symbol + to_fixed(k, 1) + "K")    │
//! │        │                                                                │
//! │   otherwise ────────────► format_locale(amount, code)                  │
//! │                                │                                        │
//! │                                ├── Ok  ──► "$42.00", "42,00 €"          │
//! │                                │                                        │
//! │                                └── Err ──► symbol + to_fixed(decimals)  │
//! │                                                                         │
//! │  Only the last branch touches locale formatting, and only that branch  │
//! │  carries the secondary fallback.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Unknown Codes
//! None of these functions fail. An unknown code is used verbatim as the
//! symbol/name, and fixed formatting falls back to two decimals.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::currency::{Currency, SymbolPosition};
use crate::error::FormatError;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// No-break space used between symbol and number by spaced locales.
const NBSP: char = '\u{a0}';

// =============================================================================
// Registry Lookups
// =============================================================================

/// Returns the symbol for `code`, or `code` itself when it is not registered.
///
/// ## Example
/// ```rust
/// use kassa_core::format::currency_symbol;
///
/// assert_eq!(currency_symbol("GBP"), "£");
/// assert_eq!(currency_symbol("XYZ"), "XYZ");
/// ```
pub fn currency_symbol(code: &str) -> &str {
    Currency::from_code(code).map_or(code, |c| c.symbol())
}

/// Returns the display name for `code`, or `code` itself when it is not
/// registered.
pub fn currency_name(code: &str) -> &str {
    Currency::from_code(code).map_or(code, |c| c.name())
}

// =============================================================================
// Fixed Formatting
// =============================================================================

/// Decimal places used by [`format_currency`].
///
/// KSH is the only zero-decimal currency here. This rule is independent of
/// `FormatSpec::decimal_places`.
fn fixed_decimal_places(code: &str) -> u32 {
    if code == "KSH" {
        0
    } else {
        2
    }
}

/// Formats `amount` as `symbol + fixed decimals`.
///
/// Negative amounts are rendered, not rejected (`"$-5.00"`). Validate with
/// [`crate::validation::is_valid_currency_amount`] first if that matters.
///
/// ## Example
/// ```rust
/// use kassa_core::format::format_currency;
///
/// assert_eq!(format_currency(1234.5, "USD"), "$1234.50");
/// assert_eq!(format_currency(1234.5, "KSH"), "KSh1235");
/// assert_eq!(format_currency(10.0, "XYZ"), "XYZ10.00");
/// ```
pub fn format_currency(amount: f64, code: &str) -> String {
    format!(
        "{}{}",
        currency_symbol(code),
        to_fixed(amount, fixed_decimal_places(code))
    )
}

/// Renders `value` with exactly `digits` fraction digits.
///
/// ## Rounding
/// Matches `Number.prototype.toFixed`, which is what the dashboard renders
/// with:
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  The exact binary value is rounded; exact ties go AWAY from zero.  │
/// │                                                                     │
/// │    1234.5  → "1235"    (exact tie, up)                             │
/// │    2.5     → "3"       (exact tie, up; bankers would give "2")     │
/// │    -2.5    → "-3"                                                  │
/// │    1.005   → "1.00"    (stored as 1.00499999999999989...)          │
/// │    -0.001  → "-0.00"   (sign kept when the input is negative)      │
/// │    -0.0    → "0.00"    (negative zero has no sign)                 │
/// │                                                                     │
/// │  NaN → "NaN", ±∞ → "Infinity" / "-Infinity"                         │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// ## Large Values
/// `toFixed` switches to exponent notation (`"1e+21"`) at `|value| >= 1e21`.
/// This function keeps printing every digit there (`"1000000000000000000000"`).
/// Amounts that size never reach a till.
pub fn to_fixed(value: f64, digits: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Sign comes from the input, not the rounded result: -0.0 has none,
    // -0.001 keeps it even though it rounds to zero.
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let rendered = match Decimal::from_f64_retain(magnitude) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(digits);
            rounded.to_string()
        }
        // Beyond Decimal's range; Rust's own formatting is close enough there
        None => format!("{:.*}", digits as usize, magnitude),
    };

    format!("{sign}{rendered}")
}

// =============================================================================
// Locale Formatting
// =============================================================================

/// Formats `amount` with the registry's locale convention (grouping,
/// separators, symbol placement, decimal places).
///
/// ## Errors
/// - [`FormatError::UnknownCurrency`] when `code` has no registry entry
/// - [`FormatError::NonFiniteAmount`] for NaN / infinite amounts
pub fn format_locale(amount: f64, code: &str) -> Result<String, FormatError> {
    let currency = Currency::from_code(code)
        .ok_or_else(|| FormatError::UnknownCurrency(code.to_string()))?;
    if !amount.is_finite() {
        return Err(FormatError::NonFiniteAmount(amount));
    }

    let spec = currency.format_spec();
    let fixed = to_fixed(amount.abs(), spec.decimal_places);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut number = group_digits(whole, spec.group_separator);
    if let Some(fraction) = fraction {
        number.push_str(spec.decimal_separator);
        number.push_str(fraction);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let space = if spec.symbol_spacing {
        NBSP.to_string()
    } else {
        String::new()
    };
    let symbol = currency.symbol();

    Ok(match spec.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{symbol}{space}{number}"),
        SymbolPosition::Suffix => format!("{sign}{number}{space}{symbol}"),
    })
}

/// Inserts `separator` every three digits from the right.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Compact Formatting
// =============================================================================

/// Formats amounts for dashboard cards: `M`/`K` suffixes for large values,
/// full locale formatting below 1,000.
///
/// ## Example
/// ```rust
/// use kassa_core::format::format_large_currency;
///
/// assert_eq!(format_large_currency(1_500_000.0, "USD"), "$1.5M");
/// assert_eq!(format_large_currency(2_500.0, "USD"), "$2.5K");
/// assert_eq!(format_large_currency(42.0, "USD"), "$42.00");
/// ```
///
/// ## Negative Amounts
/// Suffixes only apply to amounts >= 1,000, so `-2500` takes the locale
/// path and renders as `"-$2,500.00"`.
pub fn format_large_currency(amount: f64, code: &str) -> String {
    let symbol = currency_symbol(code);

    if amount >= MILLION {
        return format!("{}{}M", symbol, to_fixed(amount / MILLION, 1));
    }
    if amount >= THOUSAND {
        return format!("{}{}K", symbol, to_fixed(amount / THOUSAND, 1));
    }

    format_locale(amount, code).unwrap_or_else(|_| {
        let decimals = Currency::from_code(code)
            .map_or(2, |c| c.format_spec().decimal_places);
        format!("{}{}", symbol, to_fixed(amount, decimals))
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.5, "USD"), "$1234.50");
        assert_eq!(format_currency(0.0, "EUR"), "€0.00");
        assert_eq!(format_currency(99.999, "GBP"), "£100.00");
        assert_eq!(format_currency(10.0, "ZAR"), "R10.00");
    }

    #[test]
    fn test_format_currency_ksh_has_no_decimals() {
        assert_eq!(format_currency(1234.5, "KSH"), "KSh1235");
        assert_eq!(format_currency(1234.4, "KSH"), "KSh1234");
        assert_eq!(format_currency(0.5, "KSH"), "KSh1");
    }

    #[test]
    fn test_format_currency_negative_is_not_rejected() {
        assert_eq!(format_currency(-5.0, "USD"), "$-5.00");
    }

    #[test]
    fn test_format_currency_unknown_code_uses_code() {
        assert_eq!(format_currency(12.0, "XYZ"), "XYZ12.00");
    }

    #[test]
    fn test_symbol_and_name_fallback() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("KSH"), "KSh");
        assert_eq!(currency_symbol("BTC"), "BTC");
        assert_eq!(currency_name("ZAR"), "South African Rand");
        assert_eq!(currency_name("BTC"), "BTC");
    }

    #[test]
    fn test_to_fixed_ties_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(1.5, 1), "1.5");
    }

    #[test]
    fn test_to_fixed_uses_binary_value() {
        // 1.005 is stored just below the midpoint
        assert_eq!(to_fixed(1.005, 2), "1.00");
    }

    #[test]
    fn test_to_fixed_sign_of_zero() {
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-0.4, 0), "-0");
        assert_eq!(format_currency(-0.0, "USD"), "$0.00");
        assert_eq!(format_currency(-0.001, "USD"), "$-0.00");
    }

    #[test]
    fn test_to_fixed_matches_binary_rounding() {
        assert_eq!(to_fixed(8.345, 2), "8.35");
        assert_eq!(to_fixed(1.45, 1), "1.4");
    }

    #[test]
    fn test_to_fixed_large_values_print_all_digits() {
        assert_eq!(to_fixed(1e21, 0), "1000000000000000000000");
        assert_eq!(to_fixed(-1e21, 0), "-1000000000000000000000");
    }

    #[test]
    fn test_to_fixed_pads_and_handles_non_finite() {
        assert_eq!(to_fixed(7.0, 2), "7.00");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 0), "-Infinity");
    }

    #[test]
    fn test_format_large_currency_suffixes() {
        assert_eq!(format_large_currency(1_500_000.0, "USD"), "$1.5M");
        assert_eq!(format_large_currency(1_000_000.0, "GBP"), "£1.0M");
        assert_eq!(format_large_currency(2_500.0, "USD"), "$2.5K");
        assert_eq!(format_large_currency(999_999.0, "EUR"), "€1000.0K");
        assert_eq!(format_large_currency(12_340.0, "KSH"), "KSh12.3K");
    }

    #[test]
    fn test_format_large_currency_locale_path() {
        assert_eq!(format_large_currency(42.0, "USD"), "$42.00");
        assert_eq!(format_large_currency(42.0, "EUR"), "42,00\u{a0}€");
        assert_eq!(format_large_currency(999.4, "KSH"), "KSh\u{a0}999");
        assert_eq!(format_large_currency(-2_500.0, "USD"), "-$2,500.00");
        assert_eq!(
            format_large_currency(-1_234.5, "ZAR"),
            "-R\u{a0}1\u{a0}234,50"
        );
    }

    #[test]
    fn test_format_large_currency_fallbacks() {
        // Unknown code: locale formatting fails, manual rendering kicks in
        assert_eq!(format_large_currency(42.0, "XYZ"), "XYZ42.00");
        assert_eq!(format_large_currency(5_000.0, "XYZ"), "XYZ5.0K");
        // Non-finite amount on a known code
        assert_eq!(format_large_currency(f64::NAN, "USD"), "$NaN");
    }

    #[test]
    fn test_format_locale_errors() {
        assert_eq!(
            format_locale(1.0, "XYZ"),
            Err(FormatError::UnknownCurrency("XYZ".to_string()))
        );
        assert!(matches!(
            format_locale(f64::INFINITY, "USD"),
            Err(FormatError::NonFiniteAmount(_))
        ));
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("1234567", "."), "1.234.567");
    }
}
