//! # Multi-Currency Pricing
//!
//! Converted amounts for the price manager and report pages.
//!
//! ## Why Not Just `convert`?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  converter.convert(10.0, USD, EUR, None) with no USD→EUR rate           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  returns 10.0  ── formatted as "€10.00" ──► WRONG: that is $10.00       │
//! │                                                                         │
//! │  price_in(converter, 10.0, USD, EUR)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ConvertedPrice { amount: 10.0, formatted: "$10.00", converted: false } │
//! │                                                                         │
//! │  The UI greys out / badges unconverted prices instead of mislabelling  │
//! │  them.                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kassa_core::format::{format_currency, format_large_currency};
use kassa_core::{Currency, CurrencyConverter};
use serde::Serialize;
use tracing::warn;
use ts_rs::TS;

// =============================================================================
// Single Prices
// =============================================================================

/// A price rendered in a requested currency.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ConvertedPrice {
    /// Currency the caller asked for.
    pub currency: Currency,

    /// Converted amount, or the original amount when `converted` is false.
    pub amount: f64,

    /// Display string. Uses the SOURCE currency symbol when unconverted.
    pub formatted: String,

    /// False when no rate existed for the direction.
    pub converted: bool,
}

/// Converts one price into `to`.
///
/// The rate table is read once. A rate written by another thread after that
/// read does not turn an unconverted price into a mislabelled one.
pub fn price_in(
    converter: &CurrencyConverter,
    amount: f64,
    from: Currency,
    to: Currency,
) -> ConvertedPrice {
    match converter.try_convert(amount, from, to) {
        Some(value) => ConvertedPrice {
            currency: to,
            amount: value,
            formatted: format_currency(value, to.code()),
            converted: true,
        },
        None => {
            warn!(
                from = %from,
                to = %to,
                "No exchange rate available, price left in source currency"
            );
            ConvertedPrice {
                currency: to,
                amount,
                formatted: format_currency(amount, from.code()),
                converted: false,
            }
        }
    }
}

/// Converts one price into every registry currency, in registry order.
pub fn price_sheet(
    converter: &CurrencyConverter,
    amount: f64,
    from: Currency,
) -> Vec<ConvertedPrice> {
    Currency::ALL
        .iter()
        .map(|&to| price_in(converter, amount, from, to))
        .collect()
}

// =============================================================================
// Report Totals
// =============================================================================

/// A report total summed across lines recorded in mixed currencies.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportTotal {
    pub currency: Currency,

    /// Sum of `convert` results. Unconverted lines are included as-is.
    pub total: f64,

    /// `format_currency` of `total`.
    pub formatted: String,

    /// `format_large_currency` of `total`, for dashboard cards.
    pub compact: String,

    /// Lines whose currency had no rate into `currency`.
    pub unconverted_lines: usize,
}

impl ReportTotal {
    /// True when every line was actually converted.
    pub fn is_exact(&self) -> bool {
        self.unconverted_lines == 0
    }
}

/// Sums `(amount, currency)` lines in `target`.
///
/// ## Example
/// ```rust
/// use kassa_core::{Currency, CurrencyConverter};
/// use kassa_rates::pricing::total_in_currency;
///
/// let converter = CurrencyConverter::new();
/// converter.set_rate(Currency::EUR, Currency::USD, 1.5);
///
/// let lines = [(100.0, Currency::USD), (10.0, Currency::EUR)];
/// let total = total_in_currency(&converter, &lines, Currency::USD);
/// assert_eq!(total.total, 115.0);
/// assert_eq!(total.formatted, "$115.00");
/// assert!(total.is_exact());
/// ```
pub fn total_in_currency(
    converter: &CurrencyConverter,
    lines: &[(f64, Currency)],
    target: Currency,
) -> ReportTotal {
    let mut total = 0.0;
    let mut unconverted_lines = 0;

    for &(amount, currency) in lines {
        let price = price_in(converter, amount, currency, target);
        if !price.converted {
            unconverted_lines += 1;
        }
        total += price.amount;
    }

    ReportTotal {
        currency: target,
        total,
        formatted: format_currency(total, target.code()),
        compact: format_large_currency(total, target.code()),
        unconverted_lines,
    }
}
