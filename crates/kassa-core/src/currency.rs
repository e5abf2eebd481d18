//! # Currency Registry
//!
//! The closed set of currencies Kassa POS can price and report in.
//!
//! ## Registry Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Currency Registry                               │
//! │                                                                         │
//! │  Code   Name                  Symbol   Locale   Decimals   Placement   │
//! │  ────   ────────────────────  ──────   ──────   ────────   ─────────   │
//! │  USD    US Dollar             $        en-US    2          $1,234.50   │
//! │  EUR    Euro                  €        de-DE    2          1.234,50 €  │
//! │  GBP    British Pound         £        en-GB    2          £1,234.50   │
//! │  CAD    Canadian Dollar       C$       en-CA    2          C$1,234.50  │
//! │  KSH    Kenyan Shilling       KSh      en-KE    0          KSh 1,235   │
//! │  ZAR    South African Rand    R        en-ZA    2          R 1 234,50  │
//! │                                                                         │
//! │  `supported_currencies()` ──► code / name / symbol (dropdowns)         │
//! │  `Currency::format_spec()` ─► locale conventions (formatting)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Codes Are Case-Sensitive
//! `Currency::from_code("usd")` is `None`. Codes arrive from the database and
//! the dashboard already upper-cased; anything else is treated as unknown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Currency
// =============================================================================

/// A supported currency.
///
/// Serializes as its registry code (`"USD"`, `"KSH"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[allow(clippy::upper_case_acronyms)]
pub enum Currency {
    /// US Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound
    GBP,
    /// Canadian Dollar
    CAD,
    /// Kenyan Shilling (registry code is KSH, not the ISO KES)
    KSH,
    /// South African Rand
    ZAR,
}

impl Currency {
    /// All registry currencies, in display order.
    pub const ALL: [Currency; 6] = [
        Currency::USD,
        Currency::EUR,
        Currency::GBP,
        Currency::CAD,
        Currency::KSH,
        Currency::ZAR,
    ];

    /// Returns the registry code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::CAD => "CAD",
            Currency::KSH => "KSH",
            Currency::ZAR => "ZAR",
        }
    }

    /// Returns the display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::GBP => "British Pound",
            Currency::CAD => "Canadian Dollar",
            Currency::KSH => "Kenyan Shilling",
            Currency::ZAR => "South African Rand",
        }
    }

    /// Returns the display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "C$",
            Currency::KSH => "KSh",
            Currency::ZAR => "R",
        }
    }

    /// Returns the locale formatting convention for this currency.
    pub const fn format_spec(&self) -> FormatSpec {
        match self {
            Currency::USD => FormatSpec::prefix("en-US", 2, ",", "."),
            Currency::EUR => FormatSpec {
                locale: "de-DE",
                decimal_places: 2,
                symbol_position: SymbolPosition::Suffix,
                symbol_spacing: true,
                group_separator: ".",
                decimal_separator: ",",
            },
            Currency::GBP => FormatSpec::prefix("en-GB", 2, ",", "."),
            Currency::CAD => FormatSpec::prefix("en-CA", 2, ",", "."),
            Currency::KSH => FormatSpec {
                symbol_spacing: true,
                ..FormatSpec::prefix("en-KE", 0, ",", ".")
            },
            Currency::ZAR => FormatSpec {
                symbol_spacing: true,
                ..FormatSpec::prefix("en-ZA", 2, "\u{a0}", ",")
            },
        }
    }

    /// Looks up a currency by its exact registry code.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Currency;
    ///
    /// assert_eq!(Currency::from_code("KSH"), Some(Currency::KSH));
    /// assert_eq!(Currency::from_code("XYZ"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        Currency::ALL.into_iter().find(|c| c.code() == code)
    }

    /// Returns all registry currencies.
    pub fn all() -> Vec<Currency> {
        Currency::ALL.to_vec()
    }

    /// Returns the registry entry for this currency.
    pub const fn info(&self) -> CurrencyInfo {
        CurrencyInfo {
            code: self.code(),
            name: self.name(),
            symbol: self.symbol(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        self.code()
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s)
            .ok_or_else(|| CoreError::UnsupportedCurrency(s.to_string()))
    }
}

// =============================================================================
// Registry Entries
// =============================================================================

/// A `{code, name, symbol}` registry entry, as listed in currency pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

/// Returns the static list of supported currencies.
pub fn supported_currencies() -> Vec<CurrencyInfo> {
    Currency::ALL.iter().map(Currency::info).collect()
}

// =============================================================================
// Locale Conventions
// =============================================================================

/// Where the symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Locale formatting convention for one currency.
///
/// ## Note
/// `decimal_places` is what locale-aware formatting uses. The fixed
/// formatter [`crate::format::format_currency`] has its own rule and does
/// not read this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// BCP 47 locale tag the convention is modelled on.
    pub locale: &'static str,

    /// Fraction digits rendered.
    pub decimal_places: u32,

    pub symbol_position: SymbolPosition,

    /// Separate symbol and number with a no-break space.
    pub symbol_spacing: bool,

    /// Thousands separator.
    pub group_separator: &'static str,

    pub decimal_separator: &'static str,
}

impl FormatSpec {
    const fn prefix(
        locale: &'static str,
        decimal_places: u32,
        group_separator: &'static str,
        decimal_separator: &'static str,
    ) -> Self {
        FormatSpec {
            locale,
            decimal_places,
            symbol_position: SymbolPosition::Prefix,
            symbol_spacing: false,
            group_separator,
            decimal_separator,
        }
    }
}

// =============================================================================
// Currency Pair
// =============================================================================

/// A directed exchange-rate key: amounts in `from` times the rate give
/// amounts in `to`.
///
/// Codes are kept as strings so the converter can hold rates for codes
/// outside the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: impl AsRef<str>, to: impl AsRef<str>) -> Self {
        CurrencyPair {
            from: from.as_ref().to_string(),
            to: to.as_ref().to_string(),
        }
    }

    /// The opposite direction. Nothing is derived from it; it is only a key.
    pub fn reversed(&self) -> Self {
        CurrencyPair {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
