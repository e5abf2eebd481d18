//! # kassa-core: Pure Currency Logic for Kassa POS
//!
//! Every amount the dashboard shows in more than one currency passes through
//! this crate: the currency registry, the display formatters, the amount
//! validators, and the shared exchange-rate converter.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kassa POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Dashboard (report pages, price manager)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          kassa-rates (config, seed data, CurrencyState)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kassa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ currency  │  │  format   │  │ converter │  │ validation│  │   │
//! │  │   │ Registry  │  │ $1.5M     │  │ rate table│  │ amounts   │  │   │
//! │  │   │ Pair      │  │ KSh1235   │  │ staleness │  │ codes     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • TIME VIA `Clock`          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - Registry (`Currency`, `CurrencyInfo`, `FormatSpec`, `CurrencyPair`)
//! - [`format`] - Display strings (`format_currency`, `format_large_currency`, ...)
//! - [`validation`] - Amount / code / rate checks
//! - [`converter`] - `CurrencyConverter` rate table
//! - [`clock`] - Injectable time source
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Degrade, Don't Fail**: formatters and `convert` always return something displayable
//! 2. **No I/O**: rates arrive through `set_rate`, never fetched here
//! 3. **Directed Rates**: nothing is inverted or derived
//! 4. **Injected Time**: staleness is computed from a `Clock`, so it is testable
//!
//! ## Example Usage
//!
//! ```rust
//! use kassa_core::format::{format_currency, format_large_currency};
//! use kassa_core::{Currency, CurrencyConverter};
//!
//! let converter = CurrencyConverter::new();
//! converter.set_rate(Currency::USD, Currency::KSH, 130.0);
//!
//! let revenue_usd = 2_500.0;
//! let revenue_ksh = converter.convert(revenue_usd, Currency::USD, Currency::KSH, None);
//!
//! assert_eq!(format_currency(revenue_ksh, "KSH"), "KSh325000");
//! assert_eq!(format_large_currency(revenue_usd, "USD"), "$2.5K");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod converter;
pub mod currency;
pub mod error;
pub mod format;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, ManualClock, SystemClock};
pub use converter::{CurrencyConverter, ExchangeRate};
pub use currency::{supported_currencies, Currency, CurrencyInfo, CurrencyPair, FormatSpec};
pub use error::{CoreError, CoreResult, FormatError, ValidationError};
pub use format::{currency_name, currency_symbol, format_currency, format_large_currency};
pub use validation::{is_supported_currency, is_valid_currency_amount};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hours after the first stored rate before the table counts as stale.
pub const RATE_STALENESS_HOURS: i64 = 24;

/// Currency prices are recorded in when nothing else is configured.
pub const DEFAULT_BASE_CURRENCY: Currency = Currency::USD;
