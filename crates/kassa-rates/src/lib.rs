//! # kassa-rates: Rate Provisioning for Kassa POS
//!
//! Everything around the converter that touches the outside world: the
//! currency config file, environment overrides, the seed rate table, and
//! the one shared converter instance report pages read from.
//!
//! ## Startup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rate Provisioning Flow                           │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  RatesConfig::load_or_default(None)                              │  │
//! │  │    defaults ─► currency.toml ─► KASSA_* env ─► validate          │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │  ┌────────────────────────────▼─────────────────────────────────────┐  │
//! │  │  CurrencyState::new(config)                                      │  │
//! │  │    one Arc<CurrencyConverter>, seeded by seed_rates():           │  │
//! │  │    MOCK_RATES (if enabled) then [[rates]] entries                │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ price_in       │  │ price_sheet    │  │ total_in_currency      │    │
//! │  │ one price      │  │ every currency │  │ mixed-currency report  │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Currency config (store currencies, seeding, explicit rates)
//! - [`error`] - Config error types
//! - [`seed`] - Mock rate table and startup seeding
//! - [`state`] - Shared `CurrencyState`
//! - [`pricing`] - Converted prices and report totals
//!
//! ## Usage
//!
//! ```rust
//! use kassa_rates::{CurrencyState, RatesConfig};
//! use kassa_core::Currency;
//!
//! let state = CurrencyState::new(RatesConfig::default());
//!
//! let converter = state.converter();
//! let eur = converter.convert(100.0, Currency::USD, Currency::EUR, None);
//! assert_eq!(eur, 92.0);
//! assert!(!converter.are_rates_stale());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod pricing;
pub mod seed;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{RateEntry, RatesConfig, SeedSettings, StoreCurrencySettings};
pub use error::{RatesError, RatesResult};
pub use pricing::{price_in, price_sheet, total_in_currency, ConvertedPrice, ReportTotal};
pub use seed::{mock_rates, seed_rates, MOCK_RATES};
pub use state::CurrencyState;
