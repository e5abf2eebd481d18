//! # Seed Rates
//!
//! The static rate table the dashboard ships with, and the startup routine
//! that loads it (plus any configured rates) into a converter.
//!
//! ## Seeding Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  seed_rates(converter, config)                                          │
//! │       │                                                                 │
//! │       ├── config.seed.mock_rates? ──► MOCK_RATES (10 directed pairs)    │
//! │       │                                                                 │
//! │       └── config.rates ─────────────► explicit entries (override mock)  │
//! │                                                                         │
//! │  Both directions of every mock pair are listed explicitly. Nothing is  │
//! │  inverted at runtime: EUR→GBP is simply not available.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kassa_core::{Currency, CurrencyConverter, ExchangeRate};
use tracing::info;

use crate::config::RatesConfig;

/// Static mock rates, USD against every other registry currency.
pub const MOCK_RATES: &[(Currency, Currency, f64)] = &[
    (Currency::USD, Currency::EUR, 0.92),
    (Currency::EUR, Currency::USD, 1.09),
    (Currency::USD, Currency::GBP, 0.79),
    (Currency::GBP, Currency::USD, 1.27),
    (Currency::USD, Currency::CAD, 1.36),
    (Currency::CAD, Currency::USD, 0.74),
    (Currency::USD, Currency::KSH, 129.5),
    (Currency::KSH, Currency::USD, 0.0077),
    (Currency::USD, Currency::ZAR, 18.2),
    (Currency::ZAR, Currency::USD, 0.055),
];

/// Returns [`MOCK_RATES`] as converter entries.
pub fn mock_rates() -> Vec<ExchangeRate> {
    MOCK_RATES
        .iter()
        .map(|(from, to, rate)| ExchangeRate {
            from: from.code().to_string(),
            to: to.code().to_string(),
            rate: *rate,
        })
        .collect()
}

/// Loads mock rates (if enabled) and configured rates into `converter`.
///
/// Returns the number of rate writes performed. Configured entries for a
/// direction already present in the mock table overwrite it.
pub fn seed_rates(converter: &CurrencyConverter, config: &RatesConfig) -> usize {
    let mut written = 0;

    if config.seed.mock_rates {
        written += converter.set_rates(mock_rates());
    }

    written += converter.set_rates(config.rates.iter().cloned().map(ExchangeRate::from));

    info!(
        written,
        stored = converter.rate_count(),
        mock = config.seed.mock_rates,
        "Seeded exchange rates"
    );
    written
}
