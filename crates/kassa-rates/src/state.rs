//! # Currency State
//!
//! The one converter instance the whole process shares.
//!
//! ## Why Not a Global?
//! Instead of a `static` singleton, the converter is built once at startup
//! and handed to whoever needs it. Request handlers and report builders
//! declare `&CurrencyState` (or clone it) and all see the same table.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  startup:  RatesConfig::load_or_default ──► CurrencyState::new(config) │
//! │                                                   │                     │
//! │                                   seeds one Arc<CurrencyConverter>      │
//! │                                                   │                     │
//! │          ┌────────────────────────┬───────────────┴──────────┐          │
//! │          ▼                        ▼                          ▼          │
//! │  ┌──────────────┐        ┌──────────────┐          ┌──────────────┐    │
//! │  │ Sales report │        │ P&L report   │          │ Price manager│    │
//! │  │ state.clone()│        │ state.clone()│          │ state.clone()│    │
//! │  └──────────────┘        └──────────────┘          └──────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Converter: internal RwLock, safe to share across request threads   │
//! │  • Config: read-only after startup (Arc)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use kassa_core::CurrencyConverter;
use tracing::info;

use crate::config::RatesConfig;
use crate::pricing::{price_in, ConvertedPrice};
use crate::seed::seed_rates;

/// Shared currency context.
///
/// Cloning is cheap and shares the same converter.
#[derive(Debug, Clone)]
pub struct CurrencyState {
    converter: Arc<CurrencyConverter>,
    config: Arc<RatesConfig>,
}

impl CurrencyState {
    /// Builds a fresh converter and seeds it from `config`.
    pub fn new(config: RatesConfig) -> Self {
        Self::with_converter(config, Arc::new(CurrencyConverter::new()))
    }

    /// Wraps an existing converter (e.g. one on a manual clock) and seeds it.
    pub fn with_converter(config: RatesConfig, converter: Arc<CurrencyConverter>) -> Self {
        seed_rates(&converter, &config);
        CurrencyState {
            converter,
            config: Arc::new(config),
        }
    }

    /// Returns the shared converter. Every call hands out the same instance.
    pub fn converter(&self) -> Arc<CurrencyConverter> {
        Arc::clone(&self.converter)
    }

    pub fn config(&self) -> &RatesConfig {
        &self.config
    }

    /// Drops every stored rate and loads the configured set again.
    ///
    /// This is the only way the staleness clock moves: the table passes
    /// through Empty, and the first re-seeded rate stamps a new time.
    pub fn reseed(&self) -> usize {
        self.converter.clear_rates();
        let written = seed_rates(&self.converter, &self.config);
        info!(written, "Re-seeded exchange rates");
        written
    }

    /// Converts a base-currency amount into the display currency.
    pub fn display_price(&self, amount: f64) -> ConvertedPrice {
        price_in(
            &self.converter,
            amount,
            self.config.base_currency(),
            self.config.display_currency(),
        )
    }
}
