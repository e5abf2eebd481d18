//! # Currency Converter
//!
//! The shared exchange-rate table every report page and the price manager
//! convert through.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Converter State Machine                             │
//! │                                                                         │
//! │   ┌─────────┐   set_rate (first)   ┌────────────┐   > 24h elapsed      │
//! │   │  EMPTY  │ ───────────────────► │ POPULATED  │ ─ ─ ─ ─ ─ ─ ─ ─ ┐    │
//! │   │         │  last_updated = now  │            │                 ▼    │
//! │   │ no rates│                      │ ≥ 1 rate   │           ┌─────────┐│
//! │   │ stale   │ ◄─────────────────── │ fresh      │           │  STALE  ││
//! │   └─────────┘     clear_rates      └────────────┘           │(derived)││
//! │        ▲                               │  ▲                 └────┬────┘│
//! │        │                               └──┘                      │     │
//! │        │                      set_rate (later): rate stored,     │     │
//! │        │                      last_updated NOT refreshed         │     │
//! │        └─────────────────────────────────────────────────────────┘     │
//! │                                clear_rates                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conversion Policy
//! ```text
//! convert(amount, from, to, fallback)
//!      │
//!      ├── from == to ─────────────► amount            (no lookup at all)
//!      │
//!      ├── stored rate for from→to ► amount × rate
//!      │
//!      ├── fallback given ─────────► amount × fallback
//!      │
//!      └── nothing ────────────────► amount + warn!    (NOT converted)
//! ```
//! A missing rate never fails: the dashboard keeps rendering. Callers that
//! must know whether conversion happened use [`CurrencyConverter::try_convert`]
//! or check [`CurrencyConverter::get_rate`] first.
//!
//! ## Directed Rates
//! `USD→EUR` and `EUR→USD` are separate entries. Nothing is inverted or
//! triangulated through a third currency.
//!
//! ## Thread Safety
//! The table sits behind an `RwLock`. Conversions take the read lock, rate
//! writes take the write lock, so a rate written before a `convert` call
//! (same thread, or after a join/barrier) is always observed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::clock::{Clock, SystemClock};
use crate::currency::CurrencyPair;
use crate::RATE_STALENESS_HOURS;

// =============================================================================
// Exchange Rate Snapshot
// =============================================================================

/// One stored directed rate, as listed by the price manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

// =============================================================================
// Converter
// =============================================================================

#[derive(Debug, Default)]
struct RateTable {
    rates: HashMap<CurrencyPair, f64>,

    /// Set when the table goes from empty to non-empty. Never refreshed by
    /// later writes.
    last_updated: Option<DateTime<Utc>>,
}

/// Process-wide exchange-rate table.
///
/// Construct one at startup and share it (`Arc<CurrencyConverter>`); see
/// `kassa_rates::CurrencyState`.
///
/// ## Example
/// ```rust
/// use kassa_core::{Currency, CurrencyConverter};
///
/// let converter = CurrencyConverter::new();
/// converter.set_rate(Currency::USD, Currency::EUR, 0.5);
///
/// assert_eq!(converter.convert(10.0, Currency::USD, Currency::EUR, None), 5.0);
/// assert_eq!(converter.get_rate(Currency::EUR, Currency::USD), None);
/// assert_eq!(converter.convert(10.0, Currency::EUR, Currency::USD, Some(2.0)), 20.0);
/// assert_eq!(converter.convert(10.0, Currency::EUR, Currency::EUR, None), 10.0);
/// ```
#[derive(Debug)]
pub struct CurrencyConverter {
    table: RwLock<RateTable>,
    clock: Arc<dyn Clock>,
}

impl CurrencyConverter {
    /// Creates an empty converter on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty converter reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        CurrencyConverter {
            table: RwLock::new(RateTable::default()),
            clock,
        }
    }

    // =========================================================================
    // Rate Table
    // =========================================================================

    /// Stores (or overwrites) the rate for the `from → to` direction.
    ///
    /// The first rate stored into an empty table stamps `last_updated`;
    /// later calls leave the stamp alone.
    pub fn set_rate(&self, from: impl AsRef<str>, to: impl AsRef<str>, rate: f64) {
        let pair = CurrencyPair::new(from, to);
        let mut table = self.write();

        if table.last_updated.is_none() {
            table.last_updated = Some(self.clock.now());
        }

        debug!(pair = %pair, rate, "Setting exchange rate");
        table.rates.insert(pair, rate);
    }

    /// Stores many rates under a single lock acquisition.
    ///
    /// Returns how many entries were written.
    pub fn set_rates<I>(&self, rates: I) -> usize
    where
        I: IntoIterator<Item = ExchangeRate>,
    {
        let mut table = self.write();
        let mut written = 0;

        for ExchangeRate { from, to, rate } in rates {
            if table.last_updated.is_none() {
                table.last_updated = Some(self.clock.now());
            }
            table.rates.insert(CurrencyPair { from, to }, rate);
            written += 1;
        }

        debug!(count = written, "Stored exchange rates");
        written
    }

    /// Returns the stored rate for exactly `from → to`.
    ///
    /// No identity shortcut: `get_rate(X, X)` is `None` unless someone
    /// stored it.
    pub fn get_rate(&self, from: impl AsRef<str>, to: impl AsRef<str>) -> Option<f64> {
        let pair = CurrencyPair::new(from, to);
        self.read().rates.get(&pair).copied()
    }

    /// Empties the table and clears `last_updated`.
    pub fn clear_rates(&self) {
        let mut table = self.write();
        let cleared = table.rates.len();
        table.rates.clear();
        table.last_updated = None;
        info!(cleared, "Cleared exchange rates");
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// Converts `amount` from one currency to another.
    ///
    /// See the module docs for the policy. The result is NOT guaranteed to
    /// be in `to` when neither a stored rate nor `fallback_rate` exists.
    pub fn convert(
        &self,
        amount: f64,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
        fallback_rate: Option<f64>,
    ) -> f64 {
        let (from, to) = (from.as_ref(), to.as_ref());

        if from == to {
            return amount;
        }

        if let Some(rate) = self.get_rate(from, to) {
            return amount * rate;
        }

        if let Some(rate) = fallback_rate {
            return amount * rate;
        }

        warn!(
            from = %from,
            to = %to,
            "No exchange rate available, amount left unconverted"
        );
        amount
    }

    /// Like [`convert`](Self::convert) without a fallback, but reports the
    /// missing-rate case as `None` instead of returning `amount`.
    pub fn try_convert(
        &self,
        amount: f64,
        from: impl AsRef<str>,
        to: impl AsRef<str>,
    ) -> Option<f64> {
        let (from, to) = (from.as_ref(), to.as_ref());

        if from == to {
            return Some(amount);
        }

        self.get_rate(from, to).map(|rate| amount * rate)
    }

    // =========================================================================
    // Staleness
    // =========================================================================

    /// True when no rate was ever stored (or the table was cleared), or when
    /// more than [`RATE_STALENESS_HOURS`] have passed since the first rate
    /// went in.
    pub fn are_rates_stale(&self) -> bool {
        match self.read().last_updated {
            None => true,
            Some(stamped) => {
                self.clock.now() - stamped > Duration::hours(RATE_STALENESS_HOURS)
            }
        }
    }

    /// When the table was first populated.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.read().last_updated
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Number of stored directed rates.
    pub fn rate_count(&self) -> usize {
        self.read().rates.len()
    }

    /// All stored rates, sorted by `(from, to)`.
    pub fn rates(&self) -> Vec<ExchangeRate> {
        let table = self.read();
        let mut pairs: Vec<(&CurrencyPair, &f64)> = table.rates.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(pair, rate)| ExchangeRate {
                from: pair.from.clone(),
                to: pair.to.clone(),
                rate: *rate,
            })
            .collect()
    }

    // A panic elsewhere while holding the lock leaves the map intact (every
    // write is a single insert/clear), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, RateTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RateTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::currency::Currency;
    use std::sync::Barrier;
    use std::thread;

    fn converter_with_manual_clock() -> (CurrencyConverter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let converter = CurrencyConverter::with_clock(clock.clone());
        (converter, clock)
    }

    #[test]
    fn test_identity_conversion_without_rates() {
        let converter = CurrencyConverter::new();
        for currency in Currency::all() {
            assert_eq!(converter.convert(123.45, currency, currency, None), 123.45);
            assert_eq!(
                converter.convert(-7.0, currency, currency, Some(3.0)),
                -7.0
            );
        }
    }

    #[test]
    fn test_identity_conversion_ignores_stored_rate() {
        let converter = CurrencyConverter::new();
        converter.set_rate("USD", "USD", 2.0);
        assert_eq!(converter.convert(10.0, "USD", "USD", None), 10.0);
        // get_rate has no identity shortcut
        assert_eq!(converter.get_rate("USD", "USD"), Some(2.0));
        assert_eq!(converter.get_rate("EUR", "EUR"), None);
    }

    #[test]
    fn test_convert_with_stored_rate() {
        let converter = CurrencyConverter::new();
        converter.set_rate(Currency::USD, Currency::KSH, 129.5);
        assert_eq!(
            converter.convert(20.0, Currency::USD, Currency::KSH, None),
            20.0 * 129.5
        );
        // Stored rate wins over fallback
        assert_eq!(
            converter.convert(20.0, Currency::USD, Currency::KSH, Some(1.0)),
            20.0 * 129.5
        );
    }

    #[test]
    fn test_rates_are_directed() {
        let converter = CurrencyConverter::new();
        converter.set_rate("USD", "EUR", 0.92);
        assert_eq!(converter.get_rate("USD", "EUR"), Some(0.92));
        assert_eq!(converter.get_rate("EUR", "USD"), None);

        let pair = CurrencyPair::new("USD", "EUR").reversed();
        converter.set_rate(&pair.from, &pair.to, 1.1);
        assert_eq!(converter.get_rate("USD", "EUR"), Some(0.92));
        assert_eq!(converter.get_rate("EUR", "USD"), Some(1.1));
    }

    #[test]
    fn test_no_cross_rate_derivation() {
        let converter = CurrencyConverter::new();
        converter.set_rate("EUR", "USD", 1.1);
        converter.set_rate("USD", "GBP", 0.8);
        assert_eq!(converter.get_rate("EUR", "GBP"), None);
        assert_eq!(converter.convert(10.0, "EUR", "GBP", None), 10.0);
    }

    #[test]
    fn test_missing_rate_returns_amount_unchanged() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.convert(55.0, "USD", "ZAR", None), 55.0);
        assert_eq!(converter.try_convert(55.0, "USD", "ZAR"), None);
    }

    #[test]
    fn test_missing_rate_uses_fallback() {
        let converter = CurrencyConverter::new();
        assert_eq!(converter.convert(10.0, "USD", "ZAR", Some(18.25)), 182.5);
        // Fallback does not get stored
        assert_eq!(converter.get_rate("USD", "ZAR"), None);
    }

    #[test]
    fn test_try_convert() {
        let converter = CurrencyConverter::new();
        converter.set_rate("GBP", "USD", 1.25);
        assert_eq!(converter.try_convert(8.0, "GBP", "USD"), Some(10.0));
        assert_eq!(converter.try_convert(8.0, "GBP", "GBP"), Some(8.0));
        assert_eq!(converter.try_convert(8.0, "USD", "GBP"), None);
    }

    #[test]
    fn test_set_rate_overwrites() {
        let converter = CurrencyConverter::new();
        converter.set_rate("USD", "CAD", 1.30);
        converter.set_rate("USD", "CAD", 1.36);
        assert_eq!(converter.get_rate("USD", "CAD"), Some(1.36));
        assert_eq!(converter.rate_count(), 1);
    }

    #[test]
    fn test_empty_converter_is_stale() {
        let converter = CurrencyConverter::new();
        assert!(converter.are_rates_stale());
        assert_eq!(converter.last_updated(), None);
    }

    #[test]
    fn test_fresh_after_first_rate_and_stale_after_24h() {
        let (converter, clock) = converter_with_manual_clock();
        converter.set_rate("USD", "EUR", 0.92);
        assert!(!converter.are_rates_stale());

        clock.advance(Duration::hours(24));
        assert!(!converter.are_rates_stale(), "exactly 24h is not stale");

        clock.advance(Duration::seconds(1));
        assert!(converter.are_rates_stale());
    }

    #[test]
    fn test_later_set_rate_does_not_refresh_staleness_clock() {
        let (converter, clock) = converter_with_manual_clock();
        converter.set_rate("USD", "EUR", 0.92);
        let first_stamp = converter.last_updated();

        clock.advance(Duration::hours(20));
        converter.set_rate("USD", "GBP", 0.79);
        assert_eq!(converter.last_updated(), first_stamp);

        // 25h after the first write, 5h after the second: still stale
        clock.advance(Duration::hours(5));
        assert!(converter.are_rates_stale());
    }

    #[test]
    fn test_clear_rates_returns_to_empty() {
        let (converter, clock) = converter_with_manual_clock();
        converter.set_rate("USD", "EUR", 0.92);
        converter.set_rate("EUR", "USD", 1.09);

        converter.clear_rates();
        assert!(converter.are_rates_stale());
        assert_eq!(converter.get_rate("USD", "EUR"), None);
        assert_eq!(converter.get_rate("EUR", "USD"), None);
        assert_eq!(converter.rate_count(), 0);

        // Next write stamps a new time
        clock.advance(Duration::hours(30));
        converter.set_rate("USD", "EUR", 0.93);
        assert_eq!(converter.last_updated(), Some(clock.now()));
        assert!(!converter.are_rates_stale());
    }

    #[test]
    fn test_set_rates_bulk_and_listing() {
        let (converter, clock) = converter_with_manual_clock();
        let written = converter.set_rates(vec![
            ExchangeRate {
                from: "USD".into(),
                to: "ZAR".into(),
                rate: 18.2,
            },
            ExchangeRate {
                from: "EUR".into(),
                to: "USD".into(),
                rate: 1.09,
            },
        ]);
        assert_eq!(written, 2);
        assert_eq!(converter.last_updated(), Some(clock.now()));

        let listed = converter.rates();
        assert_eq!(listed[0].from, "EUR");
        assert_eq!(listed[1].from, "USD");
        assert_eq!(listed[1].rate, 18.2);
    }

    #[test]
    fn test_exchange_rate_serialization() {
        let rate = ExchangeRate {
            from: "USD".into(),
            to: "KSH".into(),
            rate: 129.5,
        };
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["from"], "USD");
        assert_eq!(json["rate"], 129.5);
    }

    #[test]
    fn test_concurrent_writes_then_reads() {
        const WRITERS: usize = 8;
        const READERS: usize = 8;

        let converter = Arc::new(CurrencyConverter::new());
        let barrier = Arc::new(Barrier::new(WRITERS + READERS));

        let pair_for = |i: usize| (format!("C{i:02}"), format!("D{i:02}"), 1.0 + i as f64);

        let mut handles = Vec::new();
        for i in 0..WRITERS {
            let converter = Arc::clone(&converter);
            let barrier = Arc::clone(&barrier);
            let (from, to, rate) = pair_for(i);
            handles.push(thread::spawn(move || {
                converter.set_rate(&from, &to, rate);
                barrier.wait();
            }));
        }

        for _ in 0..READERS {
            let converter = Arc::clone(&converter);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                for i in 0..WRITERS {
                    let (from, to, rate) = pair_for(i);
                    assert_eq!(converter.get_rate(&from, &to), Some(rate));
                    assert_eq!(converter.convert(2.0, &from, &to, None), 2.0 * rate);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(converter.rate_count(), WRITERS);
    }
}
