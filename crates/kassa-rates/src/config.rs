//! # Currency Configuration
//!
//! Which currency prices are recorded in, which currency reports display
//! in, and which exchange rates to seed at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     KASSA_BASE_CURRENCY=USD                                            │
//! │     KASSA_DISPLAY_CURRENCY=KSH                                         │
//! │     KASSA_SEED_MOCK_RATES=false                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/kassa-pos/currency.toml (Linux)                          │
//! │     ~/Library/Application Support/com.kassa.pos/currency.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD base, USD display, mock rates seeded                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # currency.toml
//! [store]
//! base_currency = "USD"
//! display_currency = "KSH"
//!
//! [seed]
//! mock_rates = true
//!
//! # Explicit rates override mock values for the same direction
//! [[rates]]
//! from = "USD"
//! to = "KSH"
//! rate = 131.0
//! ```

use kassa_core::validation::{validate_currency_code, validate_exchange_rate};
use kassa_core::{CoreError, Currency, CurrencyPair, ExchangeRate, DEFAULT_BASE_CURRENCY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{RatesError, RatesResult};

// =============================================================================
// Store Currency Settings
// =============================================================================

/// Currencies the store records and displays amounts in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCurrencySettings {
    /// Currency product prices and sales are recorded in.
    #[serde(default = "default_currency")]
    pub base_currency: Currency,

    /// Currency report pages convert into.
    #[serde(default = "default_currency")]
    pub display_currency: Currency,
}

fn default_currency() -> Currency {
    DEFAULT_BASE_CURRENCY
}

impl Default for StoreCurrencySettings {
    fn default() -> Self {
        StoreCurrencySettings {
            base_currency: default_currency(),
            display_currency: default_currency(),
        }
    }
}

// =============================================================================
// Seed Settings
// =============================================================================

/// Startup seeding behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSettings {
    /// Load the built-in mock rate table before configured rates.
    #[serde(default = "default_true")]
    pub mock_rates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SeedSettings {
    fn default() -> Self {
        SeedSettings { mock_rates: true }
    }
}

// =============================================================================
// Rate Entries
// =============================================================================

/// One configured directed rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

impl RateEntry {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(&self.from, &self.to)
    }
}

impl From<RateEntry> for ExchangeRate {
    fn from(entry: RateEntry) -> Self {
        ExchangeRate {
            from: entry.from,
            to: entry.to,
            rate: entry.rate,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete currency configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatesConfig {
    #[serde(default)]
    pub store: StoreCurrencySettings,

    #[serde(default)]
    pub seed: SeedSettings,

    /// Explicit rates, applied after mock rates.
    #[serde(default)]
    pub rates: Vec<RateEntry>,
}

impl RatesConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (currency.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> RatesResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading currency config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load currency config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> RatesResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| RatesError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RatesError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| RatesError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Currency config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - Rate entries name registry currencies on both sides
    /// - Rates are finite and strictly positive
    /// - A direction is configured at most once
    pub fn validate(&self) -> RatesResult<()> {
        let mut seen = HashSet::new();

        for entry in &self.rates {
            validate_currency_code(&entry.from).map_err(CoreError::from)?;
            validate_currency_code(&entry.to).map_err(CoreError::from)?;

            let pair = entry.pair();
            validate_exchange_rate(&pair, entry.rate)?;

            if !seen.insert(pair.clone()) {
                return Err(RatesError::InvalidConfig(format!(
                    "rate {} is configured more than once",
                    pair
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("KASSA_BASE_CURRENCY") {
            match validate_currency_code(&code) {
                Ok(currency) => {
                    debug!(currency = %currency, "Overriding base currency from environment");
                    self.store.base_currency = currency;
                }
                Err(e) => warn!(code = %code, error = %e, "Ignoring KASSA_BASE_CURRENCY"),
            }
        }

        if let Some(code) = lookup("KASSA_DISPLAY_CURRENCY") {
            match validate_currency_code(&code) {
                Ok(currency) => {
                    debug!(currency = %currency, "Overriding display currency from environment");
                    self.store.display_currency = currency;
                }
                Err(e) => warn!(code = %code, error = %e, "Ignoring KASSA_DISPLAY_CURRENCY"),
            }
        }

        if let Some(flag) = lookup("KASSA_SEED_MOCK_RATES") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.seed.mock_rates = true,
                "0" | "false" | "no" | "off" => self.seed.mock_rates = false,
                _ => warn!(value = %flag, "Unknown KASSA_SEED_MOCK_RATES value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "kassa", "pos")
            .map(|dirs| dirs.config_dir().join("currency.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_currency(&self) -> Currency {
        self.store.base_currency
    }

    pub fn display_currency(&self) -> Currency {
        self.store.display_currency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(from: &str, to: &str, rate: f64) -> RateEntry {
        RateEntry {
            from: from.to_string(),
            to: to.to_string(),
            rate,
        }
    }

    #[test]
    fn test_default_config() {
        let config = RatesConfig::default();
        assert_eq!(config.base_currency(), Currency::USD);
        assert_eq!(config.display_currency(), Currency::USD);
        assert!(config.seed.mock_rates);
        assert!(config.rates.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [store]
            display_currency = "KSH"

            [seed]
            mock_rates = false

            [[rates]]
            from = "USD"
            to = "KSH"
            rate = 131.0
        "#;
        let config: RatesConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_currency(), Currency::USD);
        assert_eq!(config.display_currency(), Currency::KSH);
        assert!(!config.seed.mock_rates);
        assert_eq!(config.rates, vec![entry("USD", "KSH", 131.0)]);
    }

    #[test]
    fn test_unknown_currency_in_store_section_fails_to_parse() {
        let result: Result<RatesConfig, _> = toml::from_str("[store]\nbase_currency = \"XYZ\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_rejects_bad_entries() {
        let mut config = RatesConfig::default();

        config.rates = vec![entry("USD", "BTC", 0.00002)];
        assert!(matches!(config.validate(), Err(RatesError::Core(_))));

        config.rates = vec![entry("USD", "EUR", -0.9)];
        assert!(matches!(
            config.validate(),
            Err(RatesError::Core(CoreError::InvalidExchangeRate { .. }))
        ));

        config.rates = vec![entry("USD", "EUR", 0.9), entry("USD", "EUR", 0.91)];
        assert!(matches!(config.validate(), Err(RatesError::InvalidConfig(_))));

        // Opposite directions are distinct
        config.rates = vec![entry("USD", "EUR", 0.9), entry("EUR", "USD", 1.1)];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KASSA_BASE_CURRENCY", "GBP"),
            ("KASSA_DISPLAY_CURRENCY", "ZAR"),
            ("KASSA_SEED_MOCK_RATES", "off"),
        ]
        .into_iter()
        .collect();

        let mut config = RatesConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_currency(), Currency::GBP);
        assert_eq!(config.display_currency(), Currency::ZAR);
        assert!(!config.seed.mock_rates);
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let mut config = RatesConfig::default();
        config.apply_overrides(|key| match key {
            "KASSA_DISPLAY_CURRENCY" => Some("usd".to_string()),
            "KASSA_SEED_MOCK_RATES" => Some("maybe".to_string()),
            _ => None,
        });

        assert_eq!(config.display_currency(), Currency::USD);
        assert!(config.seed.mock_rates);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("currency.toml");

        let mut config = RatesConfig::default();
        config.store.display_currency = Currency::EUR;
        config.rates.push(entry("USD", "EUR", 0.92));
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[store]"));
        assert!(contents.contains("[[rates]]"));

        let loaded: RatesConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.display_currency(), Currency::EUR);
        assert_eq!(loaded.rates, config.rates);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("currency.toml");
        let contents = "[[rates]]\nfrom = \"USD\"\nto = \"EUR\"\nrate = 0.0\n";
        std::fs::write(&path, contents).unwrap();

        assert!(RatesConfig::load(Some(path.clone())).is_err());

        let fallback = RatesConfig::load_or_default(Some(path));
        assert!(fallback.rates.is_empty());
    }

    #[test]
    fn test_load_reports_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("currency.toml");
        std::fs::write(&path, "[store\n").unwrap();

        let err = RatesConfig::load(Some(path)).unwrap_err();
        assert!(matches!(err, RatesError::ConfigLoadFailed(_)));
    }
}
