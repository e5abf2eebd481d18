//! # Error Types
//!
//! Domain-specific error types for kassa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kassa-core errors (this file)                                         │
//! │  ├── CoreError        - Registry / rate rule violations                │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── FormatError      - Locale formatting failures (never escapes)     │
//! │                                                                         │
//! │  kassa-rates errors (separate crate)                                   │
//! │  └── RatesError       - Config load/save failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → RatesError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The display-layer API degrades instead of failing:
//! - Unknown currency code in a formatter → the raw code is used as symbol
//! - Missing exchange rate in `convert` → amount returned unconverted
//! - Locale formatting failure → manual `symbol + fixed decimals` string
//!
//! The types below are only surfaced by the explicit validators and by
//! configuration loading in `kassa-rates`.

use thiserror::Error;

use crate::currency::CurrencyPair;

// =============================================================================
// Core Error
// =============================================================================

/// Core currency errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Currency code is not in the registry.
    ///
    /// ## When This Occurs
    /// - Parsing a code with `str::parse::<Currency>()`
    /// - Config file names a currency the registry does not know
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Exchange rate is not a finite, strictly positive multiplier.
    #[error("Invalid exchange rate for {pair}: {rate}")]
    InvalidExchangeRate { pair: CurrencyPair, rate: f64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value could not be parsed.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Format Error
// =============================================================================

/// Locale-aware formatting failure.
///
/// Returned by [`crate::format::format_locale`]. Every formatter in this
/// crate catches it and falls back to the manual rendering.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    /// No locale convention exists for this code.
    #[error("No locale convention for currency {0}")]
    UnknownCurrency(String),

    /// Amount cannot be rendered with grouping (NaN or infinite).
    #[error("Cannot format non-finite amount {0}")]
    NonFiniteAmount(f64),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidExchangeRate {
            pair: CurrencyPair::new(Currency::USD, Currency::EUR),
            rate: -1.5,
        };
        assert_eq!(err.to_string(), "Invalid exchange rate for USD/EUR: -1.5");

        let err = CoreError::UnsupportedCurrency("XYZ".to_string());
        assert_eq!(err.to_string(), "Unsupported currency: XYZ");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "currency".to_string(),
        };
        assert_eq!(err.to_string(), "currency is required");

        let err = ValidationError::NotFinite {
            field: "rate".to_string(),
        };
        assert_eq!(err.to_string(), "rate must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
