//! # Validation Module
//!
//! Input checks for amounts, currency codes and exchange rates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Predicates (never fail)                                      │
//! │  ├── is_valid_currency_amount  - price/expense inputs                  │
//! │  └── is_supported_currency     - currency pickers                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Validators (typed errors)                                    │
//! │  ├── validate_amount           - same rule, reports why                │
//! │  ├── validate_currency_code    - config files, env overrides           │
//! │  └── validate_exchange_rate    - rates entering from config            │
//! │                                                                         │
//! │  Formatters do NOT validate. Callers reject bad input first.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stricter Than Formatting
//! `format_currency(-5.0, "USD")` renders `"$-5.00"`, but
//! `is_valid_currency_amount(-5.0)` is `false`. Validation is
//! the stricter of the two.

use crate::currency::{Currency, CurrencyPair};
use crate::error::{CoreError, CoreResult, ValidationError};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Inputs
// =============================================================================

/// Anything a form field or API payload may hand us as an amount.
///
/// Numbers pass through; strings are trimmed and parsed as `f64`.
/// `None` means "does not parse".
pub trait AmountInput {
    fn to_amount(&self) -> Option<f64>;
}

impl AmountInput for f64 {
    fn to_amount(&self) -> Option<f64> {
        Some(*self)
    }
}

impl AmountInput for f32 {
    fn to_amount(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl AmountInput for i32 {
    fn to_amount(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl AmountInput for i64 {
    fn to_amount(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl AmountInput for str {
    fn to_amount(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl AmountInput for String {
    fn to_amount(&self) -> Option<f64> {
        self.as_str().to_amount()
    }
}

impl<T: AmountInput + ?Sized> AmountInput for &T {
    fn to_amount(&self) -> Option<f64> {
        (**self).to_amount()
    }
}

// =============================================================================
// Predicates
// =============================================================================

/// Returns true if `value` parses to a finite, non-negative number.
///
/// ## Example
/// ```rust
/// use kassa_core::validation::is_valid_currency_amount;
///
/// assert!(is_valid_currency_amount("12.3"));
/// assert!(is_valid_currency_amount(0.0));
/// assert!(!is_valid_currency_amount(-5.0));
/// assert!(!is_valid_currency_amount("abc"));
/// ```
pub fn is_valid_currency_amount<A: AmountInput>(value: A) -> bool {
    validate_amount(value).is_ok()
}

/// Returns true if `code` is in the currency registry.
pub fn is_supported_currency(code: &str) -> bool {
    Currency::from_code(code).is_some()
}

// =============================================================================
// Validators
// =============================================================================

/// Validates an amount and returns it as `f64`.
///
/// ## Rules
/// - Must parse (strings are trimmed first)
/// - Must be finite
/// - Must be >= 0 (zero is allowed)
pub fn validate_amount<A: AmountInput>(value: A) -> ValidationResult<f64> {
    let amount = value
        .to_amount()
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "must be a number".to_string(),
        })?;

    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "amount".to_string(),
        });
    }

    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: "amount".to_string(),
        });
    }

    Ok(amount)
}

/// Validates a currency code against the registry.
///
/// ## Example
/// ```rust
/// use kassa_core::validation::validate_currency_code;
/// use kassa_core::Currency;
///
/// assert_eq!(validate_currency_code("EUR").unwrap(), Currency::EUR);
/// assert!(validate_currency_code("").is_err());
/// assert!(validate_currency_code("XYZ").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<Currency> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    Currency::from_code(code).ok_or_else(|| ValidationError::NotAllowed {
        field: "currency".to_string(),
        allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
    })
}

/// Validates an exchange rate multiplier.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive (a zero rate would wipe amounts out)
///
/// ## Note
/// `CurrencyConverter::set_rate` stores whatever it is given. This check
/// runs where rates enter the system (config files, seed data).
pub fn validate_exchange_rate(pair: &CurrencyPair, rate: f64) -> CoreResult<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(CoreError::InvalidExchangeRate {
            pair: pair.clone(),
            rate,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
