//! # Rates Error Types
//!
//! Error types for loading, validating and saving currency configuration.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rates Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   File I/O      │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ConfigLoad     │  │  Core (unsupported      │ │
//! │  │                 │  │  ConfigSave     │  │  currency, bad rate)    │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these reach report pages: a failed load falls back to the     │
//! │  default config (see `RatesConfig::load_or_default`).                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kassa_core::CoreError;
use thiserror::Error;

/// Result type alias for rate configuration operations.
pub type RatesResult<T> = Result<T, RatesError>;

/// Errors raised while provisioning exchange rates.
#[derive(Debug, Error)]
pub enum RatesError {
    /// Invalid currency configuration.
    #[error("Invalid currency configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// Registry or rate rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for RatesError {
    fn from(err: std::io::Error) -> Self {
        RatesError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for RatesError {
    fn from(err: toml::de::Error) -> Self {
        RatesError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for RatesError {
    fn from(err: toml::ser::Error) -> Self {
        RatesError::ConfigSaveFailed(err.to_string())
    }
}

impl RatesError {
    /// Returns true if this error came from the config file itself rather
    /// than from its contents.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            RatesError::ConfigLoadFailed(_) | RatesError::ConfigSaveFailed(_)
        )
    }
}
