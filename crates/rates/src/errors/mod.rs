//! Error types and retry classification for the currency rates crate.
//!
//! This module provides:
//! - [`ExchangerError`]: The error enum returned by every exchanger operation
//! - [`UnavailableReason`]: Why a provider could not deliver a rate table
//! - [`RetryClass`]: Classification callers can use to decide on retries

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExchangerError>;

/// Errors that can occur while querying an exchanger.
#[derive(Error, Debug)]
pub enum ExchangerError {
    /// The exchanger was constructed with invalid configuration,
    /// for example an empty API key.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested currency is not part of the provider's rate table.
    #[error("Currency not available: {currency}")]
    CurrencyNotAvailable {
        /// The code as it was requested
        currency: String,
    },

    /// The provider could not deliver a usable rate table.
    #[error("Exchange rate not available from {provider}: {reason}")]
    ExchangeRateNotAvailable {
        /// The provider that failed
        provider: &'static str,
        /// What went wrong
        reason: UnavailableReason,
    },
}

/// Cause of an [`ExchangerError::ExchangeRateNotAvailable`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The fetch succeeded but returned an empty body.
    #[error("empty response")]
    NoContent,

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with an unexpected HTTP status.
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// The provider rejected the API key or application id.
    #[error("invalid API key")]
    InvalidCredentials,

    /// The provider's request quota is exhausted.
    #[error("limit exceeded")]
    RateLimited,

    /// The payload could not be parsed into a rate table.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ExchangerError {
    pub(crate) fn unavailable(provider: &'static str, reason: UnavailableReason) -> Self {
        Self::ExchangeRateNotAvailable { provider, reason }
    }

    pub(crate) fn invalid_response(provider: &'static str, message: impl Into<String>) -> Self {
        Self::unavailable(provider, UnavailableReason::InvalidResponse(message.into()))
    }

    pub(crate) fn currency_not_available(currency: impl Into<String>) -> Self {
        Self::CurrencyNotAvailable {
            currency: currency.into(),
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// The crate itself never retries; the classification is a hint for
    /// callers that want to.
    ///
    /// # Examples
    ///
    /// ```
    /// use currency_rates::errors::{ExchangerError, RetryClass, UnavailableReason};
    ///
    /// let error = ExchangerError::ExchangeRateNotAvailable {
    ///     provider: "CURRENCY_FREAKS",
    ///     reason: UnavailableReason::RateLimited,
    /// };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = ExchangerError::CurrencyNotAvailable { currency: "ZZZ".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Configuration(_) | Self::CurrencyNotAvailable { .. } => RetryClass::Never,
            Self::ExchangeRateNotAvailable { reason, .. } => match reason {
                UnavailableReason::InvalidCredentials | UnavailableReason::InvalidResponse(_) => {
                    RetryClass::Never
                }
                UnavailableReason::HttpStatus(status) if *status < 500 => RetryClass::Never,
                UnavailableReason::NoContent
                | UnavailableReason::Timeout
                | UnavailableReason::Transport(_)
                | UnavailableReason::HttpStatus(_)
                | UnavailableReason::RateLimited => RetryClass::WithBackoff,
            },
        }
    }

    /// Returns the currency code carried by a `CurrencyNotAvailable` error.
    pub fn missing_currency(&self) -> Option<&str> {
        match self {
            Self::CurrencyNotAvailable { currency } => Some(currency),
            _ => None,
        }
    }
}
