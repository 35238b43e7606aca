//! Exchange rate provider implementations.
//!
//! This module contains one [`Exchanger`](crate::Exchanger) per data source:
//! - `cnb` - Czech National Bank daily fixing (pipe-delimited text, indirect quotes)
//! - `boe` - Bank of England spot series (CSV, direct quotes)
//! - `ecb` - European Central Bank reference rates (XML, direct quotes)
//! - `currency_freaks` - CurrencyFreaks latest rates (JSON, API key)
//! - `open_exchange_rates` - Open Exchange Rates latest rates (JSON, app id)
//!
//! Providers receive their payload through a [`Transport`] and
//! never retry or cache.

mod commercial;

pub mod boe;
pub mod cnb;
pub mod currency_freaks;
pub mod ecb;
pub mod open_exchange_rates;

use tracing::debug;

use crate::errors::{ExchangerError, Result, UnavailableReason};
use crate::transport::{Transport, TransportError};

impl From<TransportError> for UnavailableReason {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Timeout => UnavailableReason::Timeout,
            TransportError::Request(message) => UnavailableReason::Transport(message),
        }
    }
}

/// Fetches a public document, treating any non-2xx status or empty body as unavailable.
pub(crate) async fn fetch_document(
    transport: &dyn Transport,
    provider: &'static str,
    url: &str,
) -> Result<String> {
    debug!("{} request: {}", provider, url);

    let response = transport
        .get(url)
        .await
        .map_err(|e| ExchangerError::unavailable(provider, e.into()))?;

    if !response.is_success() {
        return Err(ExchangerError::unavailable(
            provider,
            UnavailableReason::HttpStatus(response.status),
        ));
    }

    if response.body.trim().is_empty() {
        return Err(ExchangerError::unavailable(
            provider,
            UnavailableReason::NoContent,
        ));
    }

    Ok(response.body)
}
