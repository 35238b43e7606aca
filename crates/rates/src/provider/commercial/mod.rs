//! Shared client for commercial "latest rates" JSON APIs.
//!
//! CurrencyFreaks and Open Exchange Rates answer with the same shape:
//!
//! ```text
//! { "base": "USD", "rates": { "EUR": 0.9216, "CZK": 23.311, ... } }
//! ```
//!
//! They differ in the credential parameter name, in how rate values are
//! encoded (numbers or numeric strings) and in the status code used for a
//! rejected credential.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{ExchangerError, Result, UnavailableReason};
use crate::models::{CurrencyCode, RateEntry, RateTable};
use crate::transport::Transport;

/// Status codes with a dedicated meaning for every commercial feed.
const TOO_MANY_REQUESTS: u16 = 429;
const SERVER_ERROR_FLOOR: u16 = 500;

/// Stands in for the credential in logged URLs.
const REDACTED: &str = "***";

/// Response body of a latest-rates endpoint.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, RateValue>,
}

/// Rates are numbers on some feeds and numeric strings on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RateValue::Number(value) => Some(*value),
            RateValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Static description of one commercial feed.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FeedProfile {
    pub provider: &'static str,
    pub endpoint: &'static str,
    /// Query parameter carrying the credential
    pub credential_param: &'static str,
    /// Status the feed answers with for a bad credential
    pub invalid_credential_status: u16,
    /// Configuration error message for an empty credential
    pub missing_credential: &'static str,
}

/// Configured client for one commercial feed.
pub(crate) struct JsonFeed {
    profile: FeedProfile,
    endpoint: String,
    credential: String,
    base: CurrencyCode,
    transport: Arc<dyn Transport>,
}

impl JsonFeed {
    /// Fails with a configuration error when `credential` is empty.
    pub fn new(
        profile: FeedProfile,
        credential: String,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        if credential.is_empty() {
            return Err(ExchangerError::Configuration(
                profile.missing_credential.to_string(),
            ));
        }

        Ok(Self {
            profile,
            endpoint: profile.endpoint.to_string(),
            credential,
            base: CurrencyCode::USD,
            transport,
        })
    }

    pub fn provider(&self) -> &'static str {
        self.profile.provider
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn set_base(&mut self, base: CurrencyCode) {
        self.base = base;
    }

    pub fn set_endpoint(&mut self, endpoint: String) {
        self.endpoint = endpoint;
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    fn request_url(&self) -> Result<Url> {
        self.url_with_credential(&self.credential)
    }

    /// The request URL as it may appear in logs, with the credential masked.
    fn redacted_url(&self) -> String {
        self.url_with_credential(REDACTED)
            .map(String::from)
            .unwrap_or_else(|_| self.endpoint.clone())
    }

    fn url_with_credential(&self, credential: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                (self.profile.credential_param, credential),
                ("base", self.base.as_str()),
            ],
        )
        .map_err(|e| {
            ExchangerError::unavailable(
                self.profile.provider,
                UnavailableReason::Transport(format!("Failed to build URL: {}", e)),
            )
        })
    }

    /// Fetches the latest rates relative to the configured base currency.
    pub async fn fetch_latest(&self) -> Result<RateTable> {
        let provider = self.profile.provider;
        let url = self.request_url()?;

        debug!("{} request: {}", provider, self.redacted_url());

        let response = self
            .transport
            .get(url.as_str())
            .await
            .map_err(|e| ExchangerError::unavailable(provider, e.into()))?;

        let status = response.status;
        if status >= SERVER_ERROR_FLOOR {
            return Err(ExchangerError::unavailable(
                provider,
                UnavailableReason::HttpStatus(status),
            ));
        }
        if status == self.profile.invalid_credential_status {
            return Err(ExchangerError::unavailable(
                provider,
                UnavailableReason::InvalidCredentials,
            ));
        }
        if status == TOO_MANY_REQUESTS {
            return Err(ExchangerError::unavailable(
                provider,
                UnavailableReason::RateLimited,
            ));
        }
        if response.body.trim().is_empty() {
            return Err(ExchangerError::unavailable(
                provider,
                UnavailableReason::NoContent,
            ));
        }

        let table = Self::parse_latest(provider, &response.body, &self.base)
            .map_err(|message| ExchangerError::invalid_response(provider, message))?;

        debug!("{} rates parsed: {} currencies", provider, table.len());
        Ok(table)
    }

    /// Builds a table from a latest-rates body, leaving out `base` itself.
    fn parse_latest(
        provider: &str,
        body: &str,
        base: &CurrencyCode,
    ) -> std::result::Result<RateTable, String> {
        let response: LatestRatesResponse =
            serde_json::from_str(body).map_err(|e| format!("Failed to parse rates: {}", e))?;

        let mut table = RateTable::new();
        for (symbol, value) in response.rates {
            let Ok(code) = CurrencyCode::parse(&symbol) else {
                debug!("{}: skipping non-ISO symbol {}", provider, symbol);
                continue;
            };
            if code == *base {
                continue;
            }

            let rate = value
                .as_f64()
                .ok_or_else(|| format!("{}: rate is not numeric", symbol))?;
            let entry = RateEntry::unit(rate).map_err(|e| format!("{}: {}", symbol, e))?;
            table.insert(code, entry);
        }

        Ok(table)
    }
}
