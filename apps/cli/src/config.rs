use std::time::Duration;

use anyhow::{Context, Result};
use currency_rates::{CurrencyCode, ExchangerSettings, ProviderKind};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Log output format selected by `RATES_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runtime configuration read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub cf_api_key: Option<String>,
    pub oxr_app_id: Option<String>,
    pub base_currency: Option<CurrencyCode>,
    pub timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_currency = non_empty("RATES_BASE_CURRENCY")
            .map(|code| CurrencyCode::parse(&code))
            .transpose()
            .context("RATES_BASE_CURRENCY is not a currency code")?;

        let timeout_ms = match non_empty("RATES_HTTP_TIMEOUT_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid RATES_HTTP_TIMEOUT_MS: {}", value))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let log_format = match non_empty("RATES_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            cf_api_key: non_empty("RATES_CF_API_KEY"),
            oxr_app_id: non_empty("RATES_OXR_APP_ID"),
            base_currency,
            timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }

    /// Settings for one provider; the base currency only reaches feeds that accept one.
    pub fn settings_for(&self, kind: ProviderKind) -> ExchangerSettings {
        let api_key = match kind {
            ProviderKind::CurrencyFreaks => self.cf_api_key.clone(),
            ProviderKind::OpenExchangeRates => self.oxr_app_id.clone(),
            _ => None,
        };
        let base_currency = if kind.has_configurable_base() {
            self.base_currency.clone()
        } else {
            None
        };

        ExchangerSettings {
            api_key,
            base_currency,
            timeout: self.timeout,
        }
    }
}
