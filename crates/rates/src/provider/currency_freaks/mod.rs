//! CurrencyFreaks provider.
//!
//! Latest rates from <https://currencyfreaks.com/>. Requires an API key;
//! the base currency is configurable and defaults to USD. Rates arrive as
//! numeric strings. A rejected key is reported with HTTP 401.

use std::sync::Arc;

use async_trait::async_trait;

use super::commercial::{FeedProfile, JsonFeed};
use crate::errors::Result;
use crate::exchanger::Exchanger;
use crate::models::{CurrencyCode, QuotationConvention, RateTable};
use crate::transport::{HttpTransport, Transport};

const FEED: FeedProfile = FeedProfile {
    provider: "CURRENCY_FREAKS",
    endpoint: "https://api.currencyfreaks.com/v2.0/rates/latest",
    credential_param: "apikey",
    invalid_credential_status: 401,
    missing_credential: "API key is required",
};

/// CurrencyFreaks exchanger (default currency configurable, USD unless set).
pub struct CurrencyFreaksExchanger {
    feed: JsonFeed,
}

impl CurrencyFreaksExchanger {
    /// Creates the exchanger, failing with a configuration error for an empty key.
    ///
    /// No request is made until rates are queried.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let feed = JsonFeed::new(FEED, api_key.into(), Arc::new(HttpTransport::new()))?;
        Ok(Self { feed })
    }

    /// Quotes every rate against `base` instead of USD.
    pub fn with_base_currency(mut self, base: CurrencyCode) -> Self {
        self.feed.set_base(base);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.feed.set_transport(transport);
        self
    }

    pub fn with_url(mut self, endpoint: impl Into<String>) -> Self {
        self.feed.set_endpoint(endpoint.into());
        self
    }
}

#[async_trait]
impl Exchanger for CurrencyFreaksExchanger {
    fn id(&self) -> &'static str {
        self.feed.provider()
    }

    fn default_currency_code(&self) -> CurrencyCode {
        self.feed.base().clone()
    }

    fn quotation_convention(&self) -> QuotationConvention {
        QuotationConvention::Direct
    }

    async fn exchange_rates(&self) -> Result<RateTable> {
        self.feed.fetch_latest().await
    }
}
