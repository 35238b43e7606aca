//! Open Exchange Rates provider.
//!
//! Latest rates from <https://openexchangerates.org/>. Requires an
//! application id; the base currency is configurable and defaults to USD.
//! Rates arrive as JSON numbers. A rejected application id is reported with
//! HTTP 403.

use std::sync::Arc;

use async_trait::async_trait;

use super::commercial::{FeedProfile, JsonFeed};
use crate::errors::Result;
use crate::exchanger::Exchanger;
use crate::models::{CurrencyCode, QuotationConvention, RateTable};
use crate::transport::{HttpTransport, Transport};

const FEED: FeedProfile = FeedProfile {
    provider: "OPEN_EXCHANGE_RATES",
    endpoint: "https://openexchangerates.org/api/latest.json",
    credential_param: "app_id",
    invalid_credential_status: 403,
    missing_credential: "The application ID must be a non-empty string.",
};

/// Open Exchange Rates exchanger (default currency configurable, USD unless set).
pub struct OpenExchangeRatesExchanger {
    feed: JsonFeed,
}

impl OpenExchangeRatesExchanger {
    /// Creates the exchanger, failing with a configuration error for an empty id.
    pub fn new(app_id: impl Into<String>) -> Result<Self> {
        let feed = JsonFeed::new(FEED, app_id.into(), Arc::new(HttpTransport::new()))?;
        Ok(Self { feed })
    }

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
impl Exchanger for OpenExchangeRatesExchanger {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExchangerError, UnavailableReason};
    use crate::transport::{StaticTransport, TransportResponse};

    const LATEST: &str = r#"{
        "disclaimer": "Usage subject to terms: https://openexchangerates.org/terms",
        "license": "https://openexchangerates.org/license",
        "timestamp": 1729209600,
        "base": "EUR",
        "rates": {
            "EUR": 1,
            "USD": 1.0866,
            "CZK": 25.305,
            "JPY": 162.53
        }
    }"#;

    fn exchanger(transport: Arc<StaticTransport>) -> OpenExchangeRatesExchanger {
        OpenExchangeRatesExchanger::new("app")
            .unwrap()
            .with_base_currency(CurrencyCode::EUR)
            .with_transport(transport)
    }

    #[test]
    fn test_empty_app_id_rejected() {
        let err = OpenExchangeRatesExchanger::new(String::new()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: The application ID must be a non-empty string."
        );
    }

    #[tokio::test]
    async fn test_request_uses_app_id_and_base() {
        let transport = Arc::new(StaticTransport::always(TransportResponse::ok(LATEST)));
        let oxr = exchanger(transport.clone());

        let table = oxr.exchange_rates().await.unwrap();
        assert_eq!(table.len(), 3);
        assert!(!table.contains("EUR"));
        assert_eq!(
            transport.requests(),
            vec!["https://openexchangerates.org/api/latest.json?app_id=app&base=EUR"]
        );
    }

    #[tokio::test]
    async fn test_rate_for() {
        let transport = Arc::new(StaticTransport::always(TransportResponse::ok(LATEST)));
        let oxr = exchanger(transport);

        assert_eq!(oxr.rate_for("EUR".into(), None).await.unwrap(), 1.0);
        assert_eq!(oxr.rate_for("USD".into(), None).await.unwrap(), 1.0866);
        let jpy_per_usd = oxr.rate_for("JPY".into(), Some("USD".into())).await.unwrap();
        assert!((jpy_per_usd - 162.53 / 1.0866).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_forbidden_means_invalid_app_id() {
        let transport = Arc::new(StaticTransport::always(TransportResponse::new(
            403,
            r#"{"error":true,"status":403,"message":"invalid_app_id"}"#,
        )));
        let oxr = exchanger(transport);

        let err = oxr.exchange_rates().await.unwrap_err();
        assert!(matches!(
            err,
            ExchangerError::ExchangeRateNotAvailable {
                provider: "OPEN_EXCHANGE_RATES",
                reason: UnavailableReason::InvalidCredentials,
            }
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_falls_through_to_body() {
        let transport = Arc::new(StaticTransport::always(TransportResponse::new(
            401,
            r#"{"error":true,"status":401,"message":"missing_app_id"}"#,
        )));
        let oxr = exchanger(transport);

        let err = oxr.exchange_rates().await.unwrap_err();
        assert!(matches!(
            err,
            ExchangerError::ExchangeRateNotAvailable {
                reason: UnavailableReason::InvalidResponse(_),
                ..
            }
        ));
    }
}
