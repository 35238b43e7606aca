//! Exchanger trait definition.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::converter;
use crate::errors::Result;
use crate::models::{CurrencyCode, CurrencyRef, QuotationConvention, RateTable};

/// A source of exchange rates relative to one default currency.
///
/// Every query fetches a fresh [`RateTable`]; nothing is cached between
/// calls.
///
/// # Example
///
/// ```ignore
/// use currency_rates::provider::ecb::EcbExchanger;
/// use currency_rates::Exchanger;
///
/// let ecb = EcbExchanger::new();
///
/// // 1 EUR = x CZK
/// let czk = ecb.rate_for("CZK".into(), None).await?;
///
/// // 1 USD = y CZK
/// let czk_per_usd = ecb.rate_for("CZK".into(), Some("USD".into())).await?;
/// ```
#[async_trait]
pub trait Exchanger: Send + Sync {
    /// Unique identifier for this provider, used in errors and logs.
    fn id(&self) -> &'static str;

    /// The currency every rate in the table is relative to.
    fn default_currency_code(&self) -> CurrencyCode;

    /// How the provider's table entries must be read.
    fn quotation_convention(&self) -> QuotationConvention;

    /// Fetches and parses the provider's current rates.
    ///
    /// The returned table never contains the default currency.
    async fn exchange_rates(&self) -> Result<RateTable>;

    /// Rate for `currency` per one unit of `from` (the default currency when `None`).
    ///
    /// With a default currency of EUR and `1 EUR = 1.08 USD`, asking for USD
    /// returns `1.08`.
    async fn rate_for(
        &self,
        currency: CurrencyRef<'_>,
        from: Option<CurrencyRef<'_>>,
    ) -> Result<f64> {
        let rates = self.exchange_rates().await?;
        converter::resolve_rate(
            &rates,
            &self.default_currency_code(),
            self.quotation_convention(),
            currency,
            from,
        )
    }

    /// Every currency the provider currently knows, including the default one.
    async fn available_currencies(&self) -> Result<BTreeSet<CurrencyCode>> {
        let rates = self.exchange_rates().await?;
        let mut currencies: BTreeSet<CurrencyCode> = rates.currencies().cloned().collect();
        currencies.insert(self.default_currency_code());
        Ok(currencies)
    }
}
