//! Currency Rates Crate
//!
//! Exchange rates from central banks and commercial feeds behind one
//! provider-agnostic interface.
//!
//! # Overview
//!
//! Every source is an [`Exchanger`]: it knows its default currency, how its
//! table is quoted and how to fetch a fresh [`RateTable`]. Cross rates and
//! currency listings are derived from the table in one place, so all
//! providers answer `rate_for` the same way.
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |    Transport     | --> |    Exchanger     | --> |    Converter     |
//! | (HTTP / static)  |     | (CNB, ECB, ...)  |     |  (cross rates)   |
//! +------------------+     +------------------+     +------------------+
//! ```
//!
//! # Providers
//!
//! | Id                    | Default | Format | Quotation |
//! |-----------------------|---------|--------|-----------|
//! | `CNB`                 | CZK     | text   | indirect  |
//! | `BOE`                 | GBP     | CSV    | direct    |
//! | `ECB`                 | EUR     | XML    | direct    |
//! | `CURRENCY_FREAKS`     | USD*    | JSON   | direct    |
//! | `OPEN_EXCHANGE_RATES` | USD*    | JSON   | direct    |
//!
//! \* configurable
//!
//! Nothing is cached: every query fetches the provider's payload again.

pub mod converter;
pub mod errors;
pub mod exchanger;
pub mod models;
pub mod provider;
pub mod transport;

pub use errors::{ExchangerError, Result, RetryClass, UnavailableReason};
pub use exchanger::{
    build_exchanger, build_exchanger_with_transport, Exchanger, ExchangerSettings, ProviderKind,
};
pub use models::{
    CurrencyCode, CurrencyIdentity, CurrencyRef, QuotationConvention, RateEntry, RateTable,
};

pub use provider::boe::BoeExchanger;
pub use provider::cnb::CnbExchanger;
pub use provider::currency_freaks::CurrencyFreaksExchanger;
pub use provider::ecb::EcbExchanger;
pub use provider::open_exchange_rates::OpenExchangeRatesExchanger;
