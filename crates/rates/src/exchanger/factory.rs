//! Builds exchangers from configuration values.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::Exchanger;
use crate::errors::{ExchangerError, Result};
use crate::models::CurrencyCode;
use crate::provider::boe::BoeExchanger;
use crate::provider::cnb::CnbExchanger;
use crate::provider::currency_freaks::CurrencyFreaksExchanger;
use crate::provider::ecb::EcbExchanger;
use crate::provider::open_exchange_rates::OpenExchangeRatesExchanger;
use crate::transport::{HttpTransport, Transport, DEFAULT_REQUEST_TIMEOUT};

/// The supported rate sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Cnb,
    Boe,
    Ecb,
    CurrencyFreaks,
    OpenExchangeRates,
}

impl ProviderKind {
    pub fn all() -> [ProviderKind; 5] {
        [
            ProviderKind::Cnb,
            ProviderKind::Boe,
            ProviderKind::Ecb,
            ProviderKind::CurrencyFreaks,
            ProviderKind::OpenExchangeRates,
        ]
    }

    /// Short name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Cnb => "cnb",
            ProviderKind::Boe => "boe",
            ProviderKind::Ecb => "ecb",
            ProviderKind::CurrencyFreaks => "cf",
            ProviderKind::OpenExchangeRates => "oxr",
        }
    }

    /// Commercial feeds need an API key or application id.
    pub fn requires_credential(&self) -> bool {
        matches!(
            self,
            ProviderKind::CurrencyFreaks | ProviderKind::OpenExchangeRates
        )
    }

    /// Central banks always quote against their own currency.
    pub fn has_configurable_base(&self) -> bool {
        self.requires_credential()
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cnb" => Ok(ProviderKind::Cnb),
            "boe" => Ok(ProviderKind::Boe),
            "ecb" => Ok(ProviderKind::Ecb),
            "cf" | "currency-freaks" => Ok(ProviderKind::CurrencyFreaks),
            "oxr" | "open-exchange-rates" => Ok(ProviderKind::OpenExchangeRates),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Settings shared by every exchanger the factory builds.
#[derive(Debug, Clone)]
pub struct ExchangerSettings {
    /// API key (CurrencyFreaks) or application id (Open Exchange Rates)
    pub api_key: Option<String>,
    /// Base currency for the commercial feeds; USD when unset
    pub base_currency: Option<CurrencyCode>,
    pub timeout: Duration,
}

impl Default for ExchangerSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_currency: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Builds the exchanger for `kind` over an HTTP transport.
pub fn build_exchanger(
    kind: ProviderKind,
    settings: &ExchangerSettings,
) -> Result<Box<dyn Exchanger>> {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::with_timeout(settings.timeout));
    build_exchanger_with_transport(kind, settings, transport)
}

/// Builds the exchanger for `kind` over the given transport.
///
/// A base currency is rejected for the central banks unless it equals
/// their own currency.
pub fn build_exchanger_with_transport(
    kind: ProviderKind,
    settings: &ExchangerSettings,
    transport: Arc<dyn Transport>,
) -> Result<Box<dyn Exchanger>> {
    debug!("Building {} exchanger", kind);

    let api_key = settings.api_key.clone().unwrap_or_default();
    let exchanger: Box<dyn Exchanger> = match kind {
        ProviderKind::Cnb => Box::new(CnbExchanger::with_transport(transport)),
        ProviderKind::Boe => Box::new(BoeExchanger::with_transport(transport)),
        ProviderKind::Ecb => Box::new(EcbExchanger::with_transport(transport)),
        ProviderKind::CurrencyFreaks => {
            let mut cf = CurrencyFreaksExchanger::new(api_key)?.with_transport(transport);
            if let Some(base) = &settings.base_currency {
                cf = cf.with_base_currency(base.clone());
            }
            Box::new(cf)
        }
        ProviderKind::OpenExchangeRates => {
            let mut oxr = OpenExchangeRatesExchanger::new(api_key)?.with_transport(transport);
            if let Some(base) = &settings.base_currency {
                oxr = oxr.with_base_currency(base.clone());
            }
            Box::new(oxr)
        }
    };

    if let Some(base) = &settings.base_currency {
        let fixed = exchanger.default_currency_code();
        if *base != fixed {
            return Err(ExchangerError::Configuration(format!(
                "{} always quotes against {}, not {}",
                exchanger.id(),
                fixed,
                base
            )));
        }
    }

    Ok(exchanger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::StaticTransport;

    fn build(kind: ProviderKind, settings: &ExchangerSettings) -> Result<Box<dyn Exchanger>> {
        build_exchanger_with_transport(kind, settings, Arc::new(StaticTransport::new()))
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!("cnb".parse::<ProviderKind>(), Ok(ProviderKind::Cnb));
        assert_eq!(" BOE ".parse::<ProviderKind>(), Ok(ProviderKind::Boe));
        assert_eq!("ecb".parse::<ProviderKind>(), Ok(ProviderKind::Ecb));
        assert_eq!(
            "cf".parse::<ProviderKind>(),
            Ok(ProviderKind::CurrencyFreaks)
        );
        assert_eq!(
            "currency-freaks".parse::<ProviderKind>(),
            Ok(ProviderKind::CurrencyFreaks)
        );
        assert_eq!(
            "open-exchange-rates".parse::<ProviderKind>(),
            Ok(ProviderKind::OpenExchangeRates)
        );
        assert!("fed".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_provider_kind_display_round_trips() {
        for kind in ProviderKind::all() {
            assert_eq!(kind.to_string().parse::<ProviderKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_builds_every_provider() {
        let settings = ExchangerSettings {
            api_key: Some("key".to_string()),
            ..ExchangerSettings::default()
        };
        let ids: Vec<&str> = ProviderKind::all()
            .into_iter()
            .map(|kind| build(kind, &settings).unwrap().id())
            .collect();
        assert_eq!(
            ids,
            vec!["CNB", "BOE", "ECB", "CURRENCY_FREAKS", "OPEN_EXCHANGE_RATES"]
        );
    }

    #[test]
    fn test_commercial_feeds_require_a_key() {
        let settings = ExchangerSettings::default();
        for kind in [ProviderKind::CurrencyFreaks, ProviderKind::OpenExchangeRates] {
            assert!(matches!(
                build(kind, &settings),
                Err(ExchangerError::Configuration(_))
            ));
        }
        assert!(build(ProviderKind::Ecb, &settings).is_ok());
    }

    #[test]
    fn test_base_currency() {
        let settings = ExchangerSettings {
            api_key: Some("key".to_string()),
            base_currency: Some(CurrencyCode::EUR),
            ..ExchangerSettings::default()
        };

        let oxr = build(ProviderKind::OpenExchangeRates, &settings).unwrap();
        assert_eq!(oxr.default_currency_code(), CurrencyCode::EUR);
        assert!(build(ProviderKind::Ecb, &settings).is_ok());
        assert!(matches!(
            build(ProviderKind::Cnb, &settings),
            Err(ExchangerError::Configuration(_))
        ));
    }
}
