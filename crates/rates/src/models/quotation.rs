use std::fmt;

use serde::{Deserialize, Serialize};

use super::rate::RateEntry;

/// How a provider expresses its rates relative to its default currency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotationConvention {
    /// One unit of the default currency buys `rate` units of the quoted currency.
    Direct,
    /// `amount` units of the quoted currency cost `rate` units of the default currency.
    Indirect,
}

impl QuotationConvention {
    /// Units of the quoted currency per one unit of the default currency.
    pub fn directional_rate(self, entry: &RateEntry) -> f64 {
        match self {
            QuotationConvention::Direct => entry.rate(),
            QuotationConvention::Indirect => f64::from(entry.amount()) / entry.rate(),
        }
    }
}

impl fmt::Display for QuotationConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotationConvention::Direct => f.write_str("direct"),
            QuotationConvention::Indirect => f.write_str("indirect"),
        }
    }
}
