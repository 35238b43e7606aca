use std::collections::btree_map::{self, BTreeMap};

use serde::Serialize;

use super::types::CurrencyCode;

/// One row of a provider's rate table.
///
/// `amount` units of the quoted currency relate to `rate` units of the
/// provider's default currency, read according to the provider's
/// [`QuotationConvention`](super::QuotationConvention).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RateEntry {
    amount: u32,
    rate: f64,
}

/// Rejected [`RateEntry`] values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidRateEntry {
    #[error("quotation amount must be at least 1")]
    ZeroAmount,
    #[error("rate must be positive and finite, got {0}")]
    NonPositiveRate(f64),
}

impl RateEntry {
    pub fn new(amount: u32, rate: f64) -> Result<Self, InvalidRateEntry> {
        if amount == 0 {
            return Err(InvalidRateEntry::ZeroAmount);
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(InvalidRateEntry::NonPositiveRate(rate));
        }
        Ok(Self { amount, rate })
    }

    /// Entry quoted per single unit.
    pub fn unit(rate: f64) -> Result<Self, InvalidRateEntry> {
        Self::new(1, rate)
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

/// Snapshot of every rate a provider published at fetch time.
///
/// Keys never include the provider's own default currency. Tables are
/// built once per fetch and not modified afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    entries: BTreeMap<CurrencyCode, RateEntry>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `code`.
    pub fn insert(&mut self, code: CurrencyCode, entry: RateEntry) -> Option<RateEntry> {
        self.entries.insert(code, entry)
    }

    pub fn get(&self, code: &str) -> Option<&RateEntry> {
        self.entries.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currencies in the table, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.entries.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CurrencyCode, RateEntry> {
        self.entries.iter()
    }
}

impl FromIterator<(CurrencyCode, RateEntry)> for RateTable {
    fn from_iter<T: IntoIterator<Item = (CurrencyCode, RateEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RateTable {
    type Item = (&'a CurrencyCode, &'a RateEntry);
    type IntoIter = btree_map::Iter<'a, CurrencyCode, RateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
