//! Currency rate models
//!
//! This module contains the data types shared by every exchanger:
//! - `types` - The validated [`CurrencyCode`]
//! - `currency` - Currency arguments (raw codes or identity objects)
//! - `rate` - Rate entries and the per-fetch rate table
//! - `quotation` - Direct vs indirect quotation conventions

mod currency;
mod quotation;
mod rate;
mod types;

pub use currency::{CurrencyIdentity, CurrencyRef};
pub use quotation::QuotationConvention;
pub use rate::{InvalidRateEntry, RateEntry, RateTable};
pub use types::{CurrencyCode, InvalidCurrencyCode};
