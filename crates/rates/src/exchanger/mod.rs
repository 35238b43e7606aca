//! The exchanger abstraction and its configuration-driven factory.
//!
//! Providers implement only what differs between them: where the rates come
//! from ([`Exchanger::exchange_rates`]), which currency they quote against
//! and how they quote. Rate lookups and availability listings are provided
//! once by the trait.

mod factory;
mod traits;

pub use factory::{build_exchanger, build_exchanger_with_transport, ExchangerSettings, ProviderKind};
pub use traits::Exchanger;
