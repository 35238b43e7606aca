//! Cross-rate computation.
//!
//! Every exchanger answers rate queries through these functions. Rates are
//! routed through the provider's default currency:
//!
//! ```text
//! rate(currency <- from) = directional(currency) / directional(from)
//! ```
//!
//! where `directional(X)` is the number of X units one default unit buys
//! (see [`QuotationConvention::directional_rate`]) and `directional(default) = 1`.
//! No rounding is applied.

use crate::errors::{ExchangerError, Result};
use crate::models::{CurrencyCode, CurrencyRef, QuotationConvention, RateTable};

/// Units of `code` one unit of `default` buys, according to `table`.
fn directional_rate(
    table: &RateTable,
    default: &CurrencyCode,
    convention: QuotationConvention,
    code: &CurrencyCode,
) -> Result<f64> {
    if code == default {
        return Ok(1.0);
    }
    table
        .get(code.as_str())
        .map(|entry| convention.directional_rate(entry))
        .ok_or_else(|| ExchangerError::currency_not_available(code.as_str()))
}

/// Rate for `currency` expressed per one unit of `from`.
///
/// Both currencies must be in `table` unless they are the default currency.
/// `currency` is checked before `from`.
pub fn cross_rate(
    table: &RateTable,
    default: &CurrencyCode,
    convention: QuotationConvention,
    currency: &CurrencyCode,
    from: &CurrencyCode,
) -> Result<f64> {
    if currency == from {
        return Ok(1.0);
    }

    let target = directional_rate(table, default, convention, currency)?;
    if from == default {
        return Ok(target);
    }

    let source = directional_rate(table, default, convention, from)?;
    Ok(target / source)
}

/// Resolves caller-supplied currency arguments and computes the rate.
///
/// `from` defaults to the provider's default currency. Asking for the
/// default currency without `from`, or for a currency against itself,
/// returns exactly `1.0` without looking at the table.
pub fn resolve_rate(
    table: &RateTable,
    default: &CurrencyCode,
    convention: QuotationConvention,
    currency: CurrencyRef<'_>,
    from: Option<CurrencyRef<'_>>,
) -> Result<f64> {
    let currency = normalize(currency)?;
    let from = from.map(normalize).transpose()?;

    match from {
        Some(ref from) if *from == currency => Ok(1.0),
        None if currency == *default => Ok(1.0),
        Some(ref from) => cross_rate(table, default, convention, &currency, from),
        None => cross_rate(table, default, convention, &currency, default),
    }
}

fn normalize(currency: CurrencyRef<'_>) -> Result<CurrencyCode> {
    currency
        .to_code()
        .ok_or_else(|| ExchangerError::currency_not_available(currency.raw_code()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RateEntry;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::parse(s).unwrap()
    }

    fn table(entries: &[(&str, u32, f64)]) -> RateTable {
        entries
            .iter()
            .map(|(c, amount, rate)| (code(c), RateEntry::new(*amount, *rate).unwrap()))
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_indirect_rate_against_default() {
        let rates = table(&[("EUR", 1, 25.0), ("USD", 1, 23.0)]);
        let rate = resolve_rate(
            &rates,
            &CurrencyCode::CZK,
            QuotationConvention::Indirect,
            "EUR".into(),
            None,
        )
        .unwrap();
        assert_close(rate, 0.04);
    }

    #[test]
    fn test_indirect_cross_rate() {
        let rates = table(&[("EUR", 1, 25.0), ("USD", 1, 23.0)]);
        let rate = resolve_rate(
            &rates,
            &CurrencyCode::CZK,
            QuotationConvention::Indirect,
            "EUR".into(),
            Some("USD".into()),
        )
        .unwrap();
        assert_close(rate, 0.92);
    }

    #[test]
    fn test_indirect_uses_quotation_amount() {
        let rates = table(&[("JPY", 100, 16.0), ("EUR", 1, 25.0)]);
        let rate = cross_rate(
            &rates,
            &CurrencyCode::CZK,
            QuotationConvention::Indirect,
            &code("JPY"),
            &code("EUR"),
        )
        .unwrap();
        assert_close(rate, (100.0 / 16.0) / (1.0 / 25.0));
    }

    #[test]
    fn test_direct_rate_and_cross_rate() {
        let rates = table(&[("CZK", 1, 25.0), ("USD", 1, 1.08)]);
        let default = CurrencyCode::EUR;

        let direct = QuotationConvention::Direct;

        let rate = resolve_rate(&rates, &default, direct, "CZK".into(), None).unwrap();
        assert_eq!(rate, 25.0);

        let rate = resolve_rate(
            &rates,
            &default,
            QuotationConvention::Direct,
            "CZK".into(),
            Some("USD".into()),
        )
        .unwrap();
        assert_close(rate, 25.0 / 1.08);
        assert!((rate - 23.15).abs() < 0.01);
    }

    #[test]
    fn test_explicit_default_from_matches_implicit() {
        let rates = table(&[("CZK", 1, 25.0)]);
        let implicit = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "CZK".into(),
            None,
        )
        .unwrap();
        let explicit = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "CZK".into(),
            Some("EUR".into()),
        )
        .unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_default_against_other_currency_is_inverse() {
        let rates = table(&[("USD", 1, 1.25)]);
        let rate = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "EUR".into(),
            Some("USD".into()),
        )
        .unwrap();
        assert_close(rate, 0.8);
    }

    #[test]
    fn test_identity_shortcuts_skip_the_table() {
        let empty = RateTable::new();
        for convention in [QuotationConvention::Direct, QuotationConvention::Indirect] {
            assert_eq!(
                resolve_rate(&empty, &CurrencyCode::CZK, convention, "CZK".into(), None).unwrap(),
                1.0
            );
            let same = Some("xyz".into());
            assert_eq!(
                resolve_rate(&empty, &CurrencyCode::CZK, convention, "XYZ".into(), same).unwrap(),
                1.0
            );
        }
    }

    #[test]
    fn test_unknown_currency_is_not_available() {
        let rates = table(&[("USD", 1, 1.08)]);
        let err = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "ZZZ".into(),
            None,
        )
        .unwrap_err();
        assert_eq!(err.missing_currency(), Some("ZZZ"));
    }

    #[test]
    fn test_unknown_from_currency_is_not_available() {
        let rates = table(&[("USD", 1, 1.08)]);
        let err = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "USD".into(),
            Some("ZZZ".into()),
        )
        .unwrap_err();
        assert_eq!(err.missing_currency(), Some("ZZZ"));
    }

    #[test]
    fn test_currency_is_checked_before_from() {
        let rates = table(&[("USD", 1, 1.08)]);
        let err = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "AAA".into(),
            Some("BBB".into()),
        )
        .unwrap_err();
        assert_eq!(err.missing_currency(), Some("AAA"));
    }

    #[test]
    fn test_malformed_code_is_not_available() {
        let rates = table(&[("USD", 1, 1.08)]);
        let err = resolve_rate(
            &rates,
            &CurrencyCode::EUR,
            QuotationConvention::Direct,
            "US".into(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExchangerError::CurrencyNotAvailable { ref currency } if currency == "US"
        ));
    }
}
