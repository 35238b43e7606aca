//! Canned provider payloads and exchanger builders shared by the integration tests.

use std::sync::Arc;

use chrono::NaiveDate;
use currency_rates::transport::{StaticTransport, TransportResponse};
use currency_rates::{
    BoeExchanger, CnbExchanger, CurrencyFreaksExchanger, EcbExchanger, Exchanger,
    OpenExchangeRatesExchanger,
};

pub const CNB_FIXING: &str = "18.10.2024 #203\n\
země|měna|množství|kód|kurz\n\
EMU|euro|1|EUR|25,305\n\
Japonsko|jen|100|JPY|15,512\n\
USA|dolar|1|USD|23,311\n";

pub const BOE_EXPORT: &str = "DATE,SERIES,VALUE\n\
18 Oct 2024,XUDLERS,1.2019\n\
18 Oct 2024,XUDLUSS,1.3051\n\
18 Oct 2024,XUDLJYS,194.51\n\
17 Oct 2024,XUDLERS,1.2003\n";

pub const ECB_HISTORY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gesmes:Envelope xmlns:gesmes="http://www.gesmes.org/xml/2002-08-01" xmlns="http://www.ecb.int/vocabulary/2002-08-01/eurofxref">
    <gesmes:subject>Reference rates</gesmes:subject>
    <Cube>
        <Cube time="2024-10-18">
            <Cube currency="USD" rate="1.0866"/>
            <Cube currency="JPY" rate="162.53"/>
            <Cube currency="CZK" rate="25.305"/>
        </Cube>
    </Cube>
</gesmes:Envelope>"#;

pub const CF_LATEST: &str = r#"{
    "date": "2024-10-18 00:00:00+00",
    "base": "USD",
    "rates": { "EUR": "0.9216", "CZK": "23.311", "JPY": "149.55", "USD": "1.0" }
}"#;

pub const OXR_LATEST: &str = r#"{
    "timestamp": 1729209600,
    "base": "USD",
    "rates": { "EUR": 0.9216, "CZK": 23.311, "JPY": 149.55, "USD": 1 }
}"#;

fn serving(body: &str) -> Arc<StaticTransport> {
    Arc::new(StaticTransport::always(TransportResponse::ok(body)))
}

/// One exchanger per provider, each answering from its canned payload.
pub fn all_exchangers() -> Vec<Box<dyn Exchanger>> {
    let boe_date = NaiveDate::from_ymd_opt(2024, 10, 18).unwrap();

    vec![
        Box::new(CnbExchanger::with_transport(serving(CNB_FIXING))),
        Box::new(
            BoeExchanger::with_transport(serving(BOE_EXPORT)).with_reference_date(boe_date),
        ),
        Box::new(EcbExchanger::with_transport(serving(ECB_HISTORY))),
        Box::new(
            CurrencyFreaksExchanger::new("cf-key")
                .unwrap()
                .with_transport(serving(CF_LATEST)),
        ),
        Box::new(
            OpenExchangeRatesExchanger::new("oxr-id")
                .unwrap()
                .with_transport(serving(OXR_LATEST)),
        ),
    ]
}

/// Exchangers whose transport fails every request with `response`.
pub fn all_exchangers_answering(response: TransportResponse) -> Vec<Box<dyn Exchanger>> {
    let transport = || Arc::new(StaticTransport::always(response.clone()));

    vec![
        Box::new(CnbExchanger::with_transport(transport())),
        Box::new(BoeExchanger::with_transport(transport())),
        Box::new(EcbExchanger::with_transport(transport())),
        Box::new(
            CurrencyFreaksExchanger::new("cf-key")
                .unwrap()
                .with_transport(transport()),
        ),
        Box::new(
            OpenExchangeRatesExchanger::new("oxr-id")
                .unwrap()
                .with_transport(transport()),
        ),
    ]
}
