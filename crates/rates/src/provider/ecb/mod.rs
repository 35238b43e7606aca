//! European Central Bank provider.
//!
//! Reads the euro foreign exchange reference rates XML:
//!
//! ```text
//! <gesmes:Envelope ...>
//!   <Cube>
//!     <Cube time="2024-10-18">
//!       <Cube currency="USD" rate="1.0866"/>
//!       <Cube currency="JPY" rate="162.53"/>
//!     </Cube>
//!     <Cube time="2024-10-17">
//!       ...
//! ```
//!
//! The document is streamed and only the first (most recent) dated block
//! is read. Rates are "units of currency per 1 EUR".

use std::sync::Arc;

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::errors::{ExchangerError, Result};
use crate::exchanger::Exchanger;
use crate::models::{CurrencyCode, QuotationConvention, RateEntry, RateTable};
use crate::provider::fetch_document;
use crate::transport::{HttpTransport, Transport};

const PROVIDER_ID: &str = "ECB";

const DEFAULT_URL: &str = "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-hist.xml";

const CUBE: &[u8] = b"Cube";

/// European Central Bank exchanger (default currency EUR).
pub struct EcbExchanger {
    transport: Arc<dyn Transport>,
    url: String,
}

impl EcbExchanger {
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            url: DEFAULT_URL.to_string(),
        }
    }

    /// Reads a different reference rate document, e.g. `eurofxref-daily.xml`.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Streams the document and collects the first dated block.
    ///
    /// Reading stops at the first element after the dated `Cube` whose
    /// attribute count is not exactly two, or when that block closes.
    fn parse_reference_rates(xml: &str) -> std::result::Result<RateTable, String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Skip to the outer <Cube>
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == CUBE => break,
                Ok(Event::Eof) => return Err("no Cube element found".to_string()),
                Ok(_) => {}
                Err(e) => return Err(format!("XML error: {}", e)),
            }
        }

        // The dated <Cube time="..."> opening the most recent block
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == CUBE => {}
            Ok(Event::End(_)) | Ok(Event::Empty(_)) => return Ok(RateTable::new()),
            Ok(Event::Eof) => return Err("unexpected end of document".to_string()),
            Ok(other) => return Err(format!("unexpected node {:?}", other)),
            Err(e) => return Err(format!("XML error: {}", e)),
        }

        let mut table = RateTable::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                    if e.attributes().count() != 2 {
                        break;
                    }
                    let (code, entry) = Self::parse_rate_node(&e)?;
                    table.insert(code, entry);
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => return Err("unexpected end of document".to_string()),
                Ok(_) => {}
                Err(e) => return Err(format!("XML error: {}", e)),
            }
        }

        Ok(table)
    }

    /// Reads `<Cube currency="USD" rate="1.0866"/>`.
    fn parse_rate_node(
        node: &BytesStart<'_>,
    ) -> std::result::Result<(CurrencyCode, RateEntry), String> {
        let mut currency = None;
        let mut rate = None;

        for attribute in node.attributes() {
            let attribute = attribute.map_err(|e| format!("XML attribute error: {}", e))?;
            let value = attribute
                .unescape_value()
                .map_err(|e| format!("XML attribute error: {}", e))?;
            match attribute.key.local_name().as_ref() {
                b"currency" => currency = Some(value.into_owned()),
                b"rate" => rate = Some(value.into_owned()),
                _ => {}
            }
        }

        let currency = currency.ok_or_else(|| "rate node without currency".to_string())?;
        let rate = rate.ok_or_else(|| format!("{}: missing rate", currency))?;

        let code = CurrencyCode::parse(&currency).map_err(|e| e.to_string())?;
        let value: f64 = rate
            .trim()
            .parse()
            .map_err(|_| format!("{}: invalid rate {:?}", currency, rate))?;
        let entry = RateEntry::unit(value).map_err(|e| format!("{}: {}", currency, e))?;

        Ok((code, entry))
    }
}

impl Default for EcbExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Exchanger for EcbExchanger {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn default_currency_code(&self) -> CurrencyCode {
        CurrencyCode::EUR
    }

    fn quotation_convention(&self) -> QuotationConvention {
        QuotationConvention::Direct
    }

    async fn exchange_rates(&self) -> Result<RateTable> {
        let body = fetch_document(self.transport.as_ref(), PROVIDER_ID, &self.url).await?;
        let table = Self::parse_reference_rates(&body)
            .map_err(|message| ExchangerError::invalid_response(PROVIDER_ID, message))?;

        debug!("ECB reference rates parsed: {} currencies", table.len());
        Ok(table)
    }
}
