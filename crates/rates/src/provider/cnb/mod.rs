//! Czech National Bank provider.
//!
//! The CNB publishes its daily fixing as pipe-delimited text:
//!
//! ```text
//! 18.10.2024 #203
//! země|měna|množství|kód|kurz
//! EMU|euro|1|EUR|25,305
//! Japonsko|jen|100|JPY|15,512
//! ```
//!
//! The first line is the publication date and the second the header. Each
//! data row says that `amount` units of the currency cost `rate` CZK, so the
//! table uses the indirect quotation convention.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{ExchangerError, Result};
use crate::exchanger::Exchanger;
use crate::models::{CurrencyCode, QuotationConvention, RateEntry, RateTable};
use crate::provider::fetch_document;
use crate::transport::{HttpTransport, Transport};

const PROVIDER_ID: &str = "CNB";

const DEFAULT_URL: &str = "https://www.cnb.cz/cs/financni-trhy/devizovy-trh/kurzy-devizoveho-trhu/kurzy-devizoveho-trhu/denni_kurz.txt";

const FIELDS_PER_ROW: usize = 5;

/// Czech National Bank exchanger (default currency CZK).
pub struct CnbExchanger {
    transport: Arc<dyn Transport>,
    url: String,
}

impl CnbExchanger {
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            url: DEFAULT_URL.to_string(),
        }
    }

    /// Reads the fixing from a different location, e.g. a mirror.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Parses the daily fixing text into a rate table.
    fn parse_fixing(body: &str) -> std::result::Result<RateTable, String> {
        let mut lines = body.lines();
        if lines.next().is_none() || lines.next().is_none() {
            return Err("missing publication date or header".to_string());
        }

        let mut table = RateTable::new();
        for (index, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            // +3: one-based, after the date and header lines
            let line_no = index + 3;

            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            if fields.len() != FIELDS_PER_ROW {
                return Err(format!(
                    "line {}: expected {} fields, got {}",
                    line_no,
                    FIELDS_PER_ROW,
                    fields.len()
                ));
            }

            let amount = Self::parse_amount(fields[2])
                .ok_or_else(|| format!("line {}: invalid amount {:?}", line_no, fields[2]))?;
            let code = CurrencyCode::parse(fields[3])
                .map_err(|e| format!("line {}: {}", line_no, e))?;
            let rate = Self::parse_rate(fields[4])
                .ok_or_else(|| format!("line {}: invalid rate {:?}", line_no, fields[4]))?;
            let entry = RateEntry::new(amount, rate)
                .map_err(|e| format!("line {}: {}", line_no, e))?;

            table.insert(code, entry);
        }

        Ok(table)
    }

    /// Quotation amount, 1 when the column is empty.
    fn parse_amount(s: &str) -> Option<u32> {
        if s.is_empty() {
            return Some(1);
        }
        s.parse().ok()
    }

    /// Rates use a decimal comma (`25,305`).
    fn parse_rate(s: &str) -> Option<f64> {
        s.replace(',', ".").parse().ok()
    }
}

impl Default for CnbExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Exchanger for CnbExchanger {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn default_currency_code(&self) -> CurrencyCode {
        CurrencyCode::CZK
    }

    fn quotation_convention(&self) -> QuotationConvention {
        QuotationConvention::Indirect
    }

    async fn exchange_rates(&self) -> Result<RateTable> {
        let body = fetch_document(self.transport.as_ref(), PROVIDER_ID, &self.url).await?;
        let table = Self::parse_fixing(&body)
            .map_err(|message| ExchangerError::invalid_response(PROVIDER_ID, message))?;

        debug!("CNB fixing parsed: {} currencies", table.len());
        Ok(table)
    }
}
