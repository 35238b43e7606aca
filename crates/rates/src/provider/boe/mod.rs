//! Bank of England provider.
//!
//! Rates come from the BoE interactive statistical database as CSV. The
//! request asks for a short window of daily spot series ("units of currency
//! per 1 GBP"), so the payload holds several dates per series:
//!
//! ```text
//! DATE,SERIES,VALUE
//! 18 Oct 2024,XUDLADS,1.9431
//! 18 Oct 2024,XUDLERS,1.2019
//! 17 Oct 2024,XUDLADS,1.9402
//! ```
//!
//! Only the first date block is kept. Rows are expected newest first; the
//! order is not verified.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use reqwest::Url;
use tracing::{debug, warn};

use crate::errors::{ExchangerError, Result, UnavailableReason};
use crate::exchanger::Exchanger;
use crate::models::{CurrencyCode, QuotationConvention, RateEntry, RateTable};
use crate::provider::fetch_document;
use crate::transport::{HttpTransport, Transport};

const PROVIDER_ID: &str = "BOE";

const BASE_URL: &str =
    "https://www.bankofengland.co.uk/boeapps/database/_iadb-fromshowcolumns.asp?csv.y=yes";

const DATE_FORMAT: &str = "%d %b %Y";

/// Days before the reference date covered by the request window.
const LOOKBACK_DAYS: i64 = 3;

/// Spot series published by the BoE and the currency each one quotes.
const SERIES: &[(&str, &str)] = &[
    ("XUDLADS", "AUD"),
    ("XUDLBK25", "CZK"),
    ("XUDLBK33", "HUF"),
    ("XUDLBK47", "PLN"),
    ("XUDLBK78", "ILS"),
    ("XUDLBK83", "MYR"),
    ("XUDLBK87", "THB"),
    ("XUDLBK89", "CNY"),
    ("XUDLBK93", "KRW"),
    ("XUDLBK95", "TRY"),
    ("XUDLBK97", "INR"),
    ("XUDLCDS", "CAD"),
    ("XUDLDKS", "DKK"),
    ("XUDLERS", "EUR"),
    ("XUDLHDS", "HKD"),
    ("XUDLJYS", "JPY"),
    ("XUDLNDS", "NZD"),
    ("XUDLNKS", "NOK"),
    ("XUDLSFS", "CHF"),
    ("XUDLSGS", "SGD"),
    ("XUDLSKS", "SEK"),
    ("XUDLSRS", "SAR"),
    ("XUDLTWS", "TWD"),
    ("XUDLUSS", "USD"),
    ("XUDLZRS", "ZAR"),
];

/// Column groups selected in the database query (`C=` parameters).
const COLUMNS: &[&str] = &[
    "EC3", "DS7", "5LA", "5OW", "IN7", "IN8", "INA", "INB", "INC", "IND", "INE", "ECL", "ECH",
    "C8J", "ECN", "C8N", "ECO", "EC6", "ECU", "ECQ", "ECC", "ECZ", "ECD", "C8P", "ECE",
];

/// Bank of England exchanger (default currency GBP).
pub struct BoeExchanger {
    transport: Arc<dyn Transport>,
    base_url: String,
    reference_date: Option<NaiveDate>,
}

impl BoeExchanger {
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: BASE_URL.to_string(),
            reference_date: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Pins "today" instead of reading the clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Currencies covered by the requested series, plus GBP. Does not fetch.
    pub fn supported_currencies() -> BTreeSet<CurrencyCode> {
        SERIES
            .iter()
            .filter_map(|(_, code)| CurrencyCode::parse(code).ok())
            .chain(std::iter::once(CurrencyCode::GBP))
            .collect()
    }

    fn series_currency(series: &str) -> Option<&'static str> {
        SERIES
            .iter()
            .find(|(code, _)| *code == series)
            .map(|(_, currency)| *currency)
    }

    /// The last weekday on or before `today`.
    fn window_end(today: NaiveDate) -> NaiveDate {
        match today.weekday() {
            Weekday::Sat => today - Duration::days(1),
            Weekday::Sun => today - Duration::days(2),
            _ => today,
        }
    }

    /// Database query covering the lookback window that ends on `today`.
    fn request_url(&self, today: NaiveDate) -> std::result::Result<Url, String> {
        let to = Self::window_end(today);
        let from = to - Duration::days(LOOKBACK_DAYS);

        let mut params: Vec<(&str, String)> = vec![
            ("csv.x", "yes".to_string()),
            ("CSVF", "CN".to_string()),
            ("DAT", "RNG".to_string()),
            ("FD", from.day().to_string()),
            ("Filter", "N".to_string()),
            ("FM", from.format("%b").to_string()),
            ("FNY", String::new()),
            ("FromSeries", "1".to_string()),
            ("FY", from.year().to_string()),
            ("TD", to.day().to_string()),
            ("TM", to.format("%b").to_string()),
            ("ToSeries", "50".to_string()),
            ("Travel", "NIxIRxSUx".to_string()),
            ("TY", to.year().to_string()),
        ];
        params.extend(COLUMNS.iter().map(|column| ("C", column.to_string())));

        Url::parse_with_params(&self.base_url, &params)
            .map_err(|e| format!("Failed to build URL: {}", e))
    }

    /// Parses the CSV export and keeps the first date block.
    fn parse_csv(body: &str) -> std::result::Result<RateTable, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut rows: Vec<(NaiveDate, &'static str, f64)> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| format!("Failed to read CSV: {}", e))?;
            if record.len() != 3 {
                continue;
            }

            let Some(currency) = Self::series_currency(&record[1]) else {
                warn!("BoE: skipping unknown series {}", &record[1]);
                continue;
            };
            let date = NaiveDate::parse_from_str(&record[0], DATE_FORMAT)
                .map_err(|e| format!("Invalid date {:?}: {}", &record[0], e))?;
            let value: f64 = record[2]
                .parse()
                .map_err(|_| format!("Invalid value {:?} for {}", &record[2], &record[1]))?;

            rows.push((date, currency, value));
        }

        let latest = rows.first().map(|(date, _, _)| *date);

        let mut table = RateTable::new();
        let latest_rows = rows
            .into_iter()
            .filter(|(date, _, _)| Some(*date) == latest);
        for (_, currency, value) in latest_rows {
            let code = CurrencyCode::parse(currency).map_err(|e| e.to_string())?;
            let entry = RateEntry::unit(value).map_err(|e| format!("{}: {}", currency, e))?;
            table.insert(code, entry);
        }

        Ok(table)
    }
}

impl Default for BoeExchanger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Exchanger for BoeExchanger {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn default_currency_code(&self) -> CurrencyCode {
        CurrencyCode::GBP
    }

    fn quotation_convention(&self) -> QuotationConvention {
        QuotationConvention::Direct
    }

    async fn exchange_rates(&self) -> Result<RateTable> {
        let today = self
            .reference_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let url = self.request_url(today).map_err(|message| {
            ExchangerError::unavailable(PROVIDER_ID, UnavailableReason::Transport(message))
        })?;

        let body = fetch_document(self.transport.as_ref(), PROVIDER_ID, url.as_str()).await?;
        let table = Self::parse_csv(&body)
            .map_err(|message| ExchangerError::invalid_response(PROVIDER_ID, message))?;

        debug!("BoE series parsed: {} currencies", table.len());
        Ok(table)
    }
}
