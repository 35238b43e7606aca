//! Fetching raw provider payloads.
//!
//! Exchangers never talk to the network directly. They ask a [`Transport`]
//! for the body behind a URL and interpret status and body themselves, so
//! tests can swap in canned payloads.

mod fixed;
mod http;

pub use fixed::StaticTransport;
pub use http::{HttpTransport, DEFAULT_REQUEST_TIMEOUT};

use async_trait::async_trait;
use thiserror::Error;

/// A completed request: HTTP status and the body as text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures that happen before any response is received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(String),
}

/// Source of raw provider payloads.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request and returns whatever the server answered.
    ///
    /// Non-2xx statuses are not errors at this level.
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;
}
