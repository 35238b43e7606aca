use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Transport, TransportError, TransportResponse};

/// [`Transport`] that serves prepared responses instead of touching the network.
///
/// Useful for tests and for replaying saved provider payloads. Every
/// requested URL is recorded.
#[derive(Debug, Default)]
pub struct StaticTransport {
    routes: HashMap<String, Result<TransportResponse, TransportError>>,
    fallback: Option<Result<TransportResponse, TransportError>>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every request with `response`.
    pub fn always(response: TransportResponse) -> Self {
        Self {
            fallback: Some(Ok(response)),
            ..Self::default()
        }
    }

    /// Fails every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self {
            fallback: Some(Err(error)),
            ..Self::default()
        }
    }

    /// Answers requests for exactly `url` with `response`.
    pub fn route(mut self, url: impl Into<String>, response: TransportResponse) -> Self {
        self.routes.insert(url.into(), Ok(response));
        self
    }

    /// URLs requested so far, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for StaticTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        self.routes
            .get(url)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_else(|| Ok(TransportResponse::new(404, "")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_take_precedence_over_fallback() {
        let transport = StaticTransport::always(TransportResponse::ok("fallback"))
            .route("https://example.test/a", TransportResponse::ok("a"));

        let a = transport.get("https://example.test/a").await.unwrap();
        let b = transport.get("https://example.test/b").await.unwrap();

        assert_eq!(a.body, "a");
        assert_eq!(b.body, "fallback");
        assert_eq!(
            transport.requests(),
            vec!["https://example.test/a", "https://example.test/b"]
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let transport = StaticTransport::new();
        let response = transport.get("https://example.test/missing").await.unwrap();
        assert_eq!(response.status, 404);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_failing_transport() {
        let transport = StaticTransport::failing(TransportError::Timeout);
        assert_eq!(
            transport.get("https://example.test").await,
            Err(TransportError::Timeout)
        );
    }
}
