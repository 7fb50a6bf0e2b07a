//! `RerankProvider` backed by an HTTP reranking service.

use std::time::Duration;

use fairweather_core::{RerankError, RerankProvider, RerankRequest, VenueId};
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::wire::RerankResponse;

/// Error type for [`HttpRerankProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for reranking requests.
pub const DEFAULT_USER_AGENT: &str = "fairweather-rerank/0.1";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration for [`HttpRerankProvider`].
///
/// The per-request timeout is not part of the configuration: every call
/// to [`RerankProvider::rerank`] is bounded by the timeout the caller
/// passes.
#[derive(Clone)]
pub struct HttpRerankProviderConfig {
    /// Base URL of the reranking service (e.g., `"http://localhost:8080"`).
    pub base_url: String,
    /// Bearer token sent in the `Authorization` header, if any.
    pub api_key: Option<String>,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpRerankProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRerankProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRerankProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            api_key: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRerankProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/rerank", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP reranking provider.
///
/// Implements the synchronous [`RerankProvider`] trait by blocking on an
/// asynchronous `reqwest` call. The provider owns a current-thread Tokio
/// runtime reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the stored runtime drives the request. Inside
/// a multi-threaded runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]) the ambient handle is used through
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime the
/// provider falls back to its own runtime, which blocks the caller's
/// executor for the duration of the request.
pub struct HttpRerankProvider {
    client: Client,
    config: HttpRerankProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRerankProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRerankProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRerankProvider {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRerankProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRerankProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Borrow the configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpRerankProviderConfig {
        &self.config
    }

    async fn rerank_async(
        &self,
        request: &RerankRequest,
        timeout: Duration,
    ) -> Result<Vec<VenueId>, RerankError> {
        let url = self.config.endpoint();
        debug!(
            "requesting rerank of {} venues from {url}",
            request.venues.len()
        );

        let mut builder = self.client.post(&url).timeout(timeout).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_owned()
            } else {
                body.trim().to_owned()
            };
            return Err(RerankError::Http {
                url,
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, timeout))?;
        serde_json::from_slice::<RerankResponse>(&body)
            .map_err(|err| RerankError::Parse {
                message: err.to_string(),
            })?
            .into_ids()
    }
}

fn convert_reqwest_error(error: &reqwest::Error, url: &str, timeout: Duration) -> RerankError {
    if error.is_timeout() {
        return RerankError::Timeout {
            url: url.to_owned(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };
    }

    if let Some(status) = error.status() {
        return RerankError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    RerankError::Network {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

impl RerankProvider for HttpRerankProvider {
    fn rerank(
        &self,
        request: &RerankRequest,
        timeout: Duration,
    ) -> Result<Vec<VenueId>, RerankError> {
        if request.venues.is_empty() {
            return Err(RerankError::EmptyInput);
        }

        // block_in_place panics on a current_thread runtime, so only the
        // multi-threaded flavour borrows the ambient handle.
        let future = self.rerank_async(request, timeout);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CannedResponse, CannedServer};
    use fairweather_core::RerankCandidate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RerankRequest {
        let candidate = |id: &str| RerankCandidate {
            id: id.into(),
            name: id.to_uppercase(),
            types: vec!["cafe".into()],
            rating: Some(4.2),
            review_count: Some(80),
            distance_meters: 350.0,
            score: 72.0,
        };
        RerankRequest {
            venues: vec![candidate("a"), candidate("b")],
            weather_summary: "overcast clouds, 12°C".into(),
            user_context: Some("relaxed".into()),
        }
    }

    fn provider_for(server: &CannedServer) -> HttpRerankProvider {
        HttpRerankProvider::new(server.base_url()).expect("provider should build")
    }

    #[rstest]
    #[case("http://rerank.example.com", "http://rerank.example.com/rerank")]
    #[case("http://rerank.example.com/", "http://rerank.example.com/rerank")]
    #[case("http://host/api//", "http://host/api/rerank")]
    fn endpoint_strips_trailing_slashes(#[case] base: &str, #[case] expected: &str) {
        assert_eq!(HttpRerankProviderConfig::new(base).endpoint(), expected);
    }

    #[rstest]
    fn debug_output_redacts_the_api_key() {
        let config = HttpRerankProviderConfig::new("http://x").with_api_key("hunter2");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[rstest]
    fn empty_request_is_rejected_without_a_call() {
        let provider = HttpRerankProvider::new("http://127.0.0.1:9").expect("provider should build");
        let empty = RerankRequest {
            venues: Vec::new(),
            weather_summary: String::new(),
            user_context: None,
        };
        assert_eq!(
            provider.rerank(&empty, Duration::from_millis(50)),
            Err(RerankError::EmptyInput)
        );
    }

    #[rstest]
    fn posts_camel_case_json_with_bearer_token(request: RerankRequest) {
        let server = CannedServer::start([CannedResponse::json(200, r#"{"venueIds": ["b", "a"]}"#)]);
        let config = HttpRerankProviderConfig::new(server.base_url()).with_api_key("token-1");
        let provider = HttpRerankProvider::with_config(config).expect("provider should build");

        let ids = provider
            .rerank(&request, Duration::from_secs(5))
            .expect("rerank should succeed");

        assert_eq!(ids, vec![VenueId::new("b"), VenueId::new("a")]);
        let captured = server.requests();
        let sent = captured.first().expect("one request captured");
        assert_eq!(sent.method, "POST");
        assert_eq!(sent.path, "/rerank");
        assert_eq!(sent.header("authorization"), Some("Bearer token-1"));
        let body: serde_json::Value = serde_json::from_str(&sent.body).expect("json body");
        assert_eq!(body["weatherSummary"], "overcast clouds, 12°C");
        assert_eq!(body["userContext"], "relaxed");
        assert_eq!(body["venues"][1]["reviewCount"], 80);
    }

    #[rstest]
    fn non_success_status_maps_to_http_error(request: RerankRequest) {
        let server = CannedServer::start([CannedResponse::json(503, "overloaded")]);
        let result = provider_for(&server).rerank(&request, Duration::from_secs(5));
        match result {
            Err(RerankError::Http {
                status, message, ..
            }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "overloaded");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[rstest]
    fn malformed_body_maps_to_parse_error(request: RerankRequest) {
        let server = CannedServer::start([CannedResponse::json(200, "not json")]);
        let result = provider_for(&server).rerank(&request, Duration::from_secs(5));
        assert!(matches!(result, Err(RerankError::Parse { .. })), "{result:?}");
    }

    #[rstest]
    fn slow_service_maps_to_timeout(request: RerankRequest) {
        let server = CannedServer::start([
            CannedResponse::json(200, r#"["a"]"#).with_delay(Duration::from_millis(800))
        ]);
        let result = provider_for(&server).rerank(&request, Duration::from_millis(100));
        assert_eq!(
            result,
            Err(RerankError::Timeout {
                url: format!("{}/rerank", server.base_url()),
                timeout_ms: 100,
            })
        );
    }

    #[rstest]
    fn unreachable_service_maps_to_network_error(request: RerankRequest) {
        let base = CannedServer::unused_base_url();
        let provider = HttpRerankProvider::new(base).expect("provider should build");
        let result = provider.rerank(&request, Duration::from_secs(2));
        assert!(matches!(result, Err(RerankError::Network { .. })), "{result:?}");
    }

    #[rstest]
    fn works_inside_a_multi_threaded_runtime(request: RerankRequest) {
        let server = CannedServer::start([CannedResponse::json(200, r#"["a"]"#)]);
        let provider = provider_for(&server);
        let ambient = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        let ids = ambient.block_on(async { provider.rerank(&request, Duration::from_secs(5)) });
        drop(ambient);
        assert_eq!(ids, Ok(vec![VenueId::new("a")]));
    }
}
