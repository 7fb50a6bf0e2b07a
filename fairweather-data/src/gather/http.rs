//! `VenueSource` backed by an HTTP places endpoint.

use std::time::Duration;

use async_trait::async_trait;
use fairweather_core::Venue;
use reqwest::Client;
use serde::Deserialize;

use super::{GatherError, GatherQuery, VenueSource};
use crate::rerank::{DEFAULT_USER_AGENT, ProviderBuildError};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpVenueSource`].
#[derive(Debug, Clone)]
pub struct HttpVenueSourceConfig {
    /// Base URL; venues are read from `{base_url}/venues`.
    pub base_url: String,
    /// Timeout applied to every fetch.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl HttpVenueSourceConfig {
    /// Create a configuration with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the per-fetch timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum VenuesBody {
    List(Vec<Venue>),
    Wrapped { venues: Vec<Venue> },
}

/// Fetches venues as JSON from `GET {base_url}/venues`.
///
/// The search is passed as `lat`, `lng`, `radius` and, when set,
/// `category` query parameters. The body may be a bare venue array or an
/// object with a `venues` array.
#[derive(Debug, Clone)]
pub struct HttpVenueSource {
    client: Client,
    config: HttpVenueSourceConfig,
}

impl HttpVenueSource {
    /// Build a source from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: HttpVenueSourceConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    fn convert_error(&self, error: &reqwest::Error) -> GatherError {
        if error.is_timeout() {
            GatherError::Timeout {
                timeout_ms: u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if error.is_decode() {
            GatherError::InvalidResponse {
                message: error.to_string(),
            }
        } else {
            GatherError::Unavailable {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl VenueSource for HttpVenueSource {
    async fn fetch(&self, query: &GatherQuery) -> Result<Vec<Venue>, GatherError> {
        let url = format!("{}/venues", self.config.base_url.trim_end_matches('/'));
        let mut params = vec![
            ("lat", query.origin.lat.to_string()),
            ("lng", query.origin.lng.to_string()),
            ("radius", query.radius_meters.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|err| self.convert_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_error(&err))?;
        let body: VenuesBody = response.json().await.map_err(|err| self.convert_error(&err))?;
        Ok(match body {
            VenuesBody::List(venues) | VenuesBody::Wrapped { venues } => venues,
        })
    }
}
