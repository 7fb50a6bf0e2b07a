//! Contract for external reranking services.
//!
//! A reranker receives the top of a deterministic ranking and returns its
//! preferred order as venue identifiers. It is treated as untrusted: the
//! orchestrator validates every identifier and falls back to the
//! deterministic order on any failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{RankedVenue, VenueId};

/// Minimal description of a venue sent to a reranker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankCandidate {
    /// Venue identifier the reranker must echo back.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Category tags.
    pub types: Vec<String>,
    /// Average rating.
    pub rating: Option<f64>,
    /// Number of reviews.
    pub review_count: Option<u32>,
    /// Distance from the user in metres.
    pub distance_meters: f64,
    /// Deterministic score in `0.0..=100.0`.
    pub score: f64,
}

impl From<&RankedVenue> for RerankCandidate {
    fn from(ranked: &RankedVenue) -> Self {
        let venue = &ranked.scored.venue;
        Self {
            id: venue.id.clone(),
            name: venue.name.clone(),
            types: venue.types.clone(),
            rating: venue.valid_rating(),
            review_count: venue.review_count,
            distance_meters: ranked.scored.distance_meters,
            score: ranked.scored.total_score(),
        }
    }
}

/// Payload for one reranking call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankRequest {
    /// Candidates in deterministic order.
    pub venues: Vec<RerankCandidate>,
    /// One-line weather description.
    pub weather_summary: String,
    /// Optional free-text context such as the user's mood.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_context: Option<String>,
}

/// Failures of a reranking call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RerankError {
    /// No candidates were supplied.
    #[error("at least one candidate is required")]
    EmptyInput,
    /// No reranking service is configured.
    #[error("reranking is disabled")]
    Disabled,
    /// The service did not answer within the caller's timeout.
    #[error("reranking request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Requested endpoint.
        url: String,
        /// Timeout that elapsed.
        timeout_ms: u64,
    },
    /// The service could not be reached.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested endpoint.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("reranking service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body could not be understood.
    #[error("malformed reranking response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The service reported a failure in its response body.
    #[error("reranking service error: {message}")]
    Service {
        /// Message returned by the service.
        message: String,
    },
    /// The response parsed but held no identifiers from the request.
    #[error("reranking response contained no known venue ids")]
    NoValidIds,
}

/// Reorder candidate venues through an external service.
///
/// Implementations must be `Send + Sync` and must not block for longer than
/// `timeout`. They are free to return identifiers outside the request; the
/// caller discards them.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use fairweather_core::{RerankError, RerankProvider, RerankRequest, VenueId};
///
/// struct Reverse;
///
/// impl RerankProvider for Reverse {
///     fn rerank(
///         &self,
///         request: &RerankRequest,
///         _timeout: Duration,
///     ) -> Result<Vec<VenueId>, RerankError> {
///         if request.venues.is_empty() {
///             return Err(RerankError::EmptyInput);
///         }
///         Ok(request.venues.iter().rev().map(|v| v.id.clone()).collect())
///     }
/// }
///
/// let request = RerankRequest {
///     venues: Vec::new(),
///     weather_summary: "clear".into(),
///     user_context: None,
/// };
/// assert_eq!(
///     Reverse.rerank(&request, Duration::from_secs(1)),
///     Err(RerankError::EmptyInput)
/// );
/// ```
pub trait RerankProvider: Send + Sync {
    /// Return the preferred order of `request.venues` as identifiers.
    ///
    /// # Errors
    /// Returns [`RerankError`] when the service is unavailable, slow or
    /// answers with something unusable.
    fn rerank(&self, request: &RerankRequest, timeout: Duration)
    -> Result<Vec<VenueId>, RerankError>;
}

impl<P: RerankProvider + ?Sized> RerankProvider for Box<P> {
    fn rerank(
        &self,
        request: &RerankRequest,
        timeout: Duration,
    ) -> Result<Vec<VenueId>, RerankError> {
        (**self).rerank(request, timeout)
    }
}

/// Reranker used when no service is configured; every call fails with
/// [`RerankError::Disabled`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledReranker;

impl RerankProvider for DisabledReranker {
    fn rerank(&self, _: &RerankRequest, _: Duration) -> Result<Vec<VenueId>, RerankError> {
        Err(RerankError::Disabled)
    }
}

/// Observable result of one orchestration call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RerankResult {
    /// Whether the reranked order was applied.
    pub success: bool,
    /// Validated order, present only on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_ids: Option<Vec<VenueId>>,
    /// Failure reason, present only on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RerankResult {
    /// Record a successful rerank.
    #[must_use]
    pub const fn succeeded(venue_ids: Vec<VenueId>) -> Self {
        Self {
            success: true,
            venue_ids: Some(venue_ids),
            error: None,
        }
    }

    /// Record a failed rerank.
    #[must_use]
    pub fn failed(error: &RerankError) -> Self {
        Self {
            success: false,
            venue_ids: None,
            error: Some(error.to_string()),
        }
    }
}
