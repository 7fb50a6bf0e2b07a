//! Concurrent venue gathering across search categories.
//!
//! Mapping providers are usually queried one category at a time. The
//! [`gather_venues`] helper issues one [`VenueSource::fetch`] per category
//! concurrently, keeps whatever succeeded and reports what did not, so a
//! single failing category never sinks the whole search.

mod http;

pub use http::{HttpVenueSource, HttpVenueSourceConfig};

use std::collections::HashSet;

use async_trait::async_trait;
use fairweather_core::{GeoPoint, INDOOR_TYPES, OUTDOOR_TYPES, Venue, WeatherContext};
use fairweather_scorer::is_extreme_weather;
use futures_util::future::join_all;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categories searched regardless of whether they are sheltered.
pub const MIXED_CATEGORIES: &[&str] = &["tourist_attraction", "market", "food_court"];

/// Severity at or below which the weather counts as mild.
pub const MILD_SEVERITY: f64 = 0.3;

/// Parameters of one venue search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatherQuery {
    /// Centre of the search.
    pub origin: GeoPoint,
    /// Search radius in metres.
    pub radius_meters: f64,
    /// Category to restrict the search to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl GatherQuery {
    /// An uncategorised search around `origin`.
    #[must_use]
    pub const fn new(origin: GeoPoint, radius_meters: f64) -> Self {
        Self {
            origin,
            radius_meters,
            category: None,
        }
    }

    /// Copy of this query restricted to `category`.
    #[must_use]
    pub fn for_category(&self, category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..self.clone()
        }
    }
}

/// Failures of a single venue fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatherError {
    /// The source could not be reached or refused the request.
    #[error("venue source unavailable: {message}")]
    Unavailable {
        /// Transport or status description.
        message: String,
    },
    /// The source did not answer in time.
    #[error("venue source timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },
    /// The source answered with something that is not a venue list.
    #[error("invalid venue source response: {message}")]
    InvalidResponse {
        /// Decoder error description.
        message: String,
    },
}

/// Asynchronous supplier of candidate venues.
///
/// Implementations are shared across concurrent fetches and must be
/// `Send + Sync`.
#[async_trait]
pub trait VenueSource: Send + Sync {
    /// Fetch venues matching `query`.
    ///
    /// # Errors
    /// Returns [`GatherError`] when the source is unreachable, slow or
    /// returns an unusable body.
    async fn fetch(&self, query: &GatherQuery) -> Result<Vec<Venue>, GatherError>;
}

/// A category whose fetch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    /// The category searched.
    pub category: String,
    /// Why the fetch failed.
    pub error: GatherError,
}

/// Merged result of a fan-out search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatherOutcome {
    /// Venues from successful categories, de-duplicated by id.
    pub venues: Vec<Venue>,
    /// Categories whose fetch failed, in request order.
    pub failed: Vec<CategoryFailure>,
}

impl GatherOutcome {
    /// Report whether every category succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Search every category concurrently and merge the results.
///
/// Successful batches are appended in category order; a venue already seen
/// under an earlier category is skipped. Repeated categories are searched
/// once. Failures are collected rather than propagated, and an empty
/// category list yields an empty outcome without calling the source.
///
/// # Examples
/// ```
/// use fairweather_core::{GeoPoint, Venue};
/// use fairweather_data::gather::{GatherError, GatherQuery, gather_venues};
/// use fairweather_data::test_support::StubVenueSource;
///
/// let source = StubVenueSource::new()
///     .with_venues("cafe", vec![Venue::new("a", "A"), Venue::new("b", "B")])
///     .with_venues("museum", vec![Venue::new("b", "B"), Venue::new("c", "C")])
///     .with_error("park", GatherError::Timeout { timeout_ms: 500 });
/// let query = GatherQuery::new(GeoPoint::new(51.5, -0.12), 1_500.0);
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let outcome = runtime.block_on(gather_venues(&source, &["cafe", "park", "museum"], &query));
/// let ids: Vec<&str> = outcome.venues.iter().map(|v| v.id.as_str()).collect();
/// assert_eq!(ids, vec!["a", "b", "c"]);
/// assert_eq!(outcome.failed.len(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
pub async fn gather_venues<S, C>(source: &S, categories: &[C], query: &GatherQuery) -> GatherOutcome
where
    S: VenueSource + ?Sized,
    C: AsRef<str>,
{
    let mut unique: Vec<&str> = Vec::with_capacity(categories.len());
    for category in categories.iter().map(AsRef::as_ref) {
        if !unique.contains(&category) {
            unique.push(category);
        }
    }

    let queries: Vec<GatherQuery> = unique.iter().map(|c| query.for_category(*c)).collect();
    let results = join_all(queries.iter().map(|q| source.fetch(q))).await;

    let mut seen = HashSet::new();
    let mut outcome = GatherOutcome::default();
    for (category, result) in unique.into_iter().zip(results) {
        match result {
            Ok(batch) => {
                debug!("category {category} returned {} venues", batch.len());
                outcome
                    .venues
                    .extend(batch.into_iter().filter(|venue| seen.insert(venue.id.clone())));
            }
            Err(error) => {
                warn!("category {category} failed: {error}");
                outcome.failed.push(CategoryFailure {
                    category: category.to_owned(),
                    error,
                });
            }
        }
    }
    outcome
}

/// Pick the categories worth searching in the given weather.
///
/// Severe weather narrows the search to sheltered categories. Mild, dry
/// weather searches outdoor and mixed categories. Anything in between
/// searches everything.
///
/// # Examples
/// ```
/// use fairweather_core::{ConditionCode, TimeOfDay, WeatherContext};
/// use fairweather_data::gather::categories_for;
///
/// let storm = WeatherContext::from_parts(8.0, ConditionCode::new(211), 0.9, TimeOfDay::Evening);
/// assert!(categories_for(&storm).contains(&"museum"));
/// assert!(!categories_for(&storm).contains(&"park"));
/// ```
#[must_use]
pub fn categories_for(weather: &WeatherContext) -> Vec<&'static str> {
    let indoor = INDOOR_TYPES.iter().copied();
    let outdoor = OUTDOOR_TYPES.iter().copied();
    let mixed = MIXED_CATEGORIES.iter().copied();
    if is_extreme_weather(weather) {
        indoor.collect()
    } else if weather.severity_score() <= MILD_SEVERITY && !weather.is_precipitation() {
        outdoor.chain(mixed).collect()
    } else {
        indoor.chain(outdoor).chain(mixed).collect()
    }
}
