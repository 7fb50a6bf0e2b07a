//! Request and response envelopes for one recommendation call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{FinalVenue, GeoPoint, ScoringWeights, UserPreferences, Venue, WeatherObservation};

/// Parameters for a recommendation request.
///
/// Fields are optional at the type level so that incomplete JSON payloads
/// can be rejected with a precise [`RankRequestValidationError`].
///
/// # Examples
/// ```rust
/// use fairweather_core::{GeoPoint, RankRequest, Venue, WeatherObservation};
///
/// let request = RankRequest {
///     weather: Some(WeatherObservation::new(18.0, 800, 1_700_000_000)),
///     candidates: Some(vec![Venue::new("a", "Park").with_location(51.5, -0.1)]),
///     user_location: Some(GeoPoint::new(51.5, -0.12)),
///     ..RankRequest::default()
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankRequest {
    /// Current weather at the user's location.
    #[serde(alias = "weatherObservation")]
    pub weather: Option<WeatherObservation>,
    /// Venues to rank.
    #[serde(alias = "candidateVenues", alias = "venues")]
    pub candidates: Option<Vec<Venue>>,
    /// User's current location; falls back to the stored preference.
    #[serde(alias = "userLocation")]
    pub user_location: Option<GeoPoint>,
    /// User's preferences.
    pub preferences: UserPreferences,
    /// Maximum number of venues to return.
    #[serde(alias = "maxResults")]
    pub max_results: Option<usize>,
    /// Mood for this request, overriding the stored preference.
    pub mood: Option<String>,
}

/// Errors returned by [`RankRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankRequestValidationError {
    /// No weather observation was supplied.
    #[error("weather observation is required")]
    MissingWeather,
    /// No candidate list was supplied.
    #[error("candidate venue list is required")]
    MissingCandidates,
    /// Neither the request nor the preferences carried a location.
    #[error("user location is required")]
    MissingUserLocation,
    /// The user location was not finite or outside WGS84 bounds.
    #[error("user location ({lat}, {lng}) is invalid")]
    InvalidUserLocation {
        /// Supplied latitude.
        lat: f64,
        /// Supplied longitude.
        lng: f64,
    },
    /// `max_results` was zero.
    #[error("max results must be positive")]
    ZeroMaxResults,
}

/// Borrowed view of a request that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedRequest<'a> {
    /// Weather observation.
    pub weather: &'a WeatherObservation,
    /// Candidate venues.
    pub candidates: &'a [Venue],
    /// Resolved user location.
    pub origin: GeoPoint,
    /// User's preferences.
    pub preferences: &'a UserPreferences,
    /// Requested result cap.
    pub max_results: Option<usize>,
    /// Resolved mood.
    pub mood: Option<&'a str>,
}

impl RankRequest {
    /// Check required fields and resolve the user's location and mood.
    ///
    /// # Errors
    /// Returns [`RankRequestValidationError`] when the weather, candidate
    /// list or user location is missing, the location is invalid, or
    /// `max_results` is zero.
    pub fn validate(&self) -> Result<ValidatedRequest<'_>, RankRequestValidationError> {
        let weather = self
            .weather
            .as_ref()
            .ok_or(RankRequestValidationError::MissingWeather)?;
        let candidates = self
            .candidates
            .as_deref()
            .ok_or(RankRequestValidationError::MissingCandidates)?;
        let origin = self
            .user_location
            .or(self.preferences.location)
            .ok_or(RankRequestValidationError::MissingUserLocation)?;
        if !origin.is_valid() {
            return Err(RankRequestValidationError::InvalidUserLocation {
                lat: origin.lat,
                lng: origin.lng,
            });
        }
        if self.max_results == Some(0) {
            return Err(RankRequestValidationError::ZeroMaxResults);
        }
        let mood = self
            .mood
            .as_deref()
            .or(self.preferences.mood.as_deref())
            .map(str::trim)
            .filter(|m| !m.is_empty());
        Ok(ValidatedRequest {
            weather,
            candidates,
            origin,
            preferences: &self.preferences,
            max_results: self.max_results,
            mood,
        })
    }
}

/// Metadata describing how a response was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMetadata {
    /// Number of candidates received.
    pub total_processed: usize,
    /// Number of venues returned.
    pub returned: usize,
    /// Whether an external reranker reordered the list.
    pub ai_reranking_applied: bool,
    /// Severity of the weather context.
    pub weather_severity: f64,
    /// Weight vector used for scoring.
    pub weights_used: ScoringWeights,
    /// Response time in seconds since the Unix epoch.
    pub timestamp: u64,
}

/// Ranked venues plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankResponse {
    /// Venues in final order.
    pub venues: Vec<FinalVenue>,
    /// How the list was produced.
    pub metadata: ResponseMetadata,
}
