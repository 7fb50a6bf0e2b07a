//! Score venues for a user under the current weather.
//!
//! The `VenueScorer` trait turns a [`Venue`] into a [`ScoredVenue`] given a
//! [`ScoringContext`]. Implementations also decide which weight vector they
//! score with, so the engine can report the weights it used.

use thiserror::Error;

use crate::{GeoPoint, ScoredVenue, ScoringWeights, UserPreferences, Venue, VenueId, WeatherContext};

/// Reasons a single venue cannot be scored.
///
/// These never abort a batch: the venue is excluded and the rest are
/// scored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The venue carried no coordinates.
    #[error("venue {id} has no coordinates")]
    MissingCoordinates {
        /// Offending venue.
        id: VenueId,
    },
    /// The venue's coordinates were not finite or out of range.
    #[error("venue {id} has invalid coordinates")]
    InvalidCoordinates {
        /// Offending venue.
        id: VenueId,
    },
}

/// Shared inputs for scoring one batch of venues.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// Normalised weather.
    pub weather: &'a WeatherContext,
    /// User's current location.
    pub origin: GeoPoint,
    /// User's preferences.
    pub preferences: &'a UserPreferences,
    /// Weights to aggregate with.
    pub weights: &'a ScoringWeights,
}

/// Calculate a score for a venue.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and pure: the same
/// venue and context always yield the same result.
///
/// Implementations must:
/// - Return [`ScoreError`] rather than a score for venues without usable
///   coordinates.
/// - Keep every dimension score and the total within `0.0..=100.0`.
///
/// Use [`VenueScorer::sanitise`] to apply the range guard.
///
/// # Examples
///
/// ```rust
/// use fairweather_core::{
///     Dimension, GeoPoint, ScoreBreakdown, ScoreError, ScoredVenue, ScoringContext,
///     ScoringWeights, UserPreferences, Venue, VenueScorer, WeatherContext,
/// };
///
/// struct FlatScorer;
///
/// impl VenueScorer for FlatScorer {
///     fn weights(&self, _: &WeatherContext, _: &UserPreferences) -> ScoringWeights {
///         ScoringWeights::new([(Dimension::Weather, 1.0)]).expect("static weights are valid")
///     }
///
///     fn score(&self, venue: &Venue, ctx: &ScoringContext<'_>) -> Result<ScoredVenue, ScoreError> {
///         let location = venue
///             .location
///             .ok_or_else(|| ScoreError::MissingCoordinates { id: venue.id.clone() })?;
///         let breakdown = ScoreBreakdown::new(Vec::new(), 50.0, 1.0);
///         Ok(ScoredVenue::new(venue.clone(), ctx.origin.distance_to(location), breakdown))
///     }
/// }
///
/// let weather = WeatherContext::neutral();
/// let preferences = UserPreferences::default();
/// let scorer = FlatScorer;
/// let weights = scorer.weights(&weather, &preferences);
/// let ctx = ScoringContext {
///     weather: &weather,
///     origin: GeoPoint::new(0.0, 0.0),
///     preferences: &preferences,
///     weights: &weights,
/// };
/// let venue = Venue::new("a", "A").with_location(0.0, 0.0);
/// assert_eq!(scorer.score(&venue, &ctx).map(|s| s.total_score()), Ok(50.0));
/// ```
pub trait VenueScorer: Send + Sync {
    /// Weight vector this scorer aggregates with for the given inputs.
    fn weights(&self, weather: &WeatherContext, preferences: &UserPreferences) -> ScoringWeights;

    /// Score a single venue.
    ///
    /// # Errors
    /// Returns [`ScoreError`] when the venue cannot be located.
    fn score(&self, venue: &Venue, context: &ScoringContext<'_>) -> Result<ScoredVenue, ScoreError>;

    /// Clamp a raw score into `0.0..=100.0`.
    ///
    /// Returns `0.0` for non-finite values.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        crate::clamp_score(score)
    }
}

impl<S: VenueScorer + ?Sized> VenueScorer for Box<S> {
    fn weights(&self, weather: &WeatherContext, preferences: &UserPreferences) -> ScoringWeights {
        (**self).weights(weather, preferences)
    }

    fn score(&self, venue: &Venue, context: &ScoringContext<'_>) -> Result<ScoredVenue, ScoreError> {
        (**self).score(venue, context)
    }
}

/// Resolve a venue's coordinates or explain why they are unusable.
///
/// # Errors
/// Returns [`ScoreError::MissingCoordinates`] or
/// [`ScoreError::InvalidCoordinates`].
pub fn venue_location(venue: &Venue) -> Result<GeoPoint, ScoreError> {
    let location = venue
        .location
        .ok_or_else(|| ScoreError::MissingCoordinates {
            id: venue.id.clone(),
        })?;
    if !location.is_valid() {
        return Err(ScoreError::InvalidCoordinates {
            id: venue.id.clone(),
        });
    }
    Ok(location)
}
