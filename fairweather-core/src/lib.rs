//! Core domain types for the Fairweather engine.
//!
//! The crate models the inputs and outputs of weather-aware venue ranking:
//! raw weather observations and the bounded [`WeatherContext`] derived from
//! them, candidate [`Venue`]s, [`UserPreferences`], weight vectors and score
//! breakdowns. It also defines the two seams the engine is built around:
//! [`VenueScorer`] for scoring and [`RerankProvider`] for external
//! reranking.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod breakdown;
pub mod dimension;
pub mod location;
pub mod preferences;
pub mod request;
pub mod rerank;
pub mod scored;
pub mod scorer;
pub mod venue;
pub mod weather;
pub mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use breakdown::{DimensionScore, MAX_SCORE, ScoreBreakdown, clamp_score};
pub use dimension::Dimension;
pub use location::{EARTH_RADIUS_METERS, GeoPoint};
pub use preferences::{DEFAULT_RADIUS_METERS, ImportanceProfile, PreferenceFilters, UserPreferences};
pub use request::{
    RankRequest, RankRequestValidationError, RankResponse, ResponseMetadata, ValidatedRequest,
};
pub use rerank::{
    DisabledReranker, RerankCandidate, RerankError, RerankProvider, RerankRequest, RerankResult,
};
pub use scored::{FinalVenue, RankedVenue, ScoredVenue};
pub use scorer::{ScoreError, ScoringContext, VenueScorer, venue_location};
pub use venue::{
    Environment, INDOOR_TYPES, MAX_PRICE_LEVEL, MAX_RATING, OUTDOOR_TYPES, OpenState, SemanticTag,
    Venue, VenueId,
};
pub use weather::{
    ConditionCode, ConditionGroup, ObservationError, TemperatureUnit, TimeOfDay, WeatherContext,
    WeatherObservation,
};
pub use weights::{ScoringWeights, WEIGHT_SUM_TOLERANCE, WeightsError};
