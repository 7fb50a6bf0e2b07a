//! Facade crate for the Fairweather venue ranking engine.
//!
//! This crate re-exports the core domain types, both scorers and the
//! recommendation engine. The HTTP reranking client and venue gathering
//! sit behind the `http-rerank` feature.

#![forbid(unsafe_code)]

pub use fairweather_core::{
    FinalVenue, GeoPoint, RankRequest, RankRequestValidationError, RankResponse, RerankError,
    RerankProvider, ScoreBreakdown, ScoringWeights, UserPreferences, Venue, VenueId, VenueScorer,
    WeatherContext, WeatherObservation,
};
pub use fairweather_rank::{EngineConfig, RankError, RecommendationEngine, RerankConfig};
pub use fairweather_scorer::{DistanceModel, ExtendedScorer, ExtendedScorerConfig, OperationalScorer};

#[cfg(feature = "http-rerank")]
pub use fairweather_data::{
    GatherOutcome, GatherQuery, HttpRerankProvider, HttpRerankProviderConfig, HttpVenueSource,
    VenueSource, gather_venues,
};
