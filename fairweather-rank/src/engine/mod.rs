//! End-to-end ranking of one request.

use std::collections::HashSet;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use fairweather_core::{
    RankRequest, RankResponse, RerankProvider, ResponseMetadata, ScoringContext, UserPreferences,
    Venue, VenueScorer, WeatherContext,
};
use fairweather_scorer::{assign_percentiles, score_venues};

use crate::{RankError, RerankConfig, RerankOrchestrator, rank, select_diverse};

/// Default number of venues returned.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Settings for [`RecommendationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Venues returned when the request does not say.
    pub max_results: usize,
    /// Spread the top of the list across venue types.
    pub diversity: bool,
    /// Reranking settings.
    pub rerank: RerankConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            diversity: false,
            rerank: RerankConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Return `max_results` venues by default; zero is raised to one.
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Enable or disable diversity selection.
    #[must_use]
    pub const fn with_diversity(mut self, diversity: bool) -> Self {
        self.diversity = diversity;
        self
    }

    /// Replace the reranking settings.
    #[must_use]
    pub const fn with_rerank(mut self, rerank: RerankConfig) -> Self {
        self.rerank = rerank;
        self
    }
}

/// Ranks candidate venues for a user under the current weather.
///
/// The engine is generic over the scoring model and the reranking service:
/// validate, adapt the weather, weigh, score and filter, assign
/// percentiles, rank, optionally diversify, rerank, then truncate.
///
/// # Examples
/// ```
/// use fairweather_core::{DisabledReranker, GeoPoint, RankRequest, Venue, WeatherObservation};
/// use fairweather_rank::RecommendationEngine;
/// use fairweather_scorer::OperationalScorer;
///
/// let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
/// let request = RankRequest {
///     weather: Some(WeatherObservation::new(21.0, 800, 1_700_000_000)),
///     candidates: Some(vec![
///         Venue::new("park", "Park").with_location(51.501, -0.141).with_types(["park"]),
///         Venue::new("museum", "Museum").with_location(51.496, -0.176).with_types(["museum"]),
///     ]),
///     user_location: Some(GeoPoint::new(51.5, -0.14)),
///     ..RankRequest::default()
/// };
/// let response = engine.recommend(&request).expect("request is complete");
/// assert_eq!(response.metadata.total_processed, 2);
/// assert_eq!(response.venues.first().map(|v| v.id().as_str()), Some("park"));
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationEngine<S, R> {
    scorer: S,
    orchestrator: RerankOrchestrator<R>,
    config: EngineConfig,
}

impl<S, R> RecommendationEngine<S, R>
where
    S: VenueScorer,
    R: RerankProvider,
{
    /// Construct an engine using default configuration.
    pub fn new(scorer: S, reranker: R) -> Self {
        Self::with_config(scorer, reranker, EngineConfig::default())
    }

    /// Construct an engine with explicit configuration.
    pub const fn with_config(scorer: S, reranker: R, config: EngineConfig) -> Self {
        Self {
            scorer,
            orchestrator: RerankOrchestrator::with_config(reranker, config.rerank),
            config,
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rank the request's candidates.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidRequest`] when the weather, candidates or
    /// user location are missing or invalid. Nothing else fails: venues
    /// that cannot be scored are skipped and a failed rerank keeps the
    /// deterministic order.
    pub fn recommend(&self, request: &RankRequest) -> Result<RankResponse, RankError> {
        let validated = request.validate()?;
        let started_at = Instant::now();

        let weather = WeatherContext::from_observation(validated.weather);
        let preferences = UserPreferences {
            mood: validated.mood.map(str::to_owned),
            ..validated.preferences.clone()
        };
        let weights = self.scorer.weights(&weather, &preferences);
        let context = ScoringContext {
            weather: &weather,
            origin: validated.origin,
            preferences: &preferences,
            weights: &weights,
        };

        let candidates = dedupe(validated.candidates);
        let mut scored = score_venues(&self.scorer, &candidates, &context);
        assign_percentiles(&mut scored);

        let max_results = validated.max_results.unwrap_or(self.config.max_results);
        let mut ranked = rank(scored);
        if self.config.diversity {
            ranked = select_diverse(ranked, max_results);
        }

        let outcome = self
            .orchestrator
            .rerank(ranked, &weather.summary(), validated.mood);
        let mut venues = outcome.venues;
        venues.truncate(max_results);

        log::debug!(
            "ranked {} of {} candidates in {:?} (reranked: {})",
            venues.len(),
            validated.candidates.len(),
            started_at.elapsed(),
            outcome.ai_applied,
        );

        let metadata = ResponseMetadata {
            total_processed: validated.candidates.len(),
            returned: venues.len(),
            ai_reranking_applied: outcome.ai_applied,
            weather_severity: weather.severity_score(),
            weights_used: weights,
            timestamp: unix_seconds(),
        };
        Ok(RankResponse { venues, metadata })
    }
}

/// Drop repeated venue ids, keeping the first occurrence.
fn dedupe(candidates: &[Venue]) -> Vec<Venue> {
    let mut seen = HashSet::new();
    let unique: Vec<Venue> = candidates
        .iter()
        .filter(|venue| seen.insert(&venue.id))
        .cloned()
        .collect();
    let dropped = candidates.len() - unique.len();
    if dropped > 0 {
        log::debug!("dropped {dropped} duplicate candidate venues");
    }
    unique
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

#[cfg(test)]
mod tests;
