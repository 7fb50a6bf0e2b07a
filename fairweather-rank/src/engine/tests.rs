//! Tests for the `RecommendationEngine`.

use super::*;
use fairweather_core::test_support::StubReranker;
use fairweather_core::{
    DisabledReranker, GeoPoint, OpenState, PreferenceFilters, RankRequestValidationError,
    WeatherObservation,
};
use fairweather_scorer::{ExtendedScorer, OperationalScorer};
use rstest::{fixture, rstest};

const ORIGIN: GeoPoint = GeoPoint::new(51.5, -0.14);
/// 2023-11-14 14:00:00 UTC.
const AFTERNOON_UTC: i64 = 1_699_970_400;

fn venue(id: &str, kind: &str, lat_offset: f64) -> Venue {
    Venue::new(id, id)
        .with_types([kind])
        .with_location(ORIGIN.lat + lat_offset, ORIGIN.lng)
        .with_open_state(OpenState::Open)
}

#[fixture]
fn request() -> RankRequest {
    RankRequest {
        weather: Some(WeatherObservation::new(22.0, 800, AFTERNOON_UTC)),
        candidates: Some(vec![
            venue("park", "park", 0.001),
            venue("museum", "museum", 0.002),
            venue("bar", "bar", 0.05),
            venue("park-2", "park", 0.003),
        ]),
        user_location: Some(ORIGIN),
        ..RankRequest::default()
    }
}

#[rstest]
fn missing_weather_is_rejected(request: RankRequest) {
    let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
    let incomplete = RankRequest {
        weather: None,
        ..request
    };
    assert_eq!(
        engine.recommend(&incomplete),
        Err(RankError::InvalidRequest {
            source: RankRequestValidationError::MissingWeather
        })
    );
}

#[rstest]
fn ranks_and_reports_metadata(request: RankRequest) {
    let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
    let response = engine.recommend(&request).expect("request is complete");
    let ids: Vec<&str> = response.venues.iter().map(|v| v.id().as_str()).collect();
    assert_eq!(ids.first(), Some(&"park"));
    assert_eq!(ids.last(), Some(&"bar"));
    assert_eq!(response.metadata.total_processed, 4);
    assert_eq!(response.metadata.returned, 4);
    assert!(!response.metadata.ai_reranking_applied);
    assert!(response.metadata.timestamp > 0);
    let ranks: Vec<usize> = response.venues.iter().map(|v| v.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert!(
        response
            .venues
            .iter()
            .all(|v| v.breakdown.percentile_rank.is_some())
    );
}

#[rstest]
fn max_results_truncates(request: RankRequest) {
    let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
    let limited = RankRequest {
        max_results: Some(2),
        ..request
    };
    let response = engine.recommend(&limited).expect("request is complete");
    assert_eq!(response.venues.len(), 2);
    assert_eq!(response.metadata.returned, 2);
    assert_eq!(response.metadata.total_processed, 4);
}

#[rstest]
fn diversity_moves_a_new_type_up(request: RankRequest) {
    let config = EngineConfig::default().with_diversity(true);
    let engine =
        RecommendationEngine::with_config(OperationalScorer::default(), DisabledReranker, config);
    let response = engine.recommend(&request).expect("request is complete");
    let first_two: Vec<&str> = response
        .venues
        .iter()
        .take(2)
        .map(|v| v.id().as_str())
        .collect();
    assert_eq!(first_two, vec!["park", "museum"]);
}

#[rstest]
fn reranked_order_is_applied(request: RankRequest) {
    let engine = RecommendationEngine::new(
        ExtendedScorer::default(),
        StubReranker::with_ids(["bar", "museum"]),
    );
    let response = engine.recommend(&request).expect("request is complete");
    let ids: Vec<&str> = response.venues.iter().map(|v| v.id().as_str()).collect();
    assert_eq!(ids.get(..2), Some(&["bar", "museum"][..]));
    assert!(response.metadata.ai_reranking_applied);
}

#[rstest]
fn duplicate_candidates_are_scored_once(request: RankRequest) {
    let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
    let mut candidates = request.candidates.clone().unwrap_or_default();
    candidates.push(venue("park", "cafe", 0.0));
    let duplicated = RankRequest {
        candidates: Some(candidates),
        ..request
    };
    let response = engine.recommend(&duplicated).expect("request is complete");
    assert_eq!(response.venues.len(), 4);
    assert_eq!(response.metadata.total_processed, 5);
    let park = response
        .venues
        .iter()
        .find(|v| v.id().as_str() == "park")
        .expect("park is ranked");
    assert_eq!(park.venue.primary_type(), Some("park"));
}

#[rstest]
fn hard_filters_exclude_venues(mut request: RankRequest) {
    request.preferences = request.preferences.with_filters(PreferenceFilters {
        max_radius_meters: Some(1_000.0),
        ..PreferenceFilters::default()
    });
    let engine = RecommendationEngine::new(OperationalScorer::default(), DisabledReranker);
    let response = engine.recommend(&request).expect("request is complete");
    assert!(response.venues.iter().all(|v| v.id().as_str() != "bar"));
}

#[rstest]
fn request_mood_reaches_the_reranker(request: RankRequest) {
    let stub = StubReranker::reversing();
    let engine = RecommendationEngine::new(OperationalScorer::default(), stub);
    let with_mood = RankRequest {
        mood: Some("  cultural ".to_owned()),
        ..request
    };
    engine.recommend(&with_mood).expect("request is complete");
    let sent = engine
        .orchestrator
        .provider()
        .last_request()
        .expect("reranker was called");
    assert_eq!(sent.user_context.as_deref(), Some("cultural"));
}
