//! Four-dimension scorer driven by the dynamic weight profile.

use fairweather_core::{
    Dimension, DimensionScore, ScoreBreakdown, ScoreError, ScoredVenue, ScoringContext,
    ScoringWeights, UserPreferences, Venue, VenueScorer, WeatherContext, venue_location,
};

use crate::{
    BayesianPrior, DistanceModel, DynamicWeightCalculator, confidence,
    dimensions::DimensionInputs,
};

/// Scores weather, time, distance and popularity.
///
/// Confidence is reported on the breakdown but does not discount the total.
///
/// # Examples
/// ```
/// use fairweather_core::{
///     GeoPoint, OpenState, ScoringContext, UserPreferences, Venue, VenueScorer, WeatherContext,
/// };
/// use fairweather_scorer::OperationalScorer;
///
/// let scorer = OperationalScorer::default();
/// let weather = WeatherContext::neutral();
/// let preferences = UserPreferences::default();
/// let weights = scorer.weights(&weather, &preferences);
/// let context = ScoringContext {
///     weather: &weather,
///     origin: GeoPoint::new(51.5, -0.12),
///     preferences: &preferences,
///     weights: &weights,
/// };
/// let cafe = Venue::new("c", "Cafe")
///     .with_location(51.5, -0.12)
///     .with_types(["cafe"])
///     .with_open_state(OpenState::Open);
/// let scored = scorer.score(&cafe, &context).expect("cafe has coordinates");
/// assert!(scored.total_score() > 50.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OperationalScorer {
    calculator: DynamicWeightCalculator,
    distance_model: DistanceModel,
}

impl OperationalScorer {
    /// Build a scorer with a custom weight calculator and distance model.
    #[must_use]
    pub const fn new(calculator: DynamicWeightCalculator, distance_model: DistanceModel) -> Self {
        Self {
            calculator,
            distance_model,
        }
    }

    /// Replace the distance model.
    #[must_use]
    pub const fn with_distance_model(mut self, distance_model: DistanceModel) -> Self {
        self.distance_model = distance_model;
        self
    }

    /// Distance model in use.
    #[must_use]
    pub const fn distance_model(&self) -> DistanceModel {
        self.distance_model
    }
}

impl VenueScorer for OperationalScorer {
    fn weights(&self, weather: &WeatherContext, _preferences: &UserPreferences) -> ScoringWeights {
        self.calculator.calculate(weather)
    }

    fn score(&self, venue: &Venue, context: &ScoringContext<'_>) -> Result<ScoredVenue, ScoreError> {
        let location = venue_location(venue)?;
        let distance_meters = context.origin.distance_to(location);
        let prior = BayesianPrior::default();
        let inputs = DimensionInputs {
            venue,
            distance_meters,
            context,
            distance_model: self.distance_model,
            prior: &prior,
        };
        let dimensions: Vec<DimensionScore> = Dimension::CORE
            .into_iter()
            .map(|d| DimensionScore::new(d, inputs.score(d), context.weights.get(d)))
            .collect();
        let total: f64 = dimensions.iter().map(|d| d.contribution).sum();
        let breakdown = ScoreBreakdown::new(dimensions, Self::sanitise(total), confidence(venue));
        Ok(ScoredVenue::new(venue.clone(), distance_meters, breakdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{ConditionCode, GeoPoint, OpenState, TimeOfDay};
    use rstest::{fixture, rstest};

    const ORIGIN: GeoPoint = GeoPoint::new(51.5074, -0.1278);

    #[fixture]
    fn sunny() -> WeatherContext {
        WeatherContext::from_parts(22.0, ConditionCode::CLEAR, 0.0, TimeOfDay::Afternoon)
    }

    fn score_with(venue: &Venue, weather: &WeatherContext) -> Result<ScoredVenue, ScoreError> {
        let scorer = OperationalScorer::default();
        let preferences = UserPreferences::default();
        let weights = scorer.weights(weather, &preferences);
        let context = ScoringContext {
            weather,
            origin: ORIGIN,
            preferences: &preferences,
            weights: &weights,
        };
        scorer.score(venue, &context)
    }

    #[rstest]
    fn breakdown_covers_core_dimensions(sunny: WeatherContext) {
        let park = Venue::new("p", "Park")
            .with_location(ORIGIN.lat, ORIGIN.lng)
            .with_types(["park"])
            .with_open_state(OpenState::Open)
            .with_rating(4.0)
            .with_review_count(200);
        let scored = score_with(&park, &sunny).expect("park has coordinates");
        let breakdown = &scored.breakdown;
        assert_eq!(breakdown.dimensions.len(), 4);
        assert_eq!(breakdown.score_of(Dimension::Distance), Some(100.0));
        assert_eq!(breakdown.score_of(Dimension::Weather), Some(100.0));
        assert!((breakdown.total_score - breakdown.raw_total()).abs() < 1e-9);
        // 0.35*100 + 0.30*85 + 0.20*100 + 0.15*85
        assert!((breakdown.total_score - 93.25).abs() < 1e-6);
        assert!(breakdown.percentile_rank.is_none());
    }

    #[rstest]
    fn confidence_is_reported_without_discount(sunny: WeatherContext) {
        let bare = Venue::new("b", "Bare").with_location(ORIGIN.lat, ORIGIN.lng);
        let scored = score_with(&bare, &sunny).expect("venue has coordinates");
        assert!((scored.breakdown.confidence_level - 1.0 / 7.0).abs() < 1e-12);
        assert!((scored.total_score() - scored.breakdown.raw_total()).abs() < 1e-9);
    }

    #[rstest]
    fn missing_coordinates_are_an_error(sunny: WeatherContext) {
        let lost = Venue::new("x", "Nowhere");
        assert!(matches!(
            score_with(&lost, &sunny),
            Err(ScoreError::MissingCoordinates { .. })
        ));
    }

    #[rstest]
    fn input_venue_is_left_untouched(sunny: WeatherContext) {
        let venue = Venue::new("p", "Park").with_location(ORIGIN.lat, ORIGIN.lng);
        let before = venue.clone();
        let scored = score_with(&venue, &sunny).expect("venue has coordinates");
        assert_eq!(venue, before);
        assert_eq!(scored.venue, before);
    }
}
