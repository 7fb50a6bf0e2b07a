//! Nine-dimension scorer with a data-completeness discount.

use fairweather_core::{
    Dimension, DimensionScore, ScoreBreakdown, ScoreError, ScoredVenue, ScoringContext,
    ScoringWeights, UserPreferences, Venue, VenueScorer, WeatherContext, venue_location,
};

use crate::{
    BayesianPrior, DistanceModel, ExtendedWeightCalculator,
    confidence::{confidence, discount},
    dimensions::DimensionInputs,
};

/// Settings for [`ExtendedScorer`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtendedScorerConfig {
    /// Distance model used for the distance dimension.
    pub distance_model: DistanceModel,
    /// Prior for the quality dimension.
    pub prior: BayesianPrior,
    /// Calculator blending dynamic weights with user importance.
    pub calculator: ExtendedWeightCalculator,
}

impl ExtendedScorerConfig {
    /// Replace the distance model.
    #[must_use]
    pub const fn with_distance_model(mut self, distance_model: DistanceModel) -> Self {
        self.distance_model = distance_model;
        self
    }

    /// Replace the quality prior.
    #[must_use]
    pub const fn with_prior(mut self, prior: BayesianPrior) -> Self {
        self.prior = prior;
        self
    }

    /// Replace the weight calculator.
    #[must_use]
    pub const fn with_calculator(mut self, calculator: ExtendedWeightCalculator) -> Self {
        self.calculator = calculator;
        self
    }
}

/// Scores all nine dimensions and discounts the total by confidence.
///
/// The discounted total is `raw * (0.7 + 0.3 * confidence)`, so sparse
/// venue records lose up to 30% of their score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtendedScorer {
    config: ExtendedScorerConfig,
}

impl ExtendedScorer {
    /// Build a scorer from its settings.
    #[must_use]
    pub const fn new(config: ExtendedScorerConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    #[must_use]
    pub const fn config(&self) -> &ExtendedScorerConfig {
        &self.config
    }
}

impl VenueScorer for ExtendedScorer {
    fn weights(&self, weather: &WeatherContext, preferences: &UserPreferences) -> ScoringWeights {
        self.config.calculator.calculate(weather, &preferences.importance)
    }

    fn score(&self, venue: &Venue, context: &ScoringContext<'_>) -> Result<ScoredVenue, ScoreError> {
        let location = venue_location(venue)?;
        let distance_meters = context.origin.distance_to(location);
        let inputs = DimensionInputs {
            venue,
            distance_meters,
            context,
            distance_model: self.config.distance_model,
            prior: &self.config.prior,
        };
        let dimensions: Vec<DimensionScore> = Dimension::ALL
            .into_iter()
            .map(|d| DimensionScore::new(d, inputs.score(d), context.weights.get(d)))
            .collect();
        let raw: f64 = dimensions.iter().map(|d| d.contribution).sum();
        let confidence_level = confidence(venue);
        let total = Self::sanitise(discount(raw, confidence_level));
        let breakdown = ScoreBreakdown::new(dimensions, total, confidence_level);
        Ok(ScoredVenue::new(venue.clone(), distance_meters, breakdown))
    }
}
