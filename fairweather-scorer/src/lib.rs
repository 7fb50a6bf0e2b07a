//! Weather-aware venue scoring.
//!
//! The crate turns a [`WeatherContext`](fairweather_core::WeatherContext)
//! and a batch of venues into scored venues:
//! - **Weight calculation** maps weather severity to a weight vector.
//!   [`DynamicWeightCalculator`] covers the four core dimensions and
//!   interpolates between a standard and an extreme profile;
//!   [`ExtendedWeightCalculator`] blends those weights with the user's
//!   importance vector across all nine dimensions.
//! - **Scoring** implements [`VenueScorer`](fairweather_core::VenueScorer)
//!   twice: [`OperationalScorer`] over the core dimensions and
//!   [`ExtendedScorer`] over all nine with a confidence discount.
//! - **Batch helpers** apply the user's hard filters
//!   ([`PreferenceFilter`]) and attach percentile ranks
//!   ([`assign_percentiles`]).
//!
//! # Examples
//!
//! ```
//! use fairweather_core::{GeoPoint, ScoringContext, UserPreferences, Venue, VenueScorer, WeatherContext};
//! use fairweather_scorer::{OperationalScorer, assign_percentiles, score_venues};
//!
//! let scorer = OperationalScorer::default();
//! let weather = WeatherContext::neutral();
//! let preferences = UserPreferences::default();
//! let weights = scorer.weights(&weather, &preferences);
//! let context = ScoringContext {
//!     weather: &weather,
//!     origin: GeoPoint::new(48.8566, 2.3522),
//!     preferences: &preferences,
//!     weights: &weights,
//! };
//! let venues = vec![
//!     Venue::new("near", "Near").with_location(48.8570, 2.3522),
//!     Venue::new("lost", "No coordinates"),
//! ];
//! let mut scored = score_venues(&scorer, &venues, &context);
//! assign_percentiles(&mut scored);
//! assert_eq!(scored.len(), 1);
//! ```

#![forbid(unsafe_code)]

mod confidence;
pub mod dimensions;
mod error;
mod extended;
mod filter;
mod operational;
mod percentile;
mod weights;

pub use confidence::{CONFIDENCE_FIELDS, CONFIDENCE_FLOOR, confidence, discount};
pub use dimensions::{BayesianPrior, DistanceModel, ParseDistanceModelError};
pub use error::ScorerConfigError;
pub use extended::{ExtendedScorer, ExtendedScorerConfig};
pub use filter::{Exclusion, PreferenceFilter};
pub use operational::OperationalScorer;
pub use percentile::assign_percentiles;
pub use weights::{
    DEFAULT_CORE_SHARE, DynamicWeightCalculator, EXTENDED_DEFAULTS, EXTREME_SEVERITY,
    ExtendedWeightCalculator, WeightProfile, is_extreme_weather,
};

use fairweather_core::{ScoredVenue, ScoringContext, Venue, VenueScorer};

/// Score a batch and drop venues that cannot be scored or fail the user's
/// filters.
///
/// Scoring errors and exclusions never abort the batch; each is logged and
/// the venue skipped. Output order follows input order.
pub fn score_venues<S>(scorer: &S, venues: &[Venue], context: &ScoringContext<'_>) -> Vec<ScoredVenue>
where
    S: VenueScorer + ?Sized,
{
    let filter = PreferenceFilter::new(context.preferences);
    venues
        .iter()
        .filter_map(|venue| match scorer.score(venue, context) {
            Ok(scored) => Some(scored),
            Err(err) => {
                log::warn!("skipping venue {}: {err}", venue.id);
                None
            }
        })
        .filter(|scored| match filter.check(scored) {
            Ok(()) => true,
            Err(reason) => {
                log::debug!("excluding venue {}: {reason}", scored.id());
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{GeoPoint, UserPreferences, WeatherContext};
    use rstest::rstest;

    #[rstest]
    fn keeps_input_order_and_skips_failures() {
        let scorer = ExtendedScorer::default();
        let weather = WeatherContext::neutral();
        let preferences = UserPreferences::default().with_blacklist(["casino"]);
        let weights = scorer.weights(&weather, &preferences);
        let context = ScoringContext {
            weather: &weather,
            origin: GeoPoint::new(0.0, 0.0),
            preferences: &preferences,
            weights: &weights,
        };
        let venues = vec![
            Venue::new("b", "B").with_location(0.01, 0.0),
            Venue::new("bad", "Bad").with_location(95.0, 0.0),
            Venue::new("casino", "Casino")
                .with_location(0.0, 0.0)
                .with_types(["casino"]),
            Venue::new("a", "A").with_location(0.0, 0.0),
        ];
        let scored = score_venues(&scorer, &venues, &context);
        let ids: Vec<&str> = scored.iter().map(|s| s.id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[rstest]
    fn works_through_a_trait_object() {
        let scorer: Box<dyn VenueScorer> = Box::new(OperationalScorer::default());
        let weather = WeatherContext::neutral();
        let preferences = UserPreferences::default();
        let weights = scorer.weights(&weather, &preferences);
        let context = ScoringContext {
            weather: &weather,
            origin: GeoPoint::new(0.0, 0.0),
            preferences: &preferences,
            weights: &weights,
        };
        let venues = [Venue::new("a", "A").with_location(0.0, 0.0)];
        assert_eq!(score_venues(scorer.as_ref(), &venues, &context).len(), 1);
    }
}
