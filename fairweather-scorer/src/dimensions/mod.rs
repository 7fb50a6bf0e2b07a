//! Per-dimension score functions.
//!
//! Every function here is pure and total: it accepts any venue and returns a
//! score in `0.0..=100.0`.

mod distance;
mod personal;
mod popularity;
mod time;
mod weather;

pub use distance::{DistanceModel, ParseDistanceModelError, distance_score};
pub use personal::{availability_score, mood_types, personal_score, price_score};
pub use popularity::{BayesianPrior, popularity_score, quality_score, social_score};
pub use time::{time_score, typical_types};
pub use weather::weather_score;

use fairweather_core::{Dimension, ScoringContext, Venue};

/// Everything a dimension function may need for one venue.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DimensionInputs<'a> {
    pub(crate) venue: &'a Venue,
    pub(crate) distance_meters: f64,
    pub(crate) context: &'a ScoringContext<'a>,
    pub(crate) distance_model: DistanceModel,
    pub(crate) prior: &'a BayesianPrior,
}

impl DimensionInputs<'_> {
    /// Score one dimension in `0.0..=100.0`.
    pub(crate) fn score(&self, dimension: Dimension) -> f64 {
        let preferences = self.context.preferences;
        match dimension {
            Dimension::Weather => weather_score(self.venue, self.context.weather),
            Dimension::Time => time_score(self.venue, self.context.weather.time_of_day()),
            Dimension::Distance => distance_score(self.distance_meters, self.distance_model),
            Dimension::Popularity => popularity_score(self.venue),
            Dimension::Quality => quality_score(self.venue, self.prior),
            Dimension::Personal => personal_score(self.venue, preferences),
            Dimension::Availability => availability_score(self.venue),
            Dimension::Price => price_score(self.venue, preferences.filters.max_price),
            Dimension::Social => social_score(self.venue),
        }
    }
}
