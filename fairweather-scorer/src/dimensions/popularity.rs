//! Rating-driven dimensions: popularity, quality and social proof.

use fairweather_core::{MAX_RATING, Venue, clamp_score};

use crate::ScorerConfigError;

const NO_RATING_POPULARITY: f64 = 30.0;
const NO_RATING_QUALITY: f64 = 40.0;

/// Review-count thresholds and the adjustment each earns, largest first.
const REVIEW_ADJUSTMENTS: [(u32, f64); 4] = [(1_000, 10.0), (500, 7.0), (100, 5.0), (50, 3.0)];
const FEW_REVIEWS: u32 = 10;
const FEW_REVIEWS_PENALTY: f64 = -10.0;

fn review_adjustment(count: u32) -> f64 {
    if count < FEW_REVIEWS {
        return FEW_REVIEWS_PENALTY;
    }
    REVIEW_ADJUSTMENTS
        .iter()
        .find(|(threshold, _)| count >= *threshold)
        .map_or(0.0, |&(_, bonus)| bonus)
}

/// Score the venue's rating with a review-volume adjustment.
///
/// A missing review count is treated as zero reviews.
///
/// # Examples
/// ```
/// use fairweather_core::Venue;
/// use fairweather_scorer::dimensions::popularity_score;
///
/// let venue = Venue::new("v", "V").with_rating(4.5).with_review_count(120);
/// assert_eq!(popularity_score(&venue), 95.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rating is rescaled to 0..=100 and adjusted"
)]
pub fn popularity_score(venue: &Venue) -> f64 {
    let Some(rating) = venue.valid_rating() else {
        return NO_RATING_POPULARITY;
    };
    let base = rating / MAX_RATING * 100.0;
    clamp_score(base + review_adjustment(venue.review_count.unwrap_or(0)))
}

/// Prior belief used to shrink ratings with few reviews toward a mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesianPrior {
    mean: f64,
    weight: f64,
}

impl Default for BayesianPrior {
    fn default() -> Self {
        Self {
            mean: 4.0,
            weight: 25.0,
        }
    }
}

impl BayesianPrior {
    /// Build a prior from a mean rating and a pseudo-review count.
    ///
    /// # Errors
    /// Returns [`ScorerConfigError::BayesianPrior`] when the mean is outside
    /// `0.0..=5.0` or the weight is negative or not finite.
    pub fn new(mean: f64, weight: f64) -> Result<Self, ScorerConfigError> {
        if !(0.0..=MAX_RATING).contains(&mean) || !weight.is_finite() || weight < 0.0 {
            return Err(ScorerConfigError::BayesianPrior { mean, weight });
        }
        Ok(Self { mean, weight })
    }

    /// Prior mean rating.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Number of pseudo-reviews at the prior mean.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// Rating shrunk toward the prior mean by review volume.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted mean of prior and observed rating")]
    pub fn adjust(&self, rating: f64, reviews: u32) -> f64 {
        let n = f64::from(reviews);
        let denominator = self.weight + n;
        if denominator <= 0.0 {
            return rating;
        }
        (self.weight * self.mean + n * rating) / denominator
    }
}

/// Score the review-adjusted rating on a sigmoid centred on the prior mean.
///
/// A venue rated exactly at the prior mean scores 50.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "logistic curve over the adjusted rating")]
pub fn quality_score(venue: &Venue, prior: &BayesianPrior) -> f64 {
    let Some(rating) = venue.valid_rating() else {
        return NO_RATING_QUALITY;
    };
    let adjusted = prior.adjust(rating, venue.review_count.unwrap_or(0));
    let sigmoid = 1.0 / (1.0 + (-2.0 * (adjusted - prior.mean)).exp());
    clamp_score(100.0 * sigmoid)
}

/// Score review volume on a logarithmic scale capped at 100.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "logarithmic review scale")]
pub fn social_score(venue: &Venue) -> f64 {
    venue.review_count.map_or(0.0, |count| {
        clamp_score(25.0 * (1.0 + f64::from(count)).log10())
    })
}
