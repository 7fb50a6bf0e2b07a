//! Per-venue score breakdowns.

use serde::{Deserialize, Serialize};

use crate::Dimension;

/// Upper bound of every score on the `0..=100` scale.
pub const MAX_SCORE: f64 = 100.0;

/// One dimension's share of a venue's total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Scored dimension.
    pub dimension: Dimension,
    /// Dimension score normalised into `0.0..=1.0`.
    pub value: f64,
    /// Weight the dimension carried.
    pub weight: f64,
    /// `value * weight * 100`.
    pub contribution: f64,
}

impl DimensionScore {
    /// Build an entry from a `0..=100` score and its weight.
    ///
    /// Non-finite scores count as zero.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::{Dimension, DimensionScore};
    ///
    /// let entry = DimensionScore::new(Dimension::Distance, 75.0, 0.2);
    /// assert_eq!(entry.value, 0.75);
    /// assert!((entry.contribution - 15.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn new(dimension: Dimension, score: f64, weight: f64) -> Self {
        let value = clamp_score(score) / MAX_SCORE;
        Self {
            dimension,
            value,
            weight,
            contribution: value * weight * MAX_SCORE,
        }
    }
}

/// Explanation of how a venue's total score was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Entries in dimension order.
    pub dimensions: Vec<DimensionScore>,
    /// Aggregate score in `0.0..=100.0`.
    pub total_score: f64,
    /// Fraction of expected venue fields that were present.
    pub confidence_level: f64,
    /// Share of the batch scoring strictly below this venue.
    pub percentile_rank: Option<f64>,
}

impl ScoreBreakdown {
    /// Assemble a breakdown, clamping the total and confidence into range.
    #[must_use]
    pub fn new(dimensions: Vec<DimensionScore>, total_score: f64, confidence_level: f64) -> Self {
        let confidence_level = if confidence_level.is_finite() {
            confidence_level.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            dimensions,
            total_score: clamp_score(total_score),
            confidence_level,
            percentile_rank: None,
        }
    }

    /// Look up the entry for a dimension.
    #[must_use]
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Raw `0..=100` score for a dimension, if it was scored.
    #[must_use]
    pub fn score_of(&self, dimension: Dimension) -> Option<f64> {
        self.dimension(dimension).map(|d| d.value * MAX_SCORE)
    }

    /// Sum of all contributions before any confidence discount.
    #[must_use]
    pub fn raw_total(&self) -> f64 {
        self.dimensions.iter().map(|d| d.contribution).sum()
    }
}

/// Clamp a score into `0.0..=100.0`, mapping non-finite values to zero.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, MAX_SCORE)
    } else {
        0.0
    }
}
