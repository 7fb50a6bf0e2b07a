//! Normalised weight vectors over scoring dimensions.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::Dimension;

/// Allowed drift of a weight vector's sum from `1.0`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Drift below which a vector is already treated as normalised.
const NORMALISED_EPSILON: f64 = 1e-12;

/// Errors raised while building [`ScoringWeights`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightsError {
    /// No dimensions were supplied.
    #[error("weight vector must contain at least one dimension")]
    Empty,
    /// A weight was NaN or infinite.
    #[error("weight for {dimension} is not finite")]
    NonFinite {
        /// Offending dimension.
        dimension: Dimension,
    },
    /// A weight was below zero.
    #[error("weight for {dimension} is negative: {value}")]
    Negative {
        /// Offending dimension.
        dimension: Dimension,
        /// Supplied value.
        value: f64,
    },
    /// All weights were zero.
    #[error("weights must have a positive total")]
    ZeroTotal,
}

/// Non-negative weights keyed by [`Dimension`], summing to `1.0`.
///
/// Construction validates every weight and rescales the vector when its sum
/// drifts from one. Dimensions absent from the vector weigh zero.
///
/// # Examples
/// ```
/// use fairweather_core::{Dimension, ScoringWeights};
///
/// # fn main() -> Result<(), fairweather_core::WeightsError> {
/// let weights = ScoringWeights::new([(Dimension::Weather, 3.0), (Dimension::Distance, 1.0)])?;
/// assert_eq!(weights.get(Dimension::Weather), 0.75);
/// assert_eq!(weights.get(Dimension::Time), 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ScoringWeights {
    weights: BTreeMap<Dimension, f64>,
}

impl ScoringWeights {
    /// Validate and normalise a weight vector.
    ///
    /// Repeated dimensions keep the last value.
    ///
    /// # Errors
    /// Returns [`WeightsError`] when the vector is empty, contains a
    /// non-finite or negative weight, or sums to zero.
    pub fn new<I>(weights: I) -> Result<Self, WeightsError>
    where
        I: IntoIterator<Item = (Dimension, f64)>,
    {
        let mut map = BTreeMap::new();
        for (dimension, value) in weights {
            if !value.is_finite() {
                return Err(WeightsError::NonFinite { dimension });
            }
            if value < 0.0 {
                return Err(WeightsError::Negative { dimension, value });
            }
            map.insert(dimension, value);
        }
        if map.is_empty() {
            return Err(WeightsError::Empty);
        }
        let total: f64 = map.values().sum();
        if total <= 0.0 {
            return Err(WeightsError::ZeroTotal);
        }
        if (total - 1.0).abs() > NORMALISED_EPSILON {
            for value in map.values_mut() {
                *value /= total;
            }
        }
        Ok(Self { weights: map })
    }

    /// Build a normalised vector without failing.
    ///
    /// Non-finite and negative weights count as zero. When nothing positive
    /// remains, every supplied dimension (or [`Dimension::CORE`] when none
    /// were supplied) receives an equal share.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::{Dimension, ScoringWeights};
    ///
    /// let weights = ScoringWeights::sanitised([
    ///     (Dimension::Weather, f64::NAN),
    ///     (Dimension::Time, -1.0),
    /// ]);
    /// assert_eq!(weights.get(Dimension::Weather), 0.5);
    /// assert_eq!(weights.get(Dimension::Time), 0.5);
    /// ```
    #[must_use]
    pub fn sanitised<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (Dimension, f64)>,
    {
        let mut map: BTreeMap<Dimension, f64> = weights
            .into_iter()
            .map(|(dimension, value)| {
                let cleaned = if value.is_finite() && value > 0.0 {
                    value
                } else {
                    0.0
                };
                (dimension, cleaned)
            })
            .collect();
        if map.is_empty() {
            map = Dimension::CORE.into_iter().map(|d| (d, 0.0)).collect();
        }
        let total: f64 = map.values().sum();
        if total > 0.0 && total.is_finite() {
            if (total - 1.0).abs() > NORMALISED_EPSILON {
                for value in map.values_mut() {
                    *value /= total;
                }
            }
        } else {
            let share = 1.0 / f64::from(u32::try_from(map.len()).unwrap_or(u32::MAX));
            for value in map.values_mut() {
                *value = share;
            }
        }
        Self { weights: map }
    }

    /// Weight of `dimension`, or zero when it is not part of the vector.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.weights.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Report whether `dimension` is part of the vector.
    #[must_use]
    pub fn contains(&self, dimension: Dimension) -> bool {
        self.weights.contains_key(&dimension)
    }

    /// Iterate over `(dimension, weight)` pairs in dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.weights.iter().map(|(d, w)| (*d, *w))
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Number of dimensions in the vector.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Report whether the vector is empty. Always `false` once constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn normalises_to_unit_sum() {
        let weights = ScoringWeights::new([
            (Dimension::Weather, 2.0),
            (Dimension::Time, 1.0),
            (Dimension::Distance, 1.0),
        ])
        .expect("valid weights");
        assert!((weights.total() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
        assert!((weights.get(Dimension::Weather) - 0.5).abs() < 1e-12);
    }

    #[rstest]
    fn already_normalised_vector_is_untouched() {
        let weights = ScoringWeights::new([
            (Dimension::Weather, 0.60),
            (Dimension::Time, 0.20),
            (Dimension::Distance, 0.12),
            (Dimension::Popularity, 0.08),
        ])
        .expect("valid weights");
        assert_eq!(weights.get(Dimension::Weather), 0.60);
        assert_eq!(weights.get(Dimension::Popularity), 0.08);
    }

    #[rstest]
    #[case(vec![], WeightsError::Empty)]
    #[case(vec![(Dimension::Time, 0.0)], WeightsError::ZeroTotal)]
    #[case(
        vec![(Dimension::Time, -0.5)],
        WeightsError::Negative { dimension: Dimension::Time, value: -0.5 }
    )]
    #[case(
        vec![(Dimension::Price, f64::INFINITY)],
        WeightsError::NonFinite { dimension: Dimension::Price }
    )]
    fn rejects_invalid_vectors(
        #[case] input: Vec<(Dimension, f64)>,
        #[case] expected: WeightsError,
    ) {
        assert_eq!(ScoringWeights::new(input), Err(expected));
    }

    #[rstest]
    fn sanitised_rescales_positive_weights() {
        let weights = ScoringWeights::sanitised([
            (Dimension::Quality, 3.0),
            (Dimension::Price, 1.0),
            (Dimension::Social, f64::INFINITY),
        ]);
        assert!((weights.get(Dimension::Quality) - 0.75).abs() < 1e-12);
        assert_eq!(weights.get(Dimension::Social), 0.0);
        assert!((weights.total() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    #[rstest]
    fn sanitised_empty_input_spreads_over_core() {
        let weights = ScoringWeights::sanitised(std::iter::empty());
        assert_eq!(weights.len(), 4);
        assert!((weights.get(Dimension::Distance) - 0.25).abs() < 1e-12);
    }

    #[rstest]
    fn serialises_as_named_map() {
        let weights =
            ScoringWeights::new([(Dimension::Weather, 1.0)]).expect("valid weights");
        let json = serde_json::to_string(&weights).expect("serialise weights");
        assert_eq!(json, r#"{"weather":1.0}"#);
    }
}
