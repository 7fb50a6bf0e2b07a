//! Error types raised while configuring scorers.
#![forbid(unsafe_code)]

use fairweather_core::WeightsError;
use thiserror::Error;

/// Errors raised when a scorer or weight calculator is misconfigured.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScorerConfigError {
    /// A weight profile failed validation.
    #[error("invalid weight profile")]
    InvalidProfile {
        /// Validation failure.
        #[source]
        source: WeightsError,
    },
    /// The share of the total reserved for the core dimensions was outside
    /// `0.0..=1.0`.
    #[error("core share {value} must lie within 0.0..=1.0")]
    CoreShare {
        /// Supplied share.
        value: f64,
    },
    /// The Bayesian prior was not usable.
    #[error("Bayesian prior mean {mean} with weight {weight} is invalid")]
    BayesianPrior {
        /// Supplied prior mean rating.
        mean: f64,
        /// Supplied pseudo-review count.
        weight: f64,
    },
}

impl From<WeightsError> for ScorerConfigError {
    fn from(source: WeightsError) -> Self {
        Self::InvalidProfile { source }
    }
}
