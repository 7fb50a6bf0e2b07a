//! Errors surfaced by the recommendation engine.

use fairweather_core::RankRequestValidationError;
use thiserror::Error;

/// Reasons a ranking request is rejected.
///
/// Only request validation can fail; scoring and reranking problems are
/// recovered inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The request was incomplete or invalid.
    #[error("invalid ranking request")]
    InvalidRequest {
        /// Validation failure.
        #[from]
        source: RankRequestValidationError,
    },
}
