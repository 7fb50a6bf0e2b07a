//! Distance fit: closer venues score higher.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fairweather_core::clamp_score;

const BANDS: [(f64, f64); 5] = [
    (500.0, 100.0),
    (1_000.0, 90.0),
    (2_000.0, 75.0),
    (5_000.0, 50.0),
    (10_000.0, 25.0),
];
const BEYOND_BANDS: f64 = 10.0;

const FLAT_UNTIL: f64 = 500.0;
const DECAY_FROM: f64 = 2_000.0;
const CUTOFF: f64 = 20_000.0;
const SCORE_AT_DECAY: f64 = 85.0;
const HALF_LIFE_START: f64 = 3_000.0;
const HALF_LIFE_END: f64 = 1_000.0;

/// How a distance in metres maps to a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Step function over fixed distance bands.
    #[default]
    Banded,
    /// Flat, then linear, then exponential decay to a 20 km cut-off.
    Continuous,
}

impl DistanceModel {
    /// Lowercase model name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banded => "banded",
            Self::Continuous => "continuous",
        }
    }

    /// Score a distance with this model.
    #[must_use]
    pub fn score(self, distance_meters: f64) -> f64 {
        distance_score(distance_meters, self)
    }
}

impl fmt::Display for DistanceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown distance model name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown distance model '{0}' (expected banded or continuous)")]
pub struct ParseDistanceModelError(String);

impl FromStr for DistanceModel {
    type Err = ParseDistanceModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banded" => Ok(Self::Banded),
            "continuous" => Ok(Self::Continuous),
            _ => Err(ParseDistanceModelError(s.to_owned())),
        }
    }
}

/// Score a distance in metres.
///
/// Both models are monotonically non-increasing and give the full 100 at
/// or within 500 m. Negative or non-finite distances score as zero metres
/// and infinity respectively.
///
/// # Examples
/// ```
/// use fairweather_scorer::dimensions::{DistanceModel, distance_score};
///
/// assert_eq!(distance_score(450.0, DistanceModel::Banded), 100.0);
/// assert_eq!(distance_score(3_000.0, DistanceModel::Banded), 50.0);
/// assert_eq!(distance_score(25_000.0, DistanceModel::Continuous), 0.0);
/// ```
#[must_use]
pub fn distance_score(distance_meters: f64, model: DistanceModel) -> f64 {
    let distance = if distance_meters.is_nan() {
        f64::INFINITY
    } else {
        distance_meters.max(0.0)
    };
    match model {
        DistanceModel::Banded => banded(distance),
        DistanceModel::Continuous => clamp_score(continuous(distance)),
    }
}

fn banded(distance: f64) -> f64 {
    BANDS
        .iter()
        .find(|(limit, _)| distance <= *limit)
        .map_or(BEYOND_BANDS, |&(_, score)| score)
}

#[expect(
    clippy::float_arithmetic,
    reason = "continuous model interpolates and decays over distance"
)]
fn continuous(distance: f64) -> f64 {
    if distance <= FLAT_UNTIL {
        return 100.0;
    }
    if distance <= DECAY_FROM {
        let t = (distance - FLAT_UNTIL) / (DECAY_FROM - FLAT_UNTIL);
        return 100.0 - (100.0 - SCORE_AT_DECAY) * t;
    }
    if distance > CUTOFF {
        return 0.0;
    }
    let progress = (distance - DECAY_FROM) / (CUTOFF - DECAY_FROM);
    let half_life = HALF_LIFE_START - (HALF_LIFE_START - HALF_LIFE_END) * progress;
    SCORE_AT_DECAY * 0.5_f64.powf((distance - DECAY_FROM) / half_life)
}
