//! Weather-sensitive weight calculation.
//!
//! Weights for the four core dimensions come from two fixed profiles: a
//! standard profile for pleasant weather and an extreme profile that leans
//! on weather fit when conditions are harsh. Between the two the calculator
//! interpolates by severity. The extended calculator then blends those
//! weights with the user's importance vector across all nine dimensions.

#![forbid(unsafe_code)]

use fairweather_core::{Dimension, ImportanceProfile, ScoringWeights, WeatherContext};

use crate::ScorerConfigError;

/// Severity at or above which weather counts as extreme.
pub const EXTREME_SEVERITY: f64 = 0.7;

const FREEZING_C: f64 = 0.0;
const SCORCHING_C: f64 = 38.0;

/// Immutable weights for the four core dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightProfile {
    weather: f64,
    time: f64,
    distance: f64,
    popularity: f64,
}

impl WeightProfile {
    /// Profile used in pleasant weather.
    pub const STANDARD: Self = Self {
        weather: 0.35,
        time: 0.30,
        distance: 0.20,
        popularity: 0.15,
    };

    /// Profile used in extreme weather.
    pub const EXTREME: Self = Self {
        weather: 0.60,
        time: 0.20,
        distance: 0.12,
        popularity: 0.08,
    };

    /// Validate a custom profile.
    ///
    /// The values need not sum to one; they are normalised on use.
    ///
    /// # Errors
    /// Returns [`ScorerConfigError::InvalidProfile`] when a value is negative
    /// or not finite, or when all values are zero.
    pub fn new(
        weather: f64,
        time: f64,
        distance: f64,
        popularity: f64,
    ) -> Result<Self, ScorerConfigError> {
        let profile = Self {
            weather,
            time,
            distance,
            popularity,
        };
        ScoringWeights::new(profile.entries())?;
        Ok(profile)
    }

    /// Weight of one core dimension; zero for extended dimensions.
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Weather => self.weather,
            Dimension::Time => self.time,
            Dimension::Distance => self.distance,
            Dimension::Popularity => self.popularity,
            _ => 0.0,
        }
    }

    /// Linearly interpolate toward `other` by `factor` in `0.0..=1.0`.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::Dimension;
    /// use fairweather_scorer::WeightProfile;
    ///
    /// let midway = WeightProfile::STANDARD.interpolate(&WeightProfile::EXTREME, 0.5);
    /// assert!((midway.get(Dimension::Weather) - 0.475).abs() < 1e-12);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "interpolation is a weighted average of profile values"
    )]
    pub fn interpolate(&self, other: &Self, factor: f64) -> Self {
        let t = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            weather: lerp(self.weather, other.weather),
            time: lerp(self.time, other.time),
            distance: lerp(self.distance, other.distance),
            popularity: lerp(self.popularity, other.popularity),
        }
    }

    /// Normalised weight vector over the four core dimensions.
    #[must_use]
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights::sanitised(self.entries())
    }

    fn entries(&self) -> [(Dimension, f64); 4] {
        Dimension::CORE.map(|d| (d, self.get(d)))
    }
}

/// Report whether the weather calls for the extreme profile.
///
/// Weather is extreme when severity reaches [`EXTREME_SEVERITY`], when the
/// condition code is in the extreme set, or when the air is at or below
/// freezing or at or above 38 °C.
#[must_use]
pub fn is_extreme_weather(weather: &WeatherContext) -> bool {
    let temp = weather.temp_celsius();
    weather.severity_score() >= EXTREME_SEVERITY
        || weather.condition_code().is_extreme()
        || temp <= FREEZING_C
        || temp >= SCORCHING_C
}

/// Maps a weather context to core-dimension weights.
///
/// The calculation is a pure function of the context: identical contexts
/// always yield identical weights.
///
/// # Examples
/// ```
/// use fairweather_core::{ConditionCode, Dimension, TimeOfDay, WeatherContext};
/// use fairweather_scorer::DynamicWeightCalculator;
///
/// let storm = WeatherContext::from_parts(15.0, ConditionCode::new(211), 0.9, TimeOfDay::Evening);
/// let weights = DynamicWeightCalculator::default().calculate(&storm);
/// assert_eq!(weights.get(Dimension::Weather), 0.60);
/// assert_eq!(weights.get(Dimension::Popularity), 0.08);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicWeightCalculator {
    standard: WeightProfile,
    extreme: WeightProfile,
}

impl Default for DynamicWeightCalculator {
    fn default() -> Self {
        Self {
            standard: WeightProfile::STANDARD,
            extreme: WeightProfile::EXTREME,
        }
    }
}

impl DynamicWeightCalculator {
    /// Use custom standard and extreme profiles.
    #[must_use]
    pub const fn with_profiles(standard: WeightProfile, extreme: WeightProfile) -> Self {
        Self { standard, extreme }
    }

    /// Weights for the given weather.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "interpolation factor scales severity into 0..=1"
    )]
    pub fn calculate(&self, weather: &WeatherContext) -> ScoringWeights {
        if is_extreme_weather(weather) {
            return self.extreme.weights();
        }
        let factor = weather.severity_score().min(EXTREME_SEVERITY) / EXTREME_SEVERITY;
        self.standard.interpolate(&self.extreme, factor).weights()
    }
}

/// Default share of each extended dimension before scaling.
pub const EXTENDED_DEFAULTS: [(Dimension, f64); 5] = [
    (Dimension::Quality, 0.30),
    (Dimension::Personal, 0.25),
    (Dimension::Availability, 0.15),
    (Dimension::Price, 0.15),
    (Dimension::Social, 0.15),
];

/// Default share of the total held by the four core dimensions.
pub const DEFAULT_CORE_SHARE: f64 = 0.6;

/// Blends dynamic weights with the user's importance vector across all
/// nine dimensions.
///
/// Core dimensions take [`DEFAULT_CORE_SHARE`] of the total, split by the
/// dynamic calculator; extended dimensions share the rest by
/// [`EXTENDED_DEFAULTS`]. Each dimension is then scaled by the user's
/// importance for it when one is set. If the user zeroes every dimension,
/// the unscaled blend is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtendedWeightCalculator {
    dynamic: DynamicWeightCalculator,
    core_share: f64,
}

impl Default for ExtendedWeightCalculator {
    fn default() -> Self {
        Self {
            dynamic: DynamicWeightCalculator::default(),
            core_share: DEFAULT_CORE_SHARE,
        }
    }
}

impl ExtendedWeightCalculator {
    /// Build a calculator with a custom core share.
    ///
    /// # Errors
    /// Returns [`ScorerConfigError::CoreShare`] when `core_share` is not
    /// within `0.0..=1.0`.
    pub fn new(
        dynamic: DynamicWeightCalculator,
        core_share: f64,
    ) -> Result<Self, ScorerConfigError> {
        if !(0.0..=1.0).contains(&core_share) {
            return Err(ScorerConfigError::CoreShare { value: core_share });
        }
        Ok(Self {
            dynamic,
            core_share,
        })
    }

    /// Dynamic calculator used for the core dimensions.
    #[must_use]
    pub const fn dynamic(&self) -> &DynamicWeightCalculator {
        &self.dynamic
    }

    /// Weights for the given weather and importance vector.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::{Dimension, ImportanceProfile, WeatherContext};
    /// use fairweather_scorer::ExtendedWeightCalculator;
    ///
    /// let importance = ImportanceProfile::new().with_importance(Dimension::Price, 0.0);
    /// let weights = ExtendedWeightCalculator::default()
    ///     .calculate(&WeatherContext::neutral(), &importance);
    /// assert_eq!(weights.get(Dimension::Price), 0.0);
    /// assert!((weights.total() - 1.0).abs() < 1e-9);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "blending scales each dimension by its share and importance"
    )]
    pub fn calculate(
        &self,
        weather: &WeatherContext,
        importance: &ImportanceProfile,
    ) -> ScoringWeights {
        let core = self.dynamic.calculate(weather);
        let extended_share = 1.0 - self.core_share;
        let base: Vec<(Dimension, f64)> = core
            .iter()
            .map(|(d, w)| (d, w * self.core_share))
            .chain(EXTENDED_DEFAULTS.iter().map(|&(d, w)| (d, w * extended_share)))
            .collect();

        let scaled: Vec<(Dimension, f64)> = base
            .iter()
            .map(|&(d, w)| (d, w * importance.importance(d).unwrap_or(1.0)))
            .collect();
        let scaled_total: f64 = scaled.iter().map(|(_, w)| w).sum();
        if scaled_total > 0.0 {
            ScoringWeights::sanitised(scaled)
        } else {
            ScoringWeights::sanitised(base)
        }
    }
}
