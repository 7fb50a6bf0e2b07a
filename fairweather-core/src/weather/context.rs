//! Normalise raw observations into a bounded weather context.
//!
//! The adapter is a pure function of its input. Observations missing a
//! usable temperature, condition code or timestamp produce the neutral
//! context instead of an error so callers can always keep scoring.

use log::warn;
use serde::Serialize;
use thiserror::Error;

use super::{ConditionCode, ConditionGroup, TemperatureUnit, WeatherObservation};

/// Temperature used by the neutral context, in degrees Celsius.
pub const NEUTRAL_TEMPERATURE_C: f64 = 20.0;
/// Severity used by the neutral context.
pub const NEUTRAL_SEVERITY: f64 = 0.5;
/// Description attached to the neutral context.
pub const NEUTRAL_DESCRIPTION: &str = "unavailable";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

const FREEZING_C: f64 = 0.0;
const COLD_C: f64 = 5.0;
const HOT_C: f64 = 32.0;
const SCORCHING_C: f64 = 38.0;
const GALE_MS: f64 = 17.0;
const BREEZY_MS: f64 = 10.0;

/// Bucket of the local day an observation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// 05:00 to 11:59.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 to 20:59.
    Evening,
    /// 21:00 to 04:59.
    Night,
}

impl TimeOfDay {
    /// Bucket a local hour in `0..24`.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
    /// assert_eq!(TimeOfDay::from_hour(20), TimeOfDay::Evening);
    /// assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    /// ```
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Bucket a UTC timestamp shifted by a timezone offset.
    #[must_use]
    pub fn from_timestamp(timestamp: i64, offset_seconds: i32) -> Self {
        let local = timestamp.saturating_add(i64::from(offset_seconds));
        let seconds_into_day = local.rem_euclid(SECONDS_PER_DAY);
        let hour = u32::try_from(seconds_into_day / SECONDS_PER_HOUR).unwrap_or_default();
        Self::from_hour(hour)
    }

    /// Return the bucket as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an observation cannot be normalised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    /// No temperature was reported.
    #[error("observation is missing a temperature")]
    MissingTemperature,
    /// The temperature was NaN or infinite.
    #[error("observation temperature is not finite")]
    NonFiniteTemperature,
    /// No condition code was reported.
    #[error("observation is missing a condition code")]
    MissingConditionCode,
    /// No timestamp was reported.
    #[error("observation is missing a timestamp")]
    MissingTimestamp,
}

/// Normalised, immutable weather state for one request.
///
/// All threshold checks go through [`WeatherContext::temp_celsius`], so the
/// unit reported by the provider never changes scoring behaviour.
///
/// # Examples
/// ```
/// use fairweather_core::{TimeOfDay, WeatherContext, WeatherObservation};
///
/// // 08:00 UTC on 14 November 2023.
/// let observation = WeatherObservation::new(2.0, 501, 1_699_948_800);
/// let context = WeatherContext::from_observation(&observation);
/// assert!(context.severity_score() >= 0.7);
/// assert_eq!(context.time_of_day(), TimeOfDay::Morning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherContext {
    temp: f64,
    feels_like: f64,
    unit: TemperatureUnit,
    condition_code: ConditionCode,
    severity_score: f64,
    time_of_day: TimeOfDay,
    description: String,
}

impl WeatherContext {
    /// Normalise an observation, falling back to [`Self::neutral`] when it
    /// is malformed.
    #[must_use]
    pub fn from_observation(observation: &WeatherObservation) -> Self {
        Self::try_from_observation(observation).unwrap_or_else(|err| {
            warn!("weather observation rejected ({err}); using neutral context");
            Self::neutral()
        })
    }

    /// Normalise an observation, reporting why it is unusable.
    ///
    /// # Errors
    /// Returns [`ObservationError`] when the temperature is missing or not
    /// finite, or when the condition code or timestamp is missing.
    pub fn try_from_observation(observation: &WeatherObservation) -> Result<Self, ObservationError> {
        let temp = observation
            .temperature
            .ok_or(ObservationError::MissingTemperature)?;
        if !temp.is_finite() {
            return Err(ObservationError::NonFiniteTemperature);
        }
        let condition_code = observation
            .condition_code
            .ok_or(ObservationError::MissingConditionCode)?;
        let timestamp = observation
            .timestamp
            .ok_or(ObservationError::MissingTimestamp)?;

        let unit = observation.unit;
        let feels_like = observation
            .feels_like
            .filter(|value| value.is_finite())
            .unwrap_or(temp);
        let wind_speed = observation.wind_speed.filter(|value| value.is_finite());
        let severity_score = compute_severity(
            condition_code,
            unit.to_celsius(temp),
            observation.precipitation,
            wind_speed,
        );
        let description = if observation.description.trim().is_empty() {
            condition_code.group().as_str().to_owned()
        } else {
            observation.description.trim().to_owned()
        };

        Ok(Self {
            temp,
            feels_like,
            unit,
            condition_code,
            severity_score,
            time_of_day: TimeOfDay::from_timestamp(timestamp, observation.timezone_offset_seconds),
            description,
        })
    }

    /// Conservative context used when no usable observation exists.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            temp: NEUTRAL_TEMPERATURE_C,
            feels_like: NEUTRAL_TEMPERATURE_C,
            unit: TemperatureUnit::Celsius,
            condition_code: ConditionCode::UNKNOWN,
            severity_score: NEUTRAL_SEVERITY,
            time_of_day: TimeOfDay::Afternoon,
            description: NEUTRAL_DESCRIPTION.to_owned(),
        }
    }

    /// Build a Celsius context from already-derived parts.
    ///
    /// Severity is clamped into `0.0..=1.0`; a non-finite severity becomes
    /// [`NEUTRAL_SEVERITY`].
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::{ConditionCode, TimeOfDay, WeatherContext};
    ///
    /// let context =
    ///     WeatherContext::from_parts(22.0, ConditionCode::CLEAR, 1.4, TimeOfDay::Evening);
    /// assert_eq!(context.severity_score(), 1.0);
    /// ```
    #[must_use]
    pub fn from_parts(
        temp_celsius: f64,
        condition_code: ConditionCode,
        severity_score: f64,
        time_of_day: TimeOfDay,
    ) -> Self {
        let severity_score = if severity_score.is_finite() {
            severity_score.clamp(0.0, 1.0)
        } else {
            NEUTRAL_SEVERITY
        };
        Self {
            temp: temp_celsius,
            feels_like: temp_celsius,
            unit: TemperatureUnit::Celsius,
            condition_code,
            severity_score,
            time_of_day,
            description: condition_code.group().as_str().to_owned(),
        }
    }

    /// Temperature in [`Self::unit`].
    #[must_use]
    pub const fn temp(&self) -> f64 {
        self.temp
    }

    /// Apparent temperature in [`Self::unit`].
    #[must_use]
    pub const fn feels_like(&self) -> f64 {
        self.feels_like
    }

    /// Unit of [`Self::temp`] and [`Self::feels_like`].
    #[must_use]
    pub const fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Temperature in degrees Celsius.
    #[must_use]
    pub fn temp_celsius(&self) -> f64 {
        self.unit.to_celsius(self.temp)
    }

    /// Condition code of the observation.
    #[must_use]
    pub const fn condition_code(&self) -> ConditionCode {
        self.condition_code
    }

    /// Weather harshness in `0.0..=1.0`.
    #[must_use]
    pub const fn severity_score(&self) -> f64 {
        self.severity_score
    }

    /// Local time-of-day bucket.
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Report whether the condition code denotes precipitation.
    #[must_use]
    pub const fn is_precipitation(&self) -> bool {
        self.condition_code.is_precipitation()
    }

    /// One-line summary handed to external rerankers.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::WeatherContext;
    ///
    /// let summary = WeatherContext::neutral().summary();
    /// assert_eq!(summary, "unavailable, 20.0°C, severity 0.50, afternoon");
    /// ```
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}, {:.1}{}, severity {:.2}, {}",
            self.description, self.temp, self.unit, self.severity_score, self.time_of_day
        )
    }
}

fn base_severity(code: ConditionCode) -> f64 {
    if code == ConditionCode::TORNADO {
        return 1.0;
    }
    match code.group() {
        ConditionGroup::Thunderstorm => 0.9,
        _ if code.is_extreme() => 0.8,
        ConditionGroup::Snow => 0.6,
        ConditionGroup::Rain => 0.55,
        ConditionGroup::Drizzle | ConditionGroup::Atmosphere => 0.3,
        ConditionGroup::Unknown => 0.2,
        ConditionGroup::Clouds => 0.1,
        ConditionGroup::Clear => 0.0,
    }
}

/// Derive a severity score in `0.0..=1.0` from the observed conditions.
///
/// Each rule only ever raises severity, so harsher inputs never produce a
/// lower score.
#[must_use]
pub fn compute_severity(
    code: ConditionCode,
    temp_celsius: f64,
    precipitation_flag: bool,
    wind_speed: Option<f64>,
) -> f64 {
    let mut severity = base_severity(code);
    if precipitation_flag {
        severity = severity.max(0.4);
    }

    if temp_celsius <= FREEZING_C || temp_celsius >= SCORCHING_C {
        severity = severity.max(0.7);
    } else if temp_celsius <= COLD_C || temp_celsius >= HOT_C {
        severity = severity.max(0.4);
    }
    // Cold rain compounds.
    if (code.is_precipitation() || precipitation_flag) && temp_celsius <= COLD_C {
        severity += 0.2;
    }

    if let Some(wind) = wind_speed {
        if wind >= BREEZY_MS {
            severity += 0.1;
        }
        if wind >= GALE_MS {
            severity = severity.max(0.7);
        }
    }
    severity.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NOON_UTC: i64 = 1_699_963_200;

    #[rstest]
    #[case(800, 22.0, false, None, 0.0)]
    #[case(803, 22.0, false, None, 0.1)]
    #[case(500, 15.0, false, None, 0.55)]
    #[case(300, 15.0, false, None, 0.3)]
    #[case(211, 25.0, false, None, 0.9)]
    #[case(781, 25.0, false, None, 1.0)]
    #[case(771, 25.0, false, None, 0.8)]
    #[case(502, 15.0, false, None, 0.8)]
    #[case(0, 20.0, false, None, 0.2)]
    #[case(800, 22.0, true, None, 0.4)]
    #[case(800, -3.0, false, None, 0.7)]
    #[case(800, 40.0, false, None, 0.7)]
    #[case(800, 4.0, false, None, 0.4)]
    #[case(800, 33.0, false, None, 0.4)]
    #[case(501, 2.0, false, None, 0.75)]
    #[case(800, 22.0, false, Some(20.0), 0.7)]
    #[case(803, 22.0, false, Some(12.0), 0.2)]
    #[case(601, -5.0, false, Some(12.0), 1.0)]
    fn computes_severity(
        #[case] code: u16,
        #[case] temp: f64,
        #[case] flag: bool,
        #[case] wind: Option<f64>,
        #[case] expected: f64,
    ) {
        let severity = compute_severity(ConditionCode::new(code), temp, flag, wind);
        assert!(
            (severity - expected).abs() < 1e-9,
            "expected {expected}, got {severity}"
        );
    }

    #[rstest]
    #[case(0, 0, TimeOfDay::Night)]
    #[case(4 * 3600 + 3599, 0, TimeOfDay::Night)]
    #[case(5 * 3600, 0, TimeOfDay::Morning)]
    #[case(12 * 3600, 0, TimeOfDay::Afternoon)]
    #[case(17 * 3600, 0, TimeOfDay::Evening)]
    #[case(21 * 3600, 0, TimeOfDay::Night)]
    #[case(22 * 3600, 8 * 3600, TimeOfDay::Morning)]
    #[case(3 * 3600, -5 * 3600, TimeOfDay::Night)]
    #[case(-3600, 0, TimeOfDay::Night)]
    fn buckets_local_hour(#[case] timestamp: i64, #[case] offset: i32, #[case] expected: TimeOfDay) {
        assert_eq!(TimeOfDay::from_timestamp(timestamp, offset), expected);
    }

    #[rstest]
    fn fahrenheit_thresholds_use_celsius() {
        let observation = WeatherObservation::new(28.0, 800, NOON_UTC)
            .with_unit(TemperatureUnit::Fahrenheit);
        let context = WeatherContext::from_observation(&observation);
        assert!(context.temp_celsius() < 0.0);
        assert!((context.temp() - 28.0).abs() < f64::EPSILON);
        assert!((context.severity_score() - 0.7).abs() < 1e-9);
    }

    #[rstest]
    #[case(WeatherObservation { temperature: None, ..WeatherObservation::new(1.0, 800, 0) })]
    #[case(WeatherObservation { temperature: Some(f64::NAN), ..WeatherObservation::new(1.0, 800, 0) })]
    #[case(WeatherObservation { condition_code: None, ..WeatherObservation::new(1.0, 800, 0) })]
    #[case(WeatherObservation { timestamp: None, ..WeatherObservation::new(1.0, 800, 0) })]
    fn malformed_observation_yields_neutral_context(#[case] observation: WeatherObservation) {
        assert!(WeatherContext::try_from_observation(&observation).is_err());
        assert_eq!(
            WeatherContext::from_observation(&observation),
            WeatherContext::neutral()
        );
    }

    #[rstest]
    fn neutral_context_is_moderate() {
        let context = WeatherContext::neutral();
        assert!((context.severity_score() - NEUTRAL_SEVERITY).abs() < f64::EPSILON);
        assert_eq!(context.time_of_day(), TimeOfDay::Afternoon);
        assert_eq!(context.condition_code(), ConditionCode::UNKNOWN);
        assert_eq!(context.description(), NEUTRAL_DESCRIPTION);
    }

    #[rstest]
    fn description_defaults_to_condition_group() {
        let observation = WeatherObservation::new(18.0, 301, NOON_UTC);
        let context = WeatherContext::from_observation(&observation);
        assert_eq!(context.description(), "drizzle");
        assert!((context.feels_like() - 18.0).abs() < f64::EPSILON);
    }
}
