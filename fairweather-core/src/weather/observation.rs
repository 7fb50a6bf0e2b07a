//! Raw weather observations as supplied by a weather provider.

use serde::{Deserialize, Serialize};

use super::ConditionCode;

/// Unit in which observation temperatures are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert `value`, expressed in this unit, to degrees Celsius.
    #[must_use]
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Return the unit as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        }
    }

    const fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single weather reading for the user's location.
///
/// Every numeric field is optional so partially populated provider payloads
/// still deserialise; [`WeatherContext::from_observation`] decides whether
/// the reading is usable.
///
/// [`WeatherContext::from_observation`]: crate::WeatherContext::from_observation
///
/// # Examples
/// ```
/// use fairweather_core::WeatherObservation;
///
/// let observation = WeatherObservation::new(14.0, 500, 1_700_000_000)
///     .with_precipitation(true)
///     .with_wind_speed(4.5);
/// assert_eq!(observation.temperature, Some(14.0));
/// assert!(observation.precipitation);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherObservation {
    /// Air temperature in [`Self::unit`].
    pub temperature: Option<f64>,
    /// Apparent temperature in [`Self::unit`].
    #[serde(alias = "feelsLike")]
    pub feels_like: Option<f64>,
    /// Provider condition code.
    #[serde(alias = "conditionCode")]
    pub condition_code: Option<ConditionCode>,
    /// Wind speed in metres per second.
    #[serde(alias = "windSpeed")]
    pub wind_speed: Option<f64>,
    /// Whether precipitation is currently falling.
    pub precipitation: bool,
    /// Observation time in seconds since the Unix epoch (UTC).
    pub timestamp: Option<i64>,
    /// Offset of the observed location from UTC, in seconds.
    #[serde(alias = "timezoneOffsetSeconds", alias = "timezoneOffset")]
    pub timezone_offset_seconds: i32,
    /// Human-readable condition description.
    pub description: String,
    /// Unit for [`Self::temperature`] and [`Self::feels_like`].
    pub unit: TemperatureUnit,
}

impl WeatherObservation {
    /// Construct an observation with the required numeric fields present.
    #[must_use]
    pub fn new(temperature: f64, condition_code: u16, timestamp: i64) -> Self {
        Self {
            temperature: Some(temperature),
            condition_code: Some(ConditionCode::new(condition_code)),
            timestamp: Some(timestamp),
            ..Self::default()
        }
    }

    /// Set the apparent temperature.
    #[must_use]
    pub const fn with_feels_like(mut self, feels_like: f64) -> Self {
        self.feels_like = Some(feels_like);
        self
    }

    /// Set the wind speed in metres per second.
    #[must_use]
    pub const fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }

    /// Set the precipitation flag.
    #[must_use]
    pub const fn with_precipitation(mut self, precipitation: bool) -> Self {
        self.precipitation = precipitation;
        self
    }

    /// Set the UTC offset of the observed location.
    #[must_use]
    pub const fn with_timezone_offset(mut self, seconds: i32) -> Self {
        self.timezone_offset_seconds = seconds;
        self
    }

    /// Set the temperature unit.
    #[must_use]
    pub const fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
