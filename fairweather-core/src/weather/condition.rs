//! OpenWeatherMap-style condition codes and their groups.

use serde::{Deserialize, Serialize};

/// Heavy rain codes treated as extreme weather.
pub const HEAVY_RAIN_CODES: [u16; 6] = [502, 503, 504, 511, 522, 531];
/// Heavy snow codes treated as extreme weather.
pub const HEAVY_SNOW_CODES: [u16; 2] = [602, 622];

/// Integer weather condition code.
///
/// Codes follow the OpenWeatherMap numbering: the hundreds digit selects the
/// group and `800..=804` distinguish clear sky from cloud cover. Code `0`
/// marks an unknown condition.
///
/// # Examples
/// ```
/// use fairweather_core::{ConditionCode, ConditionGroup};
///
/// let code = ConditionCode::new(501);
/// assert_eq!(code.group(), ConditionGroup::Rain);
/// assert!(code.is_precipitation());
/// assert!(!code.is_extreme());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ConditionCode(u16);

impl ConditionCode {
    /// Unknown or missing condition.
    pub const UNKNOWN: Self = Self(0);
    /// Clear sky.
    pub const CLEAR: Self = Self(800);
    /// Squalls.
    pub const SQUALL: Self = Self(771);
    /// Tornado.
    pub const TORNADO: Self = Self(781);

    /// Wrap a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Return the raw code.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Classify the code into its condition group.
    #[must_use]
    pub const fn group(self) -> ConditionGroup {
        match self.0 {
            200..=299 => ConditionGroup::Thunderstorm,
            300..=399 => ConditionGroup::Drizzle,
            500..=599 => ConditionGroup::Rain,
            600..=699 => ConditionGroup::Snow,
            700..=799 => ConditionGroup::Atmosphere,
            800 => ConditionGroup::Clear,
            801..=804 => ConditionGroup::Clouds,
            _ => ConditionGroup::Unknown,
        }
    }

    /// Report whether the code denotes falling precipitation.
    #[must_use]
    pub const fn is_precipitation(self) -> bool {
        matches!(
            self.group(),
            ConditionGroup::Thunderstorm
                | ConditionGroup::Drizzle
                | ConditionGroup::Rain
                | ConditionGroup::Snow
        )
    }

    /// Report whether the code belongs to the extreme set: any thunderstorm,
    /// heavy rain, heavy snow, squalls or a tornado.
    #[must_use]
    pub fn is_extreme(self) -> bool {
        matches!(self.group(), ConditionGroup::Thunderstorm)
            || HEAVY_RAIN_CODES.contains(&self.0)
            || HEAVY_SNOW_CODES.contains(&self.0)
            || self == Self::SQUALL
            || self == Self::TORNADO
    }
}

impl From<u16> for ConditionCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad family a [`ConditionCode`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionGroup {
    /// `2xx` thunderstorms.
    Thunderstorm,
    /// `3xx` drizzle.
    Drizzle,
    /// `5xx` rain.
    Rain,
    /// `6xx` snow.
    Snow,
    /// `7xx` mist, fog, dust and other atmospheric conditions.
    Atmosphere,
    /// `800` clear sky.
    Clear,
    /// `801..=804` cloud cover.
    Clouds,
    /// Anything outside the known ranges.
    Unknown,
}

impl ConditionGroup {
    /// Return the group as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
