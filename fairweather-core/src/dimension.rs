//! Scoring dimensions.
//!
//! The enum names every axis a venue can be scored on, giving weight vectors
//! and importance profiles compile-time keys.
//!
//! # Examples
//! ```
//! use fairweather_core::Dimension;
//!
//! assert_eq!(Dimension::Weather.as_str(), "weather");
//! assert_eq!(Dimension::Social.to_string(), "social");
//! ```

use serde::{Deserialize, Serialize};

/// One axis of a venue's score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Fit between the venue's environment and the weather.
    Weather,
    /// Fit between the venue and the time of day.
    Time,
    /// Proximity to the user.
    Distance,
    /// Rating and review volume.
    Popularity,
    /// Bayesian-adjusted rating.
    Quality,
    /// Match with favourites, mood and blacklist.
    Personal,
    /// Whether the venue is open.
    Availability,
    /// Fit with the user's budget.
    Price,
    /// Review volume on a logarithmic scale.
    Social,
}

impl Dimension {
    /// The four dimensions driven by weather-sensitive weights.
    pub const CORE: [Self; 4] = [Self::Weather, Self::Time, Self::Distance, Self::Popularity];

    /// The five dimensions added by the extended model.
    pub const EXTENDED: [Self; 5] = [
        Self::Quality,
        Self::Personal,
        Self::Availability,
        Self::Price,
        Self::Social,
    ];

    /// Every dimension in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Weather,
        Self::Time,
        Self::Distance,
        Self::Popularity,
        Self::Quality,
        Self::Personal,
        Self::Availability,
        Self::Price,
        Self::Social,
    ];

    /// Return the dimension as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::Dimension;
    ///
    /// assert_eq!(Dimension::Availability.as_str(), "availability");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Time => "time",
            Self::Distance => "distance",
            Self::Popularity => "popularity",
            Self::Quality => "quality",
            Self::Personal => "personal",
            Self::Availability => "availability",
            Self::Price => "price",
            Self::Social => "social",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown dimension '{s}'"))
    }
}
