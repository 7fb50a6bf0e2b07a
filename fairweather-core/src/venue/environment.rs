//! Indoor/outdoor classification and derived semantic labels.

use serde::Serialize;

/// Venue types that are sheltered from the weather.
pub const INDOOR_TYPES: &[&str] = &[
    "aquarium",
    "art_gallery",
    "bar",
    "book_store",
    "bowling_alley",
    "cafe",
    "casino",
    "cinema",
    "gym",
    "library",
    "movie_theater",
    "museum",
    "night_club",
    "restaurant",
    "shopping_mall",
    "spa",
    "theater",
];

/// Venue types that are exposed to the weather.
pub const OUTDOOR_TYPES: &[&str] = &[
    "amusement_park",
    "beach",
    "botanical_garden",
    "campground",
    "dog_park",
    "garden",
    "hiking_area",
    "marina",
    "natural_feature",
    "park",
    "playground",
    "stadium",
    "viewpoint",
    "zoo",
];

/// Where a venue's activity takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Sheltered venue.
    Indoor,
    /// Exposed venue.
    Outdoor,
    /// Neither or both.
    Mixed,
}

impl Environment {
    /// Classify a list of type tags.
    ///
    /// A venue is indoor or outdoor only when its tags match exactly one of
    /// the two reference sets.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::Environment;
    ///
    /// assert_eq!(Environment::classify(&["museum".to_owned()]), Environment::Indoor);
    /// assert_eq!(
    ///     Environment::classify(&["park".to_owned(), "cafe".to_owned()]),
    ///     Environment::Mixed
    /// );
    /// ```
    #[must_use]
    pub fn classify(types: &[String]) -> Self {
        let indoor = types.iter().any(|t| INDOOR_TYPES.contains(&t.as_str()));
        let outdoor = types.iter().any(|t| OUTDOOR_TYPES.contains(&t.as_str()));
        match (indoor, outdoor) {
            (true, false) => Self::Indoor,
            (false, true) => Self::Outdoor,
            _ => Self::Mixed,
        }
    }

    /// Return the environment as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived label attached to scored venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticTag {
    /// Classified as indoor.
    Indoor,
    /// Classified as outdoor.
    Outdoor,
    /// Confirmed open right now.
    OpenNow,
    /// Rated 4.5 or higher.
    HighlyRated,
    /// Rated 4.0 or higher but below 4.5.
    WellRated,
}

impl SemanticTag {
    /// Return the tag as a kebab-case `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
            Self::OpenNow => "open-now",
            Self::HighlyRated => "highly-rated",
            Self::WellRated => "well-rated",
        }
    }
}

impl std::fmt::Display for SemanticTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
