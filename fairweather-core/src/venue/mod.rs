//! Candidate venues as supplied by a mapping provider.

mod environment;
mod id;

pub use environment::{Environment, INDOOR_TYPES, OUTDOOR_TYPES, SemanticTag};
pub use id::{OpenState, VenueId};

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Highest valid rating.
pub const MAX_RATING: f64 = 5.0;
/// Highest valid price level.
pub const MAX_PRICE_LEVEL: u8 = 4;

const HIGHLY_RATED: f64 = 4.5;
const WELL_RATED: f64 = 4.0;

/// A candidate point of interest.
///
/// Venues are read-only inputs: scoring wraps them in a new
/// [`ScoredVenue`](crate::ScoredVenue) rather than writing onto them.
///
/// # Examples
/// ```
/// use fairweather_core::{Environment, OpenState, Venue};
///
/// let venue = Venue::new("v1", "City Museum")
///     .with_location(51.5, -0.12)
///     .with_types(["museum", "tourist_attraction"])
///     .with_rating(4.6)
///     .with_open_state(OpenState::Open);
/// assert_eq!(venue.primary_type(), Some("museum"));
/// assert_eq!(venue.environment(), Environment::Indoor);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    /// Provider identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// Coordinates; venues without them cannot be scored.
    pub location: Option<GeoPoint>,
    /// Category tags, most specific first.
    pub types: Vec<String>,
    /// Average rating on a `0.0..=5.0` scale.
    pub rating: Option<f64>,
    /// Number of reviews behind [`Self::rating`].
    #[serde(alias = "reviewCount", alias = "userRatingsTotal")]
    pub review_count: Option<u32>,
    /// Current opening status.
    #[serde(alias = "openNow")]
    pub open_now: OpenState,
    /// Ordinal price level from `0` (free) to `4` (very expensive).
    #[serde(alias = "priceLevel")]
    pub price_level: Option<u8>,
    /// Formatted street address.
    pub address: Option<String>,
    /// Free-form weekly opening hours.
    #[serde(alias = "openingHours")]
    pub opening_hours: Vec<String>,
    /// Whether the venue has step-free access.
    #[serde(alias = "wheelchairAccessible")]
    pub wheelchair_accessible: Option<bool>,
    /// Whether the venue suits children.
    #[serde(alias = "familyFriendly")]
    pub family_friendly: Option<bool>,
}

impl Venue {
    /// Construct a venue with only an identifier and name.
    #[must_use]
    pub fn new(id: impl Into<VenueId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the coordinates.
    #[must_use]
    pub const fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.location = Some(GeoPoint::new(lat, lng));
        self
    }

    /// Replace the category tags.
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the review count.
    #[must_use]
    pub const fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = Some(count);
        self
    }

    /// Set the opening status.
    #[must_use]
    pub const fn with_open_state(mut self, state: OpenState) -> Self {
        self.open_now = state;
        self
    }

    /// Set the price level.
    #[must_use]
    pub const fn with_price_level(mut self, level: u8) -> Self {
        self.price_level = Some(level);
        self
    }

    /// Set the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Replace the opening-hours lines.
    #[must_use]
    pub fn with_opening_hours<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.opening_hours = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Set the accessibility flag.
    #[must_use]
    pub const fn with_wheelchair_accessible(mut self, accessible: bool) -> Self {
        self.wheelchair_accessible = Some(accessible);
        self
    }

    /// Set the family-friendly flag.
    #[must_use]
    pub const fn with_family_friendly(mut self, family_friendly: bool) -> Self {
        self.family_friendly = Some(family_friendly);
        self
    }

    /// First type tag, used for diversity selection.
    #[must_use]
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    /// Report whether any type tag equals `wanted`.
    #[must_use]
    pub fn has_type(&self, wanted: &str) -> bool {
        self.types.iter().any(|t| t == wanted)
    }

    /// Indoor/outdoor classification of the type tags.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment::classify(&self.types)
    }

    /// Rating limited to `0.0..=5.0`, or `None` when absent or not finite.
    #[must_use]
    pub fn valid_rating(&self) -> Option<f64> {
        self.rating
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, MAX_RATING))
    }

    /// Price level limited to `0..=4`.
    #[must_use]
    pub fn valid_price_level(&self) -> Option<u8> {
        self.price_level.map(|level| level.min(MAX_PRICE_LEVEL))
    }

    /// Derived labels: environment, open-now and rating tier.
    ///
    /// # Examples
    /// ```
    /// use fairweather_core::{OpenState, SemanticTag, Venue};
    ///
    /// let venue = Venue::new("p", "Park")
    ///     .with_types(["park"])
    ///     .with_rating(4.2)
    ///     .with_open_state(OpenState::Open);
    /// assert_eq!(
    ///     venue.semantic_tags(),
    ///     vec![SemanticTag::Outdoor, SemanticTag::OpenNow, SemanticTag::WellRated]
    /// );
    /// ```
    #[must_use]
    pub fn semantic_tags(&self) -> Vec<SemanticTag> {
        let mut tags = Vec::new();
        match self.environment() {
            Environment::Indoor => tags.push(SemanticTag::Indoor),
            Environment::Outdoor => tags.push(SemanticTag::Outdoor),
            Environment::Mixed => {}
        }
        if self.open_now == OpenState::Open {
            tags.push(SemanticTag::OpenNow);
        }
        match self.valid_rating() {
            Some(r) if r >= HIGHLY_RATED => tags.push(SemanticTag::HighlyRated),
            Some(r) if r >= WELL_RATED => tags.push(SemanticTag::WellRated),
            _ => {}
        }
        tags
    }
}
