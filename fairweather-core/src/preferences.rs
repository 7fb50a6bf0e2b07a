//! User preferences: favourites, hard filters and per-dimension importance.
//!
//! Preferences are owned by the caller and read-only to the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Dimension, GeoPoint};

/// Default search radius in metres.
pub const DEFAULT_RADIUS_METERS: f64 = 5_000.0;

/// Per-dimension importance in `[0.0, 1.0]`.
///
/// # Examples
/// ```
/// use fairweather_core::{Dimension, ImportanceProfile};
///
/// let profile = ImportanceProfile::new()
///     .with_importance(Dimension::Price, 0.9)
///     .with_importance(Dimension::Distance, 1.7);
/// assert_eq!(profile.importance(Dimension::Price), Some(0.9));
/// assert_eq!(profile.importance(Dimension::Distance), Some(1.0));
/// assert!(profile.importance(Dimension::Social).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Dimension, f64>", into = "BTreeMap<Dimension, f64>")]
pub struct ImportanceProfile {
    values: BTreeMap<Dimension, f64>,
}

impl ImportanceProfile {
    /// Construct an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the importance of a dimension, if set.
    #[must_use]
    pub fn importance(&self, dimension: Dimension) -> Option<f64> {
        self.values.get(&dimension).copied()
    }

    /// Insert or update an importance value.
    ///
    /// Values are clamped into `0.0..=1.0`; NaN is stored as `0.0`.
    pub fn set_importance(&mut self, dimension: Dimension, value: f64) {
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.values.insert(dimension, clamped);
    }

    /// Add an importance value while returning `self` for chaining.
    #[must_use]
    pub fn with_importance(mut self, dimension: Dimension, value: f64) -> Self {
        self.set_importance(dimension, value);
        self
    }

    /// Report whether no importance values are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<Dimension, f64>> for ImportanceProfile {
    fn from(values: BTreeMap<Dimension, f64>) -> Self {
        values
            .into_iter()
            .fold(Self::new(), |profile, (d, v)| profile.with_importance(d, v))
    }
}

impl From<ImportanceProfile> for BTreeMap<Dimension, f64> {
    fn from(profile: ImportanceProfile) -> Self {
        profile.values
    }
}

/// Hard constraints a venue must satisfy to be ranked at all.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceFilters {
    /// Exclude venues further than this many metres.
    #[serde(alias = "maxRadiusMeters", alias = "maxRadius")]
    pub max_radius_meters: Option<f64>,
    /// Exclude venues above this price level.
    #[serde(alias = "maxPrice")]
    pub max_price: Option<u8>,
    /// Exclude venues rated below this.
    #[serde(alias = "minRating")]
    pub min_rating: Option<f64>,
    /// Exclude venues not confirmed open.
    #[serde(alias = "openNowOnly", alias = "openNow")]
    pub open_now_only: bool,
    /// Exclude venues not confirmed wheelchair accessible.
    #[serde(alias = "accessibleOnly")]
    pub accessible_only: bool,
    /// Exclude venues not confirmed family friendly.
    #[serde(alias = "familyFriendlyOnly")]
    pub family_friendly_only: bool,
}

/// Everything the caller knows about the user's tastes.
///
/// # Examples
/// ```
/// use fairweather_core::UserPreferences;
///
/// let preferences = UserPreferences::default()
///     .with_favorites(["cafe"])
///     .with_blacklist(["night_club"])
///     .with_mood("relaxed");
/// assert!(preferences.is_blacklisted("night_club"));
/// assert!(preferences.is_favorite("cafe"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    /// Stored home location, used when a request carries none.
    pub location: Option<GeoPoint>,
    /// Search radius for venue gathering, in metres.
    #[serde(alias = "radius", alias = "radiusMeters")]
    pub radius_meters: f64,
    /// Free-text mood such as `"relaxed"` or `"adventurous"`.
    pub mood: Option<String>,
    /// Favourite venue types.
    #[serde(alias = "favourites")]
    pub favorites: Vec<String>,
    /// Venue types the user never wants to see.
    pub blacklist: Vec<String>,
    /// Hard filters applied before ranking.
    pub filters: PreferenceFilters,
    /// Per-dimension importance for the extended model.
    pub importance: ImportanceProfile,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            location: None,
            radius_meters: DEFAULT_RADIUS_METERS,
            mood: None,
            favorites: Vec::new(),
            blacklist: Vec::new(),
            filters: PreferenceFilters::default(),
            importance: ImportanceProfile::default(),
        }
    }
}

impl UserPreferences {
    /// Replace the favourite types.
    #[must_use]
    pub fn with_favorites<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = types.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the blacklisted types.
    #[must_use]
    pub fn with_blacklist<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blacklist = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mood.
    #[must_use]
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Replace the hard filters.
    #[must_use]
    pub fn with_filters(mut self, filters: PreferenceFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Replace the importance profile.
    #[must_use]
    pub fn with_importance(mut self, importance: ImportanceProfile) -> Self {
        self.importance = importance;
        self
    }

    /// Report whether `venue_type` is a favourite.
    #[must_use]
    pub fn is_favorite(&self, venue_type: &str) -> bool {
        self.favorites.iter().any(|t| t == venue_type)
    }

    /// Report whether `venue_type` is blacklisted.
    #[must_use]
    pub fn is_blacklisted(&self, venue_type: &str) -> bool {
        self.blacklist.iter().any(|t| t == venue_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn set_importance_clamps_out_of_range() {
        let mut profile = ImportanceProfile::new();
        profile.set_importance(Dimension::Quality, 1.2);
        profile.set_importance(Dimension::Price, -0.5);
        profile.set_importance(Dimension::Social, f64::NAN);
        assert_eq!(profile.importance(Dimension::Quality), Some(1.0));
        assert_eq!(profile.importance(Dimension::Price), Some(0.0));
        assert_eq!(profile.importance(Dimension::Social), Some(0.0));
    }

    #[rstest]
    fn deserialised_importance_is_clamped() {
        let profile: ImportanceProfile =
            serde_json::from_str(r#"{"distance": 3.0, "price": 0.4}"#).expect("valid profile");
        assert_eq!(profile.importance(Dimension::Distance), Some(1.0));
        assert_eq!(profile.importance(Dimension::Price), Some(0.4));
    }

    #[rstest]
    fn preferences_accept_camel_case_filters() {
        let json = r#"{
            "radius": 2500,
            "favorites": ["museum"],
            "filters": {"maxPrice": 2, "openNowOnly": true, "minRating": 4.0}
        }"#;
        let preferences: UserPreferences = serde_json::from_str(json).expect("valid preferences");
        assert!((preferences.radius_meters - 2500.0).abs() < f64::EPSILON);
        assert_eq!(preferences.filters.max_price, Some(2));
        assert!(preferences.filters.open_now_only);
        assert!(!preferences.filters.accessible_only);
        assert!(preferences.is_favorite("museum"));
    }
}
