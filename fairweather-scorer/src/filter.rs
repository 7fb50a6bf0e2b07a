//! Hard preference filters applied to scored venues.

use std::fmt;

use fairweather_core::{OpenState, ScoredVenue, UserPreferences};

/// Why a venue was excluded by the user's filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Exclusion {
    /// The venue carries a blacklisted type.
    Blacklisted {
        /// Offending type.
        venue_type: String,
    },
    /// The venue is beyond the maximum radius.
    TooFar {
        /// Venue distance in metres.
        distance_meters: f64,
        /// Allowed radius in metres.
        max_radius_meters: f64,
    },
    /// The venue is above the price ceiling.
    TooExpensive {
        /// Venue price level.
        price_level: u8,
        /// Allowed price level.
        max_price: u8,
    },
    /// The venue is rated below the floor.
    RatedTooLow {
        /// Venue rating.
        rating: f64,
        /// Required rating.
        min_rating: f64,
    },
    /// The venue is not confirmed open.
    NotOpen,
    /// The venue is not confirmed wheelchair accessible.
    NotAccessible,
    /// The venue is not confirmed family friendly.
    NotFamilyFriendly,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklisted { venue_type } => write!(f, "type '{venue_type}' is blacklisted"),
            Self::TooFar {
                distance_meters,
                max_radius_meters,
            } => write!(f, "{distance_meters:.0} m exceeds radius {max_radius_meters:.0} m"),
            Self::TooExpensive {
                price_level,
                max_price,
            } => write!(f, "price level {price_level} exceeds {max_price}"),
            Self::RatedTooLow { rating, min_rating } => {
                write!(f, "rating {rating:.1} is below {min_rating:.1}")
            }
            Self::NotOpen => f.write_str("not confirmed open"),
            Self::NotAccessible => f.write_str("not confirmed wheelchair accessible"),
            Self::NotFamilyFriendly => f.write_str("not confirmed family friendly"),
        }
    }
}

/// Applies [`UserPreferences`] blacklist and filters to scored venues.
///
/// Venues missing a price level or rating pass the price and rating
/// filters; the open, accessible and family filters require a confirmed
/// `true`.
///
/// # Examples
/// ```
/// use fairweather_core::{PreferenceFilters, ScoreBreakdown, ScoredVenue, UserPreferences, Venue};
/// use fairweather_scorer::{Exclusion, PreferenceFilter};
///
/// let preferences = UserPreferences::default().with_filters(PreferenceFilters {
///     max_price: Some(2),
///     ..PreferenceFilters::default()
/// });
/// let pricey = ScoredVenue::new(
///     Venue::new("v", "V").with_price_level(4),
///     100.0,
///     ScoreBreakdown::new(Vec::new(), 50.0, 1.0),
/// );
/// assert!(matches!(
///     PreferenceFilter::new(&preferences).check(&pricey),
///     Err(Exclusion::TooExpensive { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PreferenceFilter<'a> {
    preferences: &'a UserPreferences,
}

impl<'a> PreferenceFilter<'a> {
    /// Filter with the given preferences.
    #[must_use]
    pub const fn new(preferences: &'a UserPreferences) -> Self {
        Self { preferences }
    }

    /// Check one venue against every filter.
    ///
    /// # Errors
    /// Returns the first [`Exclusion`] the venue triggers.
    pub fn check(&self, scored: &ScoredVenue) -> Result<(), Exclusion> {
        let venue = &scored.venue;
        let filters = &self.preferences.filters;

        if let Some(venue_type) = venue.types.iter().find(|t| self.preferences.is_blacklisted(t)) {
            return Err(Exclusion::Blacklisted {
                venue_type: venue_type.clone(),
            });
        }
        if let Some(max_radius_meters) = filters.max_radius_meters
            && scored.distance_meters > max_radius_meters
        {
            return Err(Exclusion::TooFar {
                distance_meters: scored.distance_meters,
                max_radius_meters,
            });
        }
        if let (Some(max_price), Some(price_level)) = (filters.max_price, venue.valid_price_level())
            && price_level > max_price
        {
            return Err(Exclusion::TooExpensive {
                price_level,
                max_price,
            });
        }
        if let (Some(min_rating), Some(rating)) = (filters.min_rating, venue.valid_rating())
            && rating < min_rating
        {
            return Err(Exclusion::RatedTooLow { rating, min_rating });
        }
        if filters.open_now_only && venue.open_now != OpenState::Open {
            return Err(Exclusion::NotOpen);
        }
        if filters.accessible_only && venue.wheelchair_accessible != Some(true) {
            return Err(Exclusion::NotAccessible);
        }
        if filters.family_friendly_only && venue.family_friendly != Some(true) {
            return Err(Exclusion::NotFamilyFriendly);
        }
        Ok(())
    }

    /// Report whether a venue passes every filter.
    #[must_use]
    pub fn admits(&self, scored: &ScoredVenue) -> bool {
        self.check(scored).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{PreferenceFilters, ScoreBreakdown, Venue};
    use rstest::rstest;

    fn scored(venue: Venue, distance_meters: f64) -> ScoredVenue {
        ScoredVenue::new(venue, distance_meters, ScoreBreakdown::new(Vec::new(), 50.0, 1.0))
    }

    fn with_filters(filters: PreferenceFilters) -> UserPreferences {
        UserPreferences::default().with_filters(filters)
    }

    #[rstest]
    fn default_preferences_admit_everything() {
        let preferences = UserPreferences::default();
        let filter = PreferenceFilter::new(&preferences);
        assert!(filter.admits(&scored(Venue::new("v", "V"), 50_000.0)));
    }

    #[rstest]
    fn blacklist_excludes() {
        let preferences = UserPreferences::default().with_blacklist(["casino"]);
        let venue = Venue::new("v", "V").with_types(["bar", "casino"]);
        assert_eq!(
            PreferenceFilter::new(&preferences).check(&scored(venue, 10.0)),
            Err(Exclusion::Blacklisted {
                venue_type: "casino".to_owned()
            })
        );
    }

    #[rstest]
    #[case(999.0, true)]
    #[case(1_000.0, true)]
    #[case(1_001.0, false)]
    fn radius(#[case] distance: f64, #[case] admitted: bool) {
        let preferences = with_filters(PreferenceFilters {
            max_radius_meters: Some(1_000.0),
            ..PreferenceFilters::default()
        });
        let filter = PreferenceFilter::new(&preferences);
        assert_eq!(filter.admits(&scored(Venue::new("v", "V"), distance)), admitted);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(3.9), false)]
    #[case(Some(4.0), true)]
    fn minimum_rating(#[case] rating: Option<f64>, #[case] admitted: bool) {
        let preferences = with_filters(PreferenceFilters {
            min_rating: Some(4.0),
            ..PreferenceFilters::default()
        });
        let mut venue = Venue::new("v", "V");
        venue.rating = rating;
        assert_eq!(PreferenceFilter::new(&preferences).admits(&scored(venue, 0.0)), admitted);
    }

    #[rstest]
    #[case(OpenState::Open, true)]
    #[case(OpenState::Unknown, false)]
    #[case(OpenState::Closed, false)]
    fn open_now_only(#[case] state: OpenState, #[case] admitted: bool) {
        let preferences = with_filters(PreferenceFilters {
            open_now_only: true,
            ..PreferenceFilters::default()
        });
        let venue = Venue::new("v", "V").with_open_state(state);
        assert_eq!(PreferenceFilter::new(&preferences).admits(&scored(venue, 0.0)), admitted);
    }

    #[rstest]
    fn accessibility_and_family_need_confirmation() {
        let preferences = with_filters(PreferenceFilters {
            accessible_only: true,
            family_friendly_only: true,
            ..PreferenceFilters::default()
        });
        let filter = PreferenceFilter::new(&preferences);
        let unknown = Venue::new("v", "V");
        assert_eq!(filter.check(&scored(unknown.clone(), 0.0)), Err(Exclusion::NotAccessible));
        let accessible = unknown.with_wheelchair_accessible(true);
        assert_eq!(
            filter.check(&scored(accessible.clone(), 0.0)),
            Err(Exclusion::NotFamilyFriendly)
        );
        assert!(filter.admits(&scored(accessible.with_family_friendly(true), 0.0)));
    }
}
