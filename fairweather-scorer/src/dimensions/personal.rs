//! Personal fit, availability and price.

use fairweather_core::{OpenState, UserPreferences, Venue, clamp_score};

const PERSONAL_BASE: f64 = 50.0;
const FAVOURITE_BONUS: f64 = 30.0;
const MOOD_BONUS: f64 = 20.0;

const RELAXED: &[&str] = &["spa", "cafe", "park", "library", "garden", "book_store"];
const ADVENTUROUS: &[&str] = &[
    "amusement_park",
    "hiking_area",
    "zoo",
    "campground",
    "stadium",
    "bowling_alley",
];
const SOCIAL: &[&str] = &["bar", "night_club", "restaurant", "casino"];
const CULTURAL: &[&str] = &["museum", "art_gallery", "theater", "library"];
const ROMANTIC: &[&str] = &[
    "restaurant",
    "viewpoint",
    "garden",
    "botanical_garden",
    "theater",
];
const HUNGRY: &[&str] = &["restaurant", "cafe", "bakery"];

/// Venue types that suit a free-text mood, matched case-insensitively.
///
/// Unknown moods map to no types.
#[must_use]
pub fn mood_types(mood: &str) -> &'static [&'static str] {
    match mood.trim().to_ascii_lowercase().as_str() {
        "relaxed" | "calm" | "chill" => RELAXED,
        "adventurous" | "active" => ADVENTUROUS,
        "social" | "lively" | "party" => SOCIAL,
        "cultural" | "curious" => CULTURAL,
        "romantic" => ROMANTIC,
        "hungry" => HUNGRY,
        _ => &[],
    }
}

/// Score how well a venue matches the user's favourites and mood.
///
/// Any blacklisted type zeroes the score.
///
/// # Examples
/// ```
/// use fairweather_core::{UserPreferences, Venue};
/// use fairweather_scorer::dimensions::personal_score;
///
/// let preferences = UserPreferences::default()
///     .with_favorites(["cafe"])
///     .with_mood("relaxed");
/// let cafe = Venue::new("c", "Cafe").with_types(["cafe"]);
/// assert_eq!(personal_score(&cafe, &preferences), 100.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "favourite and mood bonuses are added to the base"
)]
pub fn personal_score(venue: &Venue, preferences: &UserPreferences) -> f64 {
    if venue.types.iter().any(|t| preferences.is_blacklisted(t)) {
        return 0.0;
    }
    let mut score = PERSONAL_BASE;
    if venue.types.iter().any(|t| preferences.is_favorite(t)) {
        score += FAVOURITE_BONUS;
    }
    let suits_mood = preferences
        .mood
        .as_deref()
        .map(mood_types)
        .is_some_and(|types| venue.types.iter().any(|t| types.contains(&t.as_str())));
    if suits_mood {
        score += MOOD_BONUS;
    }
    clamp_score(score)
}

/// Score whether the venue can be visited now.
#[must_use]
pub const fn availability_score(venue: &Venue) -> f64 {
    match venue.open_now {
        OpenState::Open => 100.0,
        OpenState::Unknown => 60.0,
        OpenState::Closed => 0.0,
    }
}

const PRICE_UNKNOWN: f64 = 70.0;
const OVER_BUDGET_PENALTY: f64 = 35.0;

/// Score a venue's price level against the user's budget.
///
/// Without a budget cheaper venues score higher.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "over-budget venues lose a fixed amount per level"
)]
pub fn price_score(venue: &Venue, max_price: Option<u8>) -> f64 {
    let Some(level) = venue.valid_price_level() else {
        return PRICE_UNKNOWN;
    };
    match max_price {
        Some(budget) if level <= budget => 100.0,
        Some(budget) => {
            let over = f64::from(level - budget);
            (100.0 - OVER_BUDGET_PENALTY * over).max(0.0)
        }
        None => match level {
            0 | 1 => 90.0,
            2 => 80.0,
            3 => 60.0,
            _ => 40.0,
        },
    }
}
