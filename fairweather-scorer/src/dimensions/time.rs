//! Time fit: opening state and how typical a venue is for the hour.

use fairweather_core::{OpenState, TimeOfDay, Venue, clamp_score};

const CLOSED: f64 = 10.0;
const OPEN: f64 = 70.0;
const UNKNOWN: f64 = 50.0;
const TYPICAL_BONUS: f64 = 15.0;
const NIGHT_BONUS: f64 = 20.0;

const MORNING: &[&str] = &[
    "cafe",
    "bakery",
    "park",
    "gym",
    "botanical_garden",
    "garden",
    "library",
];
const AFTERNOON: &[&str] = &[
    "museum",
    "art_gallery",
    "park",
    "zoo",
    "aquarium",
    "shopping_mall",
    "library",
    "tourist_attraction",
];
const EVENING: &[&str] = &[
    "restaurant",
    "bar",
    "movie_theater",
    "cinema",
    "theater",
    "bowling_alley",
];
const NIGHT: &[&str] = &["bar", "night_club", "casino", "movie_theater"];

/// Venue types typical for a time-of-day bucket.
#[must_use]
pub const fn typical_types(time_of_day: TimeOfDay) -> &'static [&'static str] {
    match time_of_day {
        TimeOfDay::Morning => MORNING,
        TimeOfDay::Afternoon => AFTERNOON,
        TimeOfDay::Evening => EVENING,
        TimeOfDay::Night => NIGHT,
    }
}

/// Score a venue's opening state and fit for the current time of day.
///
/// A venue known to be closed scores 10 regardless of type.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the type bonus is added to the opening baseline"
)]
pub fn time_score(venue: &Venue, time_of_day: TimeOfDay) -> f64 {
    let baseline = match venue.open_now {
        OpenState::Closed => return CLOSED,
        OpenState::Open => OPEN,
        OpenState::Unknown => UNKNOWN,
    };
    let typical = typical_types(time_of_day);
    let bonus = if venue.types.iter().any(|t| typical.contains(&t.as_str())) {
        if time_of_day == TimeOfDay::Night {
            NIGHT_BONUS
        } else {
            TYPICAL_BONUS
        }
    } else {
        0.0
    };
    clamp_score(baseline + bonus)
}
