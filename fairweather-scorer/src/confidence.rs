//! Data-completeness confidence.

use fairweather_core::Venue;

/// Number of venue fields confidence is measured over.
pub const CONFIDENCE_FIELDS: u8 = 7;

/// Floor of the confidence discount: a venue with no optional data keeps
/// this share of its raw score.
pub const CONFIDENCE_FLOOR: f64 = 0.7;

/// Share of the expected optional fields the venue carries.
///
/// The fields are rating, review count, types, location, address, opening
/// hours and price level.
///
/// # Examples
/// ```
/// use fairweather_core::Venue;
/// use fairweather_scorer::confidence;
///
/// let sparse = Venue::new("v", "V").with_location(1.0, 2.0);
/// assert!((confidence(&sparse) - 1.0 / 7.0).abs() < 1e-12);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "ratio of present fields")]
pub fn confidence(venue: &Venue) -> f64 {
    let present = [
        venue.rating.is_some(),
        venue.review_count.is_some(),
        !venue.types.is_empty(),
        venue.location.is_some(),
        venue.address.is_some(),
        !venue.opening_hours.is_empty(),
        venue.price_level.is_some(),
    ]
    .into_iter()
    .fold(0_u8, |count, field| count + u8::from(field));
    f64::from(present) / f64::from(CONFIDENCE_FIELDS)
}

/// Scale a raw total by confidence: `raw * (0.7 + 0.3 * confidence)`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "linear discount by confidence")]
pub fn discount(raw_total: f64, confidence: f64) -> f64 {
    raw_total * (CONFIDENCE_FLOOR + (1.0 - CONFIDENCE_FLOOR) * confidence.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn complete_venue_is_fully_confident() {
        let venue = Venue::new("v", "V")
            .with_rating(4.0)
            .with_review_count(10)
            .with_types(["cafe"])
            .with_location(0.0, 0.0)
            .with_address("1 High St")
            .with_opening_hours(["Mon: 9-5"])
            .with_price_level(1);
        assert_eq!(confidence(&venue), 1.0);
    }

    #[rstest]
    fn empty_venue_has_no_confidence() {
        assert_eq!(confidence(&Venue::new("v", "V")), 0.0);
    }

    #[rstest]
    #[case(80.0, 1.0, 80.0)]
    #[case(80.0, 0.0, 56.0)]
    #[case(80.0, 0.5, 68.0)]
    fn discount_scales_linearly(#[case] raw: f64, #[case] c: f64, #[case] expected: f64) {
        assert!((discount(raw, c) - expected).abs() < 1e-9);
    }
}
