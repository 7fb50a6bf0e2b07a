//! Weather fit: how well a venue's setting suits the conditions.

use fairweather_core::{Environment, Venue, WeatherContext, clamp_score};

const HARSH_SEVERITY: f64 = 0.7;
const MILD_SEVERITY: f64 = 0.3;

const COLD_BELOW_C: f64 = 5.0;
const HOT_ABOVE_C: f64 = 32.0;
const PLEASANT_C: std::ops::RangeInclusive<f64> = 18.0..=25.0;

const fn baseline(environment: Environment, severity: f64) -> f64 {
    if severity >= HARSH_SEVERITY {
        match environment {
            Environment::Indoor => 90.0,
            Environment::Outdoor => 20.0,
            Environment::Mixed => 60.0,
        }
    } else if severity <= MILD_SEVERITY {
        match environment {
            Environment::Indoor => 60.0,
            Environment::Outdoor => 90.0,
            Environment::Mixed => 70.0,
        }
    } else {
        match environment {
            Environment::Indoor => 70.0,
            Environment::Outdoor => 65.0,
            Environment::Mixed => 75.0,
        }
    }
}

/// Score how well the venue's indoor/outdoor setting suits the weather.
///
/// # Examples
/// ```
/// use fairweather_core::{ConditionCode, TimeOfDay, Venue, WeatherContext};
/// use fairweather_scorer::dimensions::weather_score;
///
/// let sleet = WeatherContext::from_parts(2.0, ConditionCode::new(501), 0.75, TimeOfDay::Morning);
/// let museum = Venue::new("m", "Museum").with_types(["museum"]);
/// assert_eq!(weather_score(&museum, &sleet), 100.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "adjustments add fixed offsets to the baseline"
)]
pub fn weather_score(venue: &Venue, weather: &WeatherContext) -> f64 {
    let environment = venue.environment();
    let temp = weather.temp_celsius();
    let mut score = baseline(environment, weather.severity_score());

    if temp < COLD_BELOW_C || temp > HOT_ABOVE_C {
        match environment {
            Environment::Indoor => score += 10.0,
            Environment::Outdoor => score -= 15.0,
            Environment::Mixed => {}
        }
    }
    if PLEASANT_C.contains(&temp) && environment == Environment::Outdoor {
        score += 10.0;
    }
    if weather.condition_code().is_precipitation() {
        match environment {
            Environment::Indoor => score += 15.0,
            Environment::Outdoor => score -= 20.0,
            Environment::Mixed => {}
        }
    }
    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairweather_core::{ConditionCode, TimeOfDay};
    use rstest::{fixture, rstest};

    #[fixture]
    fn cold_rain() -> WeatherContext {
        WeatherContext::from_parts(2.0, ConditionCode::new(501), 0.75, TimeOfDay::Morning)
    }

    fn venue(kind: &str) -> Venue {
        Venue::new(kind, kind).with_types([kind])
    }

    #[rstest]
    fn cold_rain_favours_indoor(cold_rain: WeatherContext) {
        assert_eq!(weather_score(&venue("museum"), &cold_rain), 100.0);
        assert!(weather_score(&venue("park"), &cold_rain) <= 35.0);
    }

    #[rstest]
    #[case("park", 100.0)]
    #[case("museum", 60.0)]
    #[case("tourist_attraction", 70.0)]
    fn pleasant_sunshine(#[case] kind: &str, #[case] expected: f64) {
        let sunny = WeatherContext::from_parts(22.0, ConditionCode::CLEAR, 0.0, TimeOfDay::Afternoon);
        assert_eq!(weather_score(&venue(kind), &sunny), expected);
    }

    #[rstest]
    fn moderate_weather_prefers_mixed_venues() {
        let overcast =
            WeatherContext::from_parts(12.0, ConditionCode::new(804), 0.5, TimeOfDay::Afternoon);
        let mixed = Venue::new("x", "Market").with_types(["market"]);
        assert_eq!(weather_score(&mixed, &overcast), 75.0);
        assert_eq!(weather_score(&venue("museum"), &overcast), 70.0);
        assert_eq!(weather_score(&venue("park"), &overcast), 65.0);
    }

    #[rstest]
    fn heat_penalises_outdoor() {
        let heat = WeatherContext::from_parts(34.0, ConditionCode::CLEAR, 0.4, TimeOfDay::Afternoon);
        assert_eq!(weather_score(&venue("beach"), &heat), 50.0);
        assert_eq!(weather_score(&venue("cinema"), &heat), 80.0);
    }
}
