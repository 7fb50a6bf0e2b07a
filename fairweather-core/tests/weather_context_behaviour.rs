//! Behavioural coverage for the weather context adapter.

use std::cell::RefCell;

use fairweather_core::{WeatherContext, WeatherObservation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// 2023-11-14 00:00:00 UTC.
const MIDNIGHT_UTC: i64 = 1_699_920_000;

/// Shared state for the weather scenarios.
pub struct TestContext {
    observation: RefCell<WeatherObservation>,
    context: RefCell<Option<WeatherContext>>,
}

#[fixture]
/// Build a fresh `TestContext` for each scenario run.
pub fn context() -> TestContext {
    TestContext {
        observation: RefCell::new(WeatherObservation::default()),
        context: RefCell::new(None),
    }
}

fn normalised(context: &TestContext) -> WeatherContext {
    context
        .context
        .borrow()
        .clone()
        .unwrap_or_else(|| panic!("observation has not been normalised"))
}

#[given("an observation of {temp:f64} degrees with condition {code:u16} at {hour:i64} o'clock UTC")]
fn observation_at(context: &TestContext, temp: f64, code: u16, hour: i64) {
    *context.observation.borrow_mut() =
        WeatherObservation::new(temp, code, MIDNIGHT_UTC + hour * 3_600);
}

#[given("the location is {hours:i32} hours ahead of UTC")]
fn offset_ahead(context: &TestContext, hours: i32) {
    context.observation.borrow_mut().timezone_offset_seconds = hours * 3_600;
}

#[given("a wind speed of {speed:f64} metres per second")]
fn wind_speed(context: &TestContext, speed: f64) {
    context.observation.borrow_mut().wind_speed = Some(speed);
}

#[given("an observation without a temperature")]
fn observation_without_temperature(context: &TestContext) {
    *context.observation.borrow_mut() = WeatherObservation {
        temperature: None,
        ..WeatherObservation::new(0.0, 800, MIDNIGHT_UTC)
    };
}

#[when("the observation is normalised")]
fn normalise(context: &TestContext) {
    let weather = WeatherContext::from_observation(&context.observation.borrow());
    *context.context.borrow_mut() = Some(weather);
}

#[then("the severity is at least {threshold:f64}")]
fn severity_at_least(context: &TestContext, threshold: f64) {
    let severity = normalised(context).severity_score();
    assert!(severity >= threshold, "severity {severity} below {threshold}");
}

#[then("the severity is at most {threshold:f64}")]
fn severity_at_most(context: &TestContext, threshold: f64) {
    let severity = normalised(context).severity_score();
    assert!(severity <= threshold, "severity {severity} above {threshold}");
}

#[then("the time of day is {bucket}")]
fn time_of_day_is(context: &TestContext, bucket: String) {
    assert_eq!(normalised(context).time_of_day().as_str(), bucket);
}

#[then("the context is neutral")]
fn context_is_neutral(context: &TestContext) {
    assert_eq!(normalised(context), WeatherContext::neutral());
}

#[scenario(path = "tests/features/weather_context.feature", index = 0)]
fn cold_rain_is_severe(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/weather_context.feature", index = 1)]
fn mild_clear_weather_is_calm(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/weather_context.feature", index = 2)]
fn local_time_follows_offset(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/weather_context.feature", index = 3)]
fn gale_force_wind_is_severe(context: TestContext) {
    let _ = context;
}

#[scenario(path = "tests/features/weather_context.feature", index = 4)]
fn missing_temperature_is_neutral(context: TestContext) {
    let _ = context;
}
