//! Test helpers for composing rank requests on disk.

use camino::{Utf8Path, Utf8PathBuf};
use fairweather_core::{GeoPoint, OpenState, RankRequest, Venue, WeatherObservation};
use tempfile::TempDir;

/// 09:00 UTC on a weekday.
pub(super) const MORNING_UTC: i64 = 1_699_952_400;
pub(super) const ORIGIN: GeoPoint = GeoPoint::new(51.5074, -0.1278);

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

fn venue(id: &str, kind: &str) -> Venue {
    Venue::new(id, id)
        .with_types([kind])
        .with_location(ORIGIN.lat + 0.003, ORIGIN.lng)
        .with_rating(4.4)
        .with_open_state(OpenState::Open)
}

/// Cold rain with one museum and one park the same distance away.
pub(super) fn rainy_request() -> RankRequest {
    RankRequest {
        weather: Some(WeatherObservation::new(2.0, 501, MORNING_UTC).with_precipitation(true)),
        candidates: Some(vec![venue("park-1", "park"), venue("museum-1", "museum")]),
        user_location: Some(ORIGIN),
        ..RankRequest::default()
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &RankRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
