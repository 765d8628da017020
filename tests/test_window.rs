use chrono::{DateTime, Duration, TimeZone, Utc};
use light_geolocator::config::WindowConfig;
use light_geolocator::types::*;
use light_geolocator::window::select_calibration_window;
use light_geolocator::GeolocationError;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap()
}

fn site() -> SiteCoordinate {
    SiteCoordinate::new(52.0, 4.0).unwrap()
}

fn hourly(hours: i64, level: impl Fn(i64) -> f64) -> LightSeries {
    LightSeries::new(
        (0..hours)
            .map(|h| LightSample::new(start() + Duration::hours(h), level(h)))
            .collect(),
    )
}

fn alternating(h: i64) -> f64 {
    if (h / 6) % 2 == 0 {
        0.0
    } else {
        50.0
    }
}

#[test]
fn test_selects_two_day_window_for_regular_pattern() {
    let series = hourly(240, alternating);
    let window =
        select_calibration_window(&series, &site(), 2.0, 2, &WindowConfig::default()).unwrap();
    assert_eq!(window.duration_days, 2);
    assert_eq!(window.start, start());
    assert_eq!(window.end, start() + Duration::days(2));
    assert!(window.event_count >= 4, "event_count={}", window.event_count);
}

#[test]
fn test_falls_back_to_three_days() {
    // Dark for the first 36 hours: a two-day window holds one rise and one set.
    let series = hourly(240, |h| {
        if h < 36 {
            0.0
        } else {
            alternating(h - 36 + 6)
        }
    });
    let window =
        select_calibration_window(&series, &site(), 2.0, 3, &WindowConfig::default()).unwrap();
    assert_eq!(window.duration_days, 3);
}

#[test]
fn test_one_direction_only_is_not_enough() {
    // Light comes on once and stays on: a single rise, never a set.
    let series = hourly(240, |h| if h < 30 { 0.0 } else { 80.0 });
    let err =
        select_calibration_window(&series, &site(), 2.0, 1, &WindowConfig::default()).unwrap_err();
    assert!(matches!(err, GeolocationError::NoValidWindow { tried: 5, .. }));
}

#[test]
fn test_too_few_samples_in_first_ten_days() {
    let series = hourly(99, alternating);
    let err =
        select_calibration_window(&series, &site(), 2.0, 2, &WindowConfig::default()).unwrap_err();
    assert_eq!(
        err,
        GeolocationError::InsufficientData {
            stage: "calibration window",
            required: 100,
            available: 99,
        }
    );
}

#[test]
fn test_only_first_ten_days_are_counted() {
    // Sparse daily samples for ten days, then dense data afterwards.
    let mut samples: Vec<LightSample> = (0..10)
        .map(|d| LightSample::new(start() + Duration::days(d), alternating(d)))
        .collect();
    let later = start() + Duration::days(11);
    samples.extend((0..500).map(|m| LightSample::new(later + Duration::minutes(m), 1.0)));
    let err = select_calibration_window(
        &LightSeries::new(samples),
        &site(),
        2.0,
        2,
        &WindowConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GeolocationError::InsufficientData { available: 10, .. }));
}

#[test]
fn test_empty_series() {
    let err = select_calibration_window(
        &LightSeries::default(),
        &site(),
        2.0,
        2,
        &WindowConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GeolocationError::InsufficientData { available: 0, .. }));
}

#[test]
fn test_custom_duration_order_is_respected() {
    let series = hourly(240, alternating);
    let config = WindowConfig {
        durations_days: vec![1, 2],
        ..WindowConfig::default()
    };
    let window = select_calibration_window(&series, &site(), 2.0, 2, &config).unwrap();
    assert_eq!(window.duration_days, 1);
    assert_eq!(window.event_count, 3);
}

// ── Configuration limits ──

#[test]
fn test_out_of_range_duration_is_a_config_error() {
    let config = WindowConfig {
        durations_days: vec![u32::MAX],
        ..WindowConfig::default()
    };
    let err = select_calibration_window(&hourly(240, alternating), &site(), 2.0, 2, &config)
        .unwrap_err();
    assert!(matches!(err, GeolocationError::Config(_)), "{:?}", err);
}

#[test]
fn test_out_of_range_search_span_is_a_config_error() {
    let config = WindowConfig {
        search_days: i64::MAX,
        ..WindowConfig::default()
    };
    let err = select_calibration_window(&hourly(240, alternating), &site(), 2.0, 2, &config)
        .unwrap_err();
    assert!(matches!(err, GeolocationError::Config(_)), "{:?}", err);
}

#[test]
fn test_huge_duration_from_json_does_not_panic() {
    let json = r#"{ "window": { "durations_days": [4294967295] } }"#;
    let config = light_geolocator::GeolocationConfig::from_json_str(json).unwrap();
    let result =
        select_calibration_window(&hourly(240, alternating), &site(), 2.0, 2, &config.window);
    assert!(result.is_err());
}
