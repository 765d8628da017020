use light_geolocator::config::*;
use light_geolocator::GeolocationError;

// ── Defaults ──

#[test]
fn test_default_config() {
    let c = GeolocationConfig::default();
    assert_eq!(c.threshold, 2.0);
    assert_eq!(c.min_calibration_twilights, 2);
    assert_eq!(c.calibration.search_min, -12.0);
    assert_eq!(c.calibration.search_max, 2.0);
    assert_eq!(c.calibration.min_events, 4);
    assert_eq!(c.predictor.iterations, 4);
    assert_eq!(c.window.durations_days, vec![2, 3, 1, 4, 5]);
    assert_eq!(c.window.search_days, 10);
    assert_eq!(c.window.min_samples, 100);
    assert_eq!(c.filter.instability_threshold, 300.0);
    assert_eq!(c.filter.instability_window_minutes, 30.0);
    assert_eq!(c.position.sin_declination_tolerance, 0.08);
}

#[test]
fn test_min_gap_by_strictness() {
    let f = FilterConfig::default();
    assert_eq!(f.min_gap_hours(true), 1.0);
    assert_eq!(f.min_gap_hours(false), 2.0);
}

// ── JSON ──

#[test]
fn test_partial_json_keeps_defaults() {
    let c = GeolocationConfig::from_json_str(
        r#"{ "threshold": 5.5, "filter": { "instability_threshold": 40 } }"#,
    )
    .unwrap();
    assert_eq!(c.threshold, 5.5);
    assert_eq!(c.filter.instability_threshold, 40.0);
    assert_eq!(c.filter.instability_window_minutes, 30.0);
    assert_eq!(c.predictor, PredictorConfig::default());
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(GeolocationConfig::from_json_str("{}").unwrap(), GeolocationConfig::default());
}

#[test]
fn test_bad_json_is_config_error() {
    let err = GeolocationConfig::from_json_str("{ threshold: ").unwrap_err();
    assert!(matches!(err, GeolocationError::Config(_)));
}

#[test]
fn test_roundtrip_through_json() {
    let mut c = GeolocationConfig::default();
    c.window.durations_days = vec![3, 2];
    c.calibration.search_min = -10.0;
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(GeolocationConfig::from_json_str(&json).unwrap(), c);
}
