use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use light_geolocator::config::PredictorConfig;
use light_geolocator::predict::*;
use light_geolocator::simulate::simulate_twilights;
use light_geolocator::types::*;

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn assert_within(actual: DateTime<Utc>, expected: DateTime<Utc>, seconds: i64) {
    let diff = (actual - expected).num_seconds().abs();
    assert!(diff <= seconds, "actual={} expected={} diff={}s", actual, expected, diff);
}

fn central_europe() -> SiteCoordinate {
    SiteCoordinate::new(50.0, 10.0).unwrap()
}

// ── Known sunrise / sunset ──

#[test]
fn test_summer_solstice_sunrise_and_sunset() {
    let config = PredictorConfig::default();
    let rise = TwilightEvent::rise(utc(2026, 6, 21, 3, 0));
    let set = TwilightEvent::set(utc(2026, 6, 21, 19, 0));
    let rise_at = predict_twilight(&rise, &central_europe(), -0.833, &config).unwrap();
    let set_at = predict_twilight(&set, &central_europe(), -0.833, &config).unwrap();
    assert_within(rise_at, Utc.with_ymd_and_hms(2026, 6, 21, 3, 10, 39).unwrap(), 5);
    assert_within(set_at, Utc.with_ymd_and_hms(2026, 6, 21, 19, 32, 59).unwrap(), 5);
}

#[test]
fn test_local_time_observation() {
    use chrono_tz::Europe::Berlin;
    // 05:00 CEST is 03:00 UTC.
    let observed = Berlin
        .with_ymd_and_hms(2026, 6, 21, 5, 0, 0)
        .unwrap()
        .with_timezone(&Utc);
    let predicted = predict_twilight(
        &TwilightEvent::rise(observed),
        &central_europe(),
        -0.833,
        &PredictorConfig::default(),
    )
    .unwrap();
    let local = predicted.with_timezone(&Berlin);
    assert_eq!(local.format("%H:%M").to_string(), "05:10");
}

#[test]
fn test_prediction_snaps_to_nearest_day() {
    // Observed just before midnight UTC, the crossing is the next morning.
    let observed = TwilightEvent::rise(utc(2026, 6, 20, 23, 50));
    let predicted =
        predict_twilight(&observed, &central_europe(), -0.833, &PredictorConfig::default())
            .unwrap();
    assert_within(predicted, Utc.with_ymd_and_hms(2026, 6, 21, 3, 10, 39).unwrap(), 5);
}

#[test]
fn test_far_east_and_west_sites_keep_calendar_day() {
    let config = PredictorConfig::default();
    for lon in [-175.0, -120.0, 120.0, 175.0] {
        let site = SiteCoordinate::new(-35.0, lon).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let twilights = simulate_twilights(&site, -6.0, day, 3, &config);
        for event in &twilights {
            let predicted = predict_twilight(event, &site, -6.0, &config).unwrap();
            assert_within(predicted, event.instant, 1);
        }
    }
}

#[test]
fn test_lower_elevation_means_earlier_rise_later_set() {
    let config = PredictorConfig::default();
    let rise = TwilightEvent::rise(utc(2026, 9, 1, 4, 0));
    let set = TwilightEvent::set(utc(2026, 9, 1, 18, 0));
    let site = central_europe();
    let rise_civil = predict_twilight(&rise, &site, -6.0, &config).unwrap();
    let rise_horizon = predict_twilight(&rise, &site, 0.0, &config).unwrap();
    let set_civil = predict_twilight(&set, &site, -6.0, &config).unwrap();
    let set_horizon = predict_twilight(&set, &site, 0.0, &config).unwrap();
    assert!(rise_civil < rise_horizon);
    assert!(set_civil > set_horizon);
    // Roughly 4 minutes per degree near the equinox at mid-latitudes, a bit more.
    let gap = (rise_horizon - rise_civil).num_minutes();
    assert!((30..=50).contains(&gap), "gap={}", gap);
}

#[test]
fn test_polar_day_is_clamped_not_missing() {
    let site = SiteCoordinate::new(80.0, 10.0).unwrap();
    let event = TwilightEvent::rise(utc(2026, 6, 21, 3, 0));
    let predicted = predict_twilight(&event, &site, -6.0, &PredictorConfig::default());
    let predicted = predicted.expect("clamped hour angle still converges");
    // Pinned to local solar midnight, about 23:20 UTC the previous evening.
    assert_within(predicted, Utc.with_ymd_and_hms(2026, 6, 20, 23, 21, 43).unwrap(), 60);
}

#[test]
fn test_non_convergence_is_missing_value() {
    // A single iteration from a guess hours away cannot settle.
    let config = PredictorConfig {
        iterations: 1,
        convergence_tolerance_seconds: 60.0,
    };
    let event = TwilightEvent::rise(utc(2026, 6, 21, 9, 0));
    assert_eq!(predict_twilight(&event, &central_europe(), -6.0, &config), None);
}

#[test]
fn test_pole_is_undefined() {
    let site = SiteCoordinate::new(90.0, 0.0).unwrap();
    let event = TwilightEvent::rise(utc(2026, 3, 20, 12, 0));
    // cos(latitude) underflows to a tiny value; the result is either missing
    // or a finite instant, never a panic.
    let _ = predict_twilight(&event, &site, 0.0, &PredictorConfig::default());
}

#[test]
fn test_predict_twilights_keeps_order_and_length() {
    let config = PredictorConfig::default();
    let site = central_europe();
    let twilights =
        simulate_twilights(&site, -4.0, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(), 5, &config);
    let predicted = predict_twilights(&twilights, &site, -4.0, &config);
    assert_eq!(predicted.len(), twilights.len());
    for (event, p) in twilights.iter().zip(&predicted) {
        assert_within(p.unwrap(), event.instant, 1);
    }
}

#[test]
fn test_solar_noon_minutes() {
    assert_eq!(solar_noon_minutes(0.0, 0.0), 720.0);
    assert_eq!(solar_noon_minutes(15.0, 0.0), 660.0);
    assert_eq!(solar_noon_minutes(-90.0, 4.0), 1076.0);
    let shifted = utc(2026, 1, 1, 0, 0) + Duration::minutes(solar_noon_minutes(15.0, 0.0) as i64);
    assert_eq!(shifted, utc(2026, 1, 1, 11, 0));
}
