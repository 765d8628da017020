use chrono::{DateTime, Utc};

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg, MINUTES_PER_DEGREE};
use crate::time::{julian_century, julian_day, MINUTES_PER_DAY};
use crate::types::EphemerisState;

pub fn geometric_mean_longitude(t: f64) -> f64 {
    normalize_angle(280.46646 + t * (36000.76983 + 0.0003032 * t))
}

pub fn geometric_mean_anomaly(t: f64) -> f64 {
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

pub fn orbit_eccentricity(t: f64) -> f64 {
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

pub fn equation_of_center(t: f64) -> f64 {
    let m = deg_to_rad(geometric_mean_anomaly(t));
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

fn ascending_node(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

pub fn true_longitude(t: f64) -> f64 {
    geometric_mean_longitude(t) + equation_of_center(t)
}

pub fn apparent_longitude(t: f64) -> f64 {
    true_longitude(t) - 0.00569 - 0.00478 * deg_to_rad(ascending_node(t)).sin()
}

pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - t * (46.815 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

pub fn corrected_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + 0.00256 * deg_to_rad(ascending_node(t)).cos()
}

pub fn equation_of_time(t: f64) -> f64 {
    let l0 = deg_to_rad(geometric_mean_longitude(t));
    let m = deg_to_rad(geometric_mean_anomaly(t));
    let e = orbit_eccentricity(t);
    let y = deg_to_rad(corrected_obliquity(t) / 2.0).tan().powi(2);

    let eot = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    MINUTES_PER_DEGREE * rad_to_deg(eot)
}

pub fn solar_declination(t: f64) -> f64 {
    let obliquity = deg_to_rad(corrected_obliquity(t));
    let lambda = deg_to_rad(apparent_longitude(t));
    rad_to_deg((obliquity.sin() * lambda.sin()).asin())
}

pub fn ephemeris_at_julian_day(jd: f64) -> EphemerisState {
    let t = julian_century(jd);
    let eot = equation_of_time(t);
    let declination = deg_to_rad(solar_declination(t));
    EphemerisState {
        apparent_solar_time_minutes: (jd - 0.5).rem_euclid(1.0) * MINUTES_PER_DAY + eot,
        equation_of_time_minutes: eot,
        sin_declination: declination.sin(),
        cos_declination: declination.cos(),
    }
}

pub fn ephemeris(instant: &DateTime<Utc>) -> EphemerisState {
    ephemeris_at_julian_day(julian_day(instant))
}
