use chrono::{DateTime, Utc};

use crate::angles::{deg_to_rad, normalize_angle, rad_to_deg, wrap_longitude};
use crate::config::PositionConfig;
use crate::ephemeris::ephemeris;
use crate::types::{EphemerisState, PositionEstimate, TwilightEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwilightPair {
    pub first: DateTime<Utc>,
    pub second: DateTime<Utc>,
    /// True when the pair starts with the rise (a day), false for a night.
    pub rise_first: bool,
}

impl TwilightPair {
    pub fn from_events(first: &TwilightEvent, second: &TwilightEvent) -> Option<Self> {
        (first.is_rise != second.is_rise).then_some(Self {
            first: first.instant,
            second: second.instant,
            rise_first: first.is_rise,
        })
    }

    pub fn rise(&self) -> DateTime<Utc> {
        if self.rise_first {
            self.first
        } else {
            self.second
        }
    }

    pub fn set(&self) -> DateTime<Utc> {
        if self.rise_first {
            self.second
        } else {
            self.first
        }
    }
}

pub fn twilight_pairs(events: &[TwilightEvent]) -> Vec<TwilightPair> {
    events
        .windows(2)
        .filter_map(|w| TwilightPair::from_events(&w[0], &w[1]))
        .collect()
}

pub fn pair_longitude(rise: &EphemerisState, set: &EphemerisState) -> f64 {
    let rise_time = normalize_angle(rise.solar_time_degrees());
    let set_time = normalize_angle(set.solar_time_degrees());
    let wrap = if rise_time < set_time { 360.0 } else { 0.0 };
    wrap_longitude(-(rise_time + set_time + wrap) / 2.0)
}

/// Latitude at which the sun stands at `elevation` for the given
/// ephemeris and longitude; NaN when the declination term is too small to
/// resolve or the geometry has no solution.
pub fn event_latitude(
    eph: &EphemerisState,
    longitude: f64,
    elevation: f64,
    sin_declination_tolerance: f64,
) -> f64 {
    let a = eph.sin_declination;
    if a.abs() <= sin_declination_tolerance {
        return f64::NAN;
    }
    let hour_angle = deg_to_rad(eph.solar_time_degrees() + longitude - 180.0);
    let b = eph.cos_declination * hour_angle.cos();
    let cos_z = deg_to_rad(elevation).sin();
    let r2 = a * a + b * b;
    let discriminant = r2 - cos_z * cos_z;
    if discriminant < 0.0 {
        return f64::NAN;
    }
    let x = (a * cos_z - a.signum() * b * discriminant.sqrt()) / r2;
    if x.abs() > 1.0 {
        return f64::NAN;
    }
    rad_to_deg(x.asin())
}

pub fn solve_pair(
    pair: &TwilightPair,
    elevation: f64,
    config: &PositionConfig,
) -> Option<PositionEstimate> {
    let rise = ephemeris(&pair.rise());
    let set = ephemeris(&pair.set());
    let longitude = pair_longitude(&rise, &set);

    let latitudes: Vec<f64> = [&rise, &set]
        .into_iter()
        .map(|eph| event_latitude(eph, longitude, elevation, config.sin_declination_tolerance))
        .filter(|lat| lat.is_finite())
        .collect();
    if latitudes.is_empty() || !longitude.is_finite() {
        return None;
    }
    let latitude = latitudes.iter().sum::<f64>() / latitudes.len() as f64;

    Some(PositionEstimate {
        timestamp: pair.first,
        longitude,
        latitude,
    })
}

pub fn estimate_positions(
    events: &[TwilightEvent],
    elevation: f64,
    config: &PositionConfig,
) -> Vec<PositionEstimate> {
    twilight_pairs(events)
        .iter()
        .filter_map(|pair| solve_pair(pair, elevation, config))
        .collect()
}
