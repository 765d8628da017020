pub const MINUTES_PER_DEGREE: f64 = 4.0;
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

pub fn zenith_to_elevation(zenith: f64) -> f64 {
    90.0 - zenith
}

pub fn elevation_to_zenith(elevation: f64) -> f64 {
    90.0 - elevation
}

/// Hour angle (degrees, 0..=180) at which the sun sits at `elevation` for an
/// observer at `latitude`, given the sun's declination as sine/cosine.
///
/// The cosine is clamped, so an unreachable elevation pins the result to
/// solar noon (0) or midnight (180). Returns NaN only when the triangle is
/// undefined (pole with zero numerator).
pub fn hour_angle_for_elevation(
    latitude: f64,
    sin_declination: f64,
    cos_declination: f64,
    elevation: f64,
) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let elev_rad = deg_to_rad(elevation);
    let cos_ha = (elev_rad.sin() - lat_rad.sin() * sin_declination)
        / (lat_rad.cos() * cos_declination);
    rad_to_deg(cos_ha.clamp(-1.0, 1.0).acos())
}

pub fn elevation_for_hour_angle(
    latitude: f64,
    sin_declination: f64,
    cos_declination: f64,
    hour_angle: f64,
) -> f64 {
    let lat_rad = deg_to_rad(latitude);
    let ha_rad = deg_to_rad(hour_angle);
    let sin_elev =
        lat_rad.sin() * sin_declination + lat_rad.cos() * cos_declination * ha_rad.cos();
    rad_to_deg(sin_elev.clamp(-1.0, 1.0).asin())
}
