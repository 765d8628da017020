use chrono::{DateTime, Duration, Utc};

use crate::angles::{hour_angle_for_elevation, MINUTES_PER_DEGREE};
use crate::config::PredictorConfig;
use crate::ephemeris::ephemeris;
use crate::time::{offset_minutes, unix_seconds, utc_day_start, SECONDS_PER_DAY};
use crate::types::{SiteCoordinate, TwilightEvent};

const SOLAR_NOON_MINUTES: f64 = 720.0;

/// UTC minutes after midnight at which the sun transits `longitude`.
pub fn solar_noon_minutes(longitude: f64, equation_of_time: f64) -> f64 {
    SOLAR_NOON_MINUTES - MINUTES_PER_DEGREE * longitude - equation_of_time
}

fn refine(
    observed: &DateTime<Utc>,
    guess: &DateTime<Utc>,
    is_rise: bool,
    site: &SiteCoordinate,
    elevation: f64,
) -> Option<DateTime<Utc>> {
    let eph = ephemeris(guess);
    let hour_angle = hour_angle_for_elevation(
        site.latitude,
        eph.sin_declination,
        eph.cos_declination,
        elevation,
    );
    if !hour_angle.is_finite() {
        return None;
    }
    let noon = solar_noon_minutes(site.longitude, eph.equation_of_time_minutes);
    let offset = MINUTES_PER_DEGREE * hour_angle;
    let minutes = if is_rise { noon - offset } else { noon + offset };

    let candidate = offset_minutes(&utc_day_start(guess), minutes)?;
    let day_drift =
        ((unix_seconds(observed) - unix_seconds(&candidate)) / SECONDS_PER_DAY).round() as i64;
    candidate.checked_add_signed(Duration::try_days(day_drift)?)
}

/// `None` when the last refinement still moved by more than the tolerance.
pub fn predict_twilight(
    event: &TwilightEvent,
    site: &SiteCoordinate,
    elevation: f64,
    config: &PredictorConfig,
) -> Option<DateTime<Utc>> {
    let mut guess = event.instant;
    let mut step = f64::INFINITY;
    for _ in 0..config.iterations.max(1) {
        let next = refine(&event.instant, &guess, event.is_rise, site, elevation)?;
        step = (unix_seconds(&next) - unix_seconds(&guess)).abs();
        guess = next;
    }
    (step <= config.convergence_tolerance_seconds).then_some(guess)
}

pub fn predict_twilights(
    events: &[TwilightEvent],
    site: &SiteCoordinate,
    elevation: f64,
    config: &PredictorConfig,
) -> Vec<Option<DateTime<Utc>>> {
    events
        .iter()
        .map(|event| predict_twilight(event, site, elevation, config))
        .collect()
}
