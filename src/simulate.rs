use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::config::PredictorConfig;
use crate::predict::{predict_twilight, solar_noon_minutes};
use crate::time::offset_minutes;
use crate::types::{LightSample, LightSeries, SiteCoordinate, TwilightEvent, TwilightList};

const SEED_OFFSET_MINUTES: f64 = 360.0;

// Crossings the predictor cannot place are left out.
pub fn simulate_twilights(
    site: &SiteCoordinate,
    elevation: f64,
    start: NaiveDate,
    days: u32,
    config: &PredictorConfig,
) -> TwilightList {
    let mut events: TwilightList = Vec::with_capacity(2 * days as usize);
    for day in start.iter_days().take(days as usize) {
        let Some(midnight) = day.and_hms_opt(0, 0, 0).map(|m| m.and_utc()) else {
            continue;
        };
        let noon = solar_noon_minutes(site.longitude, 0.0);
        for (is_rise, offset) in [(true, -SEED_OFFSET_MINUTES), (false, SEED_OFFSET_MINUTES)] {
            let Some(seed) = offset_minutes(&midnight, noon + offset) else {
                continue;
            };
            let seed = TwilightEvent {
                instant: seed,
                is_rise,
            };
            if let Some(instant) = predict_twilight(&seed, site, elevation, config) {
                events.push(TwilightEvent { instant, is_rise });
            }
        }
    }
    events.sort_by_key(|e| e.instant);
    events.dedup_by_key(|e| e.instant);
    events
}

pub fn simulate_light_series(
    twilights: &[TwilightEvent],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step: Duration,
    day_level: f64,
    night_level: f64,
) -> LightSeries {
    let mut samples = Vec::new();
    if step <= Duration::zero() {
        return LightSeries::new(samples);
    }

    let mut is_day = twilights.first().map_or(false, |e| !e.is_rise);
    let mut next = 0;
    let mut t = start;
    while t < end {
        while next < twilights.len() && twilights[next].instant <= t {
            is_day = twilights[next].is_rise;
            next += 1;
        }
        let level = if is_day { day_level } else { night_level };
        samples.push(LightSample::new(t, level));
        t += step;
    }
    LightSeries::new(samples)
}
