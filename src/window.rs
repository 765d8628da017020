use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::config::WindowConfig;
use crate::detect::{detect_in_samples, has_both_directions};
use crate::error::{GeolocationError, Result};
use crate::types::{CalibrationWindow, LightSeries, SiteCoordinate};

fn days_after(start: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|span| start.checked_add_signed(span))
        .ok_or_else(|| {
            GeolocationError::Config(format!("{days} days after {start} is out of range"))
        })
}

pub fn select_calibration_window(
    series: &LightSeries,
    _site: &SiteCoordinate,
    threshold: f64,
    min_twilights: usize,
    config: &WindowConfig,
) -> Result<CalibrationWindow> {
    let Some(start) = series.first_timestamp() else {
        return Err(GeolocationError::InsufficientData {
            stage: "calibration window",
            required: config.min_samples,
            available: 0,
        });
    };

    let search_end = days_after(start, config.search_days)?;
    let searched = series.window(start, search_end);
    if searched.len() < config.min_samples {
        return Err(GeolocationError::InsufficientData {
            stage: "calibration window",
            required: config.min_samples,
            available: searched.len(),
        });
    }

    for &duration_days in &config.durations_days {
        let end = days_after(start, i64::from(duration_days))?;
        let candidate = series.window(start, end);
        let twilights = detect_in_samples(candidate, threshold)?;
        debug!(
            duration_days,
            samples = candidate.len(),
            twilights = twilights.len(),
            "calibration window candidate"
        );
        if twilights.len() >= min_twilights && has_both_directions(&twilights) {
            info!(
                %start,
                %end,
                duration_days,
                twilights = twilights.len(),
                "calibration window selected"
            );
            return Ok(CalibrationWindow {
                start,
                end,
                event_count: twilights.len(),
                duration_days,
            });
        }
    }

    Err(GeolocationError::NoValidWindow {
        tried: config.durations_days.len(),
        samples: searched.len(),
    })
}
