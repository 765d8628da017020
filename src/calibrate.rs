use argmin::core::CostFunction;
use tracing::{debug, info};

use crate::angles::elevation_to_zenith;
use crate::config::{CalibrationConfig, PredictorConfig};
use crate::error::{GeolocationError, Result};
use crate::optimize::bounded_minimize;
use crate::predict::predict_twilight;
use crate::time::minutes_between;
use crate::types::{CalibrationResult, SiteCoordinate, TwilightEvent};

pub fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some(0.5 * (values[mid - 1] + values[mid]))
    } else {
        Some(values[mid])
    }
}

pub fn timing_residuals(
    events: &[TwilightEvent],
    site: &SiteCoordinate,
    elevation: f64,
    config: &PredictorConfig,
) -> Vec<f64> {
    events
        .iter()
        .filter_map(|event| {
            let predicted = predict_twilight(event, site, elevation, config)?;
            let residual = minutes_between(&predicted, &event.instant).abs();
            residual.is_finite().then_some(residual)
        })
        .collect()
}

pub fn calibration_objective(
    events: &[TwilightEvent],
    site: &SiteCoordinate,
    elevation: f64,
    predictor: &PredictorConfig,
    penalty: f64,
) -> f64 {
    let mut residuals = timing_residuals(events, site, elevation, predictor);
    median(&mut residuals).unwrap_or(penalty)
}

#[derive(Debug, Clone, Copy)]
pub struct CalibrationObjective<'a> {
    pub events: &'a [TwilightEvent],
    pub site: &'a SiteCoordinate,
    pub predictor: &'a PredictorConfig,
    pub penalty: f64,
}

impl CostFunction for CalibrationObjective<'_> {
    type Param = f64;
    type Output = f64;

    fn cost(&self, elevation: &f64) -> std::result::Result<f64, argmin::core::Error> {
        Ok(calibration_objective(
            self.events,
            self.site,
            *elevation,
            self.predictor,
            self.penalty,
        ))
    }
}

pub fn calibrate_sun_elevation(
    events: &[TwilightEvent],
    site: &SiteCoordinate,
    calibration: &CalibrationConfig,
    predictor: &PredictorConfig,
) -> Result<CalibrationResult> {
    if events.len() < calibration.min_events {
        return Err(GeolocationError::InsufficientCalibrationData {
            required: calibration.min_events,
            available: events.len(),
        });
    }

    let objective = CalibrationObjective {
        events,
        site,
        predictor,
        penalty: calibration.penalty,
    };
    let minimum = bounded_minimize(
        objective,
        calibration.search_min,
        calibration.search_max,
        calibration.scan_step_degrees,
        calibration.tolerance_degrees,
        calibration.max_iterations,
    )?;
    debug!(
        iterations = minimum.iterations,
        converged = minimum.converged,
        "sun elevation search"
    );

    let result = CalibrationResult {
        zenith_angle_degrees: elevation_to_zenith(minimum.x),
        sun_elevation_degrees: minimum.x,
        fit_residual: minimum.value,
    };
    info!(
        events = events.len(),
        sun_elevation = result.sun_elevation_degrees,
        zenith = result.zenith_angle_degrees,
        residual_minutes = result.fit_residual,
        "sun elevation calibrated"
    );
    Ok(result)
}
