use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calibrate::calibrate_sun_elevation;
use crate::config::GeolocationConfig;
use crate::detect::detect_in_samples;
use crate::error::GeolocationError;
use crate::filter::{filter_twilights, FilterReport};
use crate::position::estimate_positions;
use crate::types::{
    CalibrationResult, CalibrationWindow, LightSeries, PositionEstimate, SiteCoordinate,
};
use crate::window::select_calibration_window;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    WindowSelection,
    CalibrationDetection,
    Calibration,
    DeploymentDetection,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::WindowSelection => "window selection",
            Stage::CalibrationDetection => "calibration twilight detection",
            Stage::Calibration => "sun elevation calibration",
            Stage::DeploymentDetection => "deployment twilight detection",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndividualInput {
    pub id: String,
    pub series: LightSeries,
    pub site: SiteCoordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub positions: usize,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub mean_longitude: f64,
    pub mean_latitude: f64,
}

impl TrackSummary {
    pub fn from_positions(positions: &[PositionEstimate]) -> Option<Self> {
        let first = positions.first()?;
        let last = positions.last()?;
        let n = positions.len() as f64;
        // Circular mean so tracks straddling the antimeridian stay put.
        let (sin_sum, cos_sum) = positions.iter().fold((0.0, 0.0), |(s, c), p| {
            let lon = p.longitude.to_radians();
            (s + lon.sin(), c + lon.cos())
        });
        Some(Self {
            positions: positions.len(),
            first: first.timestamp,
            last: last.timestamp,
            mean_longitude: sin_sum.atan2(cos_sum).to_degrees(),
            mean_latitude: positions.iter().map(|p| p.latitude).sum::<f64>() / n,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualReport {
    pub id: String,
    pub window: CalibrationWindow,
    pub calibration_twilights: FilterReport,
    pub calibration: CalibrationResult,
    pub deployment_twilights: FilterReport,
    pub positions: Vec<PositionEstimate>,
    pub summary: Option<TrackSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineFailure {
    pub id: String,
    pub stage: Stage,
    pub samples: usize,
    pub error: GeolocationError,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} failed on {} samples: {}",
            self.id, self.stage, self.samples, self.error
        )
    }
}

impl std::error::Error for PipelineFailure {}

#[derive(Debug, Clone, PartialEq)]
pub enum IndividualOutcome {
    Completed(Box<IndividualReport>),
    Failed(PipelineFailure),
}

impl IndividualOutcome {
    pub fn id(&self) -> &str {
        match self {
            IndividualOutcome::Completed(report) => &report.id,
            IndividualOutcome::Failed(failure) => &failure.id,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, IndividualOutcome::Completed(_))
    }
}

impl From<Result<IndividualReport, PipelineFailure>> for IndividualOutcome {
    fn from(result: Result<IndividualReport, PipelineFailure>) -> Self {
        match result {
            Ok(report) => IndividualOutcome::Completed(Box::new(report)),
            Err(failure) => IndividualOutcome::Failed(failure),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub completed: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[IndividualOutcome]) -> Self {
        let completed = outcomes.iter().filter(|o| o.is_completed()).count();
        Self {
            completed,
            failed: outcomes.len() - completed,
        }
    }
}

pub fn run_individual(
    input: &IndividualInput,
    config: &GeolocationConfig,
) -> Result<IndividualReport, PipelineFailure> {
    let fail = |stage: Stage, samples: usize| {
        let id = input.id.clone();
        move |error: GeolocationError| PipelineFailure {
            id,
            stage,
            samples,
            error,
        }
    };

    let series = &input.series;
    let window = select_calibration_window(
        series,
        &input.site,
        config.threshold,
        config.min_calibration_twilights,
        &config.window,
    )
    .map_err(fail(Stage::WindowSelection, series.len()))?;

    let window_samples = series.window(window.start, window.end);
    let detected = detect_in_samples(window_samples, config.threshold)
        .map_err(fail(Stage::CalibrationDetection, window_samples.len()))?;
    let window_series = LightSeries::slice(window_samples);
    let calibration_twilights =
        filter_twilights(&detected, Some(&window_series), &config.filter, true);

    let calibration = calibrate_sun_elevation(
        &calibration_twilights.events,
        &input.site,
        &config.calibration,
        &config.predictor,
    )
    .map_err(fail(Stage::Calibration, calibration_twilights.events.len()))?;

    let deployment_samples = series.after(window.end);
    let deployment_series = LightSeries::slice(deployment_samples);
    let detected = detect_in_samples(deployment_samples, config.threshold)
        .map_err(fail(Stage::DeploymentDetection, deployment_samples.len()))?;
    let deployment_twilights =
        filter_twilights(&detected, Some(&deployment_series), &config.filter, false);

    let positions = estimate_positions(
        &deployment_twilights.events,
        calibration.sun_elevation_degrees,
        &config.position,
    );
    let summary = TrackSummary::from_positions(&positions);

    info!(
        id = %input.id,
        calibration_twilights = calibration_twilights.events.len(),
        deployment_twilights = deployment_twilights.events.len(),
        positions = positions.len(),
        sun_elevation = calibration.sun_elevation_degrees,
        "individual processed"
    );

    Ok(IndividualReport {
        id: input.id.clone(),
        window,
        calibration_twilights,
        calibration,
        deployment_twilights,
        positions,
        summary,
    })
}

pub fn run_batch(inputs: &[IndividualInput], config: &GeolocationConfig) -> Vec<IndividualOutcome> {
    inputs
        .iter()
        .map(|input| {
            let result = run_individual(input, config);
            if let Err(failure) = &result {
                warn!(
                    id = %failure.id,
                    stage = %failure.stage,
                    samples = failure.samples,
                    error = %failure.error,
                    "individual skipped"
                );
            }
            IndividualOutcome::from(result)
        })
        .collect()
}
