use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_THRESHOLD: f64 = 2.0;
pub const DEFAULT_MIN_CALIBRATION_TWILIGHTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub strict_min_gap_hours: f64,
    pub relaxed_min_gap_hours: f64,
    pub max_interval_deviation_hours: f64,
    /// The interval check runs only when more than this many events remain.
    pub interval_check_min_events: usize,
    /// The light stability check runs only when more than this many events remain.
    pub light_check_min_events: usize,
    pub instability_threshold: f64,
    pub instability_window_minutes: f64,
    pub instability_min_samples: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strict_min_gap_hours: 1.0,
            relaxed_min_gap_hours: 2.0,
            max_interval_deviation_hours: 8.0,
            interval_check_min_events: 4,
            light_check_min_events: 20,
            instability_threshold: 300.0,
            instability_window_minutes: 30.0,
            instability_min_samples: 5,
        }
    }
}

impl FilterConfig {
    pub fn min_gap_hours(&self, strict: bool) -> f64 {
        if strict {
            self.strict_min_gap_hours
        } else {
            self.relaxed_min_gap_hours
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub iterations: usize,
    pub convergence_tolerance_seconds: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            iterations: 4,
            convergence_tolerance_seconds: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub search_min: f64,
    pub search_max: f64,
    pub scan_step_degrees: f64,
    pub tolerance_degrees: f64,
    pub max_iterations: u64,
    pub penalty: f64,
    pub min_events: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            search_min: -12.0,
            search_max: 2.0,
            scan_step_degrees: 0.5,
            tolerance_degrees: 1e-4,
            max_iterations: 100,
            penalty: 1e6,
            min_events: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionConfig {
    pub sin_declination_tolerance: f64,
}

impl Default for PositionConfig {
    fn default() -> Self {
        Self {
            sin_declination_tolerance: 0.08,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub search_days: i64,
    pub min_samples: usize,
    /// Candidate durations in days, tried in this order.
    pub durations_days: Vec<u32>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            search_days: 10,
            min_samples: 100,
            durations_days: vec![2, 3, 1, 4, 5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub threshold: f64,
    pub min_calibration_twilights: usize,
    pub filter: FilterConfig,
    pub predictor: PredictorConfig,
    pub calibration: CalibrationConfig,
    pub position: PositionConfig,
    pub window: WindowConfig,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_calibration_twilights: DEFAULT_MIN_CALIBRATION_TWILIGHTS,
            filter: FilterConfig::default(),
            predictor: PredictorConfig::default(),
            calibration: CalibrationConfig::default(),
            position: PositionConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl GeolocationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
