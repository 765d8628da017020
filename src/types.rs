use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GeolocationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSample {
    pub timestamp: DateTime<Utc>,
    pub intensity: f64,
}

impl LightSample {
    pub fn new(timestamp: DateTime<Utc>, intensity: f64) -> Self {
        Self {
            timestamp,
            intensity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLightRecord {
    pub timestamp: Option<DateTime<Utc>>,
    pub intensity: Option<f64>,
}

/// Finite samples, stably sorted by timestamp. Duplicate timestamps are kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<LightSample>", into = "Vec<LightSample>")]
pub struct LightSeries {
    samples: Vec<LightSample>,
}

impl LightSeries {
    pub fn new(samples: Vec<LightSample>) -> Self {
        let mut samples: Vec<LightSample> = samples
            .into_iter()
            .filter(|s| s.intensity.is_finite())
            .collect();
        samples.sort_by_key(|s| s.timestamp);
        Self { samples }
    }

    // A field missing from every record is an error; a missing value just drops the record.
    pub fn from_records(records: &[RawLightRecord]) -> Result<Self> {
        if !records.is_empty() {
            if records.iter().all(|r| r.timestamp.is_none()) {
                return Err(GeolocationError::invalid_input(
                    "light records carry no timestamp field",
                ));
            }
            if records.iter().all(|r| r.intensity.is_none()) {
                return Err(GeolocationError::invalid_input(
                    "light records carry no intensity field",
                ));
            }
        }
        let samples = records
            .iter()
            .filter_map(|r| match (r.timestamp, r.intensity) {
                (Some(timestamp), Some(intensity)) => Some(LightSample::new(timestamp, intensity)),
                _ => None,
            })
            .collect();
        Ok(Self::new(samples))
    }

    pub fn samples(&self) -> &[LightSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Samples with `start <= timestamp < end`.
    pub fn window(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[LightSample] {
        let lo = self.samples.partition_point(|s| s.timestamp < start);
        let hi = self.samples.partition_point(|s| s.timestamp < end);
        &self.samples[lo..hi.max(lo)]
    }

    /// Samples with `timestamp > after`.
    pub fn after(&self, after: DateTime<Utc>) -> &[LightSample] {
        let lo = self.samples.partition_point(|s| s.timestamp <= after);
        &self.samples[lo..]
    }

    pub fn slice(samples: &[LightSample]) -> Self {
        Self {
            samples: samples.to_vec(),
        }
    }
}

impl From<Vec<LightSample>> for LightSeries {
    fn from(samples: Vec<LightSample>) -> Self {
        Self::new(samples)
    }
}

impl From<LightSeries> for Vec<LightSample> {
    fn from(series: LightSeries) -> Self {
        series.samples
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TwilightEvent {
    pub instant: DateTime<Utc>,
    pub is_rise: bool,
}

impl TwilightEvent {
    pub fn rise(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            is_rise: true,
        }
    }

    pub fn set(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            is_rise: false,
        }
    }
}

pub type TwilightList = Vec<TwilightEvent>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl SiteCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeolocationError::invalid_input(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeolocationError::invalid_input(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub event_count: usize,
    pub duration_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EphemerisState {
    pub apparent_solar_time_minutes: f64,
    pub equation_of_time_minutes: f64,
    pub sin_declination: f64,
    pub cos_declination: f64,
}

impl EphemerisState {
    pub fn solar_time_degrees(&self) -> f64 {
        self.apparent_solar_time_minutes / crate::angles::MINUTES_PER_DEGREE
    }

    pub fn declination_degrees(&self) -> f64 {
        crate::angles::rad_to_deg(self.sin_declination.atan2(self.cos_declination))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    pub zenith_angle_degrees: f64,
    pub sun_elevation_degrees: f64,
    pub fit_residual: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionEstimate {
    pub timestamp: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
}
