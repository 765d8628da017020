use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeolocationError>;

// Numerical degeneracy never lands here; it shows up as a missing event or pair.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient data for {stage}: need {required} samples, have {available}")]
    InsufficientData {
        stage: &'static str,
        required: usize,
        available: usize,
    },

    #[error("insufficient calibration data: need {required} twilights, have {available}")]
    InsufficientCalibrationData { required: usize, available: usize },

    #[error("no valid calibration window among {tried} durations ({samples} samples searched)")]
    NoValidWindow { tried: usize, samples: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("optimizer failed: {0}")]
    Optimization(String),
}

impl GeolocationError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GeolocationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
