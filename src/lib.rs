pub mod angles;
pub mod calibrate;
pub mod config;
pub mod detect;
pub mod ephemeris;
pub mod error;
pub mod filter;
pub mod optimize;
pub mod pipeline;
pub mod position;
pub mod predict;
pub mod simulate;
pub mod time;
pub mod types;
pub mod window;

pub use angles::{
    deg_to_rad, elevation_for_hour_angle, elevation_to_zenith, hour_angle_for_elevation,
    normalize_angle, rad_to_deg, wrap_longitude, zenith_to_elevation, DEGREES_PER_HOUR,
    MINUTES_PER_DEGREE,
};

pub use calibrate::{
    calibrate_sun_elevation, calibration_objective, median, timing_residuals, CalibrationObjective,
};

pub use config::{
    CalibrationConfig, FilterConfig, GeolocationConfig, PositionConfig, PredictorConfig,
    WindowConfig, DEFAULT_MIN_CALIBRATION_TWILIGHTS, DEFAULT_THRESHOLD,
};

pub use detect::{detect_in_samples, detect_twilights, has_both_directions};

pub use ephemeris::{ephemeris, ephemeris_at_julian_day};

pub use error::{GeolocationError, Result};

pub use filter::{filter_twilights, interval_deviation_hours, max_light_jump, FilterReport};

pub use optimize::{bounded_minimize, grid_scan, Minimum};

pub use pipeline::{
    run_batch, run_individual, BatchSummary, IndividualInput, IndividualOutcome,
    IndividualReport, PipelineFailure, Stage, TrackSummary,
};

pub use position::{estimate_positions, solve_pair, twilight_pairs, TwilightPair};

pub use predict::{predict_twilight, predict_twilights, solar_noon_minutes};

pub use simulate::{simulate_light_series, simulate_twilights};

pub use types::{
    CalibrationResult, CalibrationWindow, EphemerisState, LightSample, LightSeries,
    PositionEstimate, RawLightRecord, SiteCoordinate, TwilightEvent, TwilightList,
};

pub use window::select_calibration_window;
