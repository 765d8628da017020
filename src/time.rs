use chrono::{DateTime, Utc};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MINUTES_PER_DAY: f64 = 1_440.0;

const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;
const J2000_JULIAN_DAY: f64 = 2_451_545.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

pub fn unix_seconds(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 1000.0
}

/// Millisecond-resolution instant for a fractional Unix time; `None` when the
/// value is not finite or outside chrono's range.
pub fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

pub fn julian_day(instant: &DateTime<Utc>) -> f64 {
    unix_seconds(instant) / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DAY
}

pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000_JULIAN_DAY) / DAYS_PER_JULIAN_CENTURY
}

pub fn utc_day_start(instant: &DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(*instant)
}

pub fn offset_minutes(instant: &DateTime<Utc>, minutes: f64) -> Option<DateTime<Utc>> {
    from_unix_seconds(unix_seconds(instant) + minutes * 60.0)
}

pub fn hours_between(earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> f64 {
    (unix_seconds(later) - unix_seconds(earlier)) / 3600.0
}

pub fn minutes_between(earlier: &DateTime<Utc>, later: &DateTime<Utc>) -> f64 {
    (unix_seconds(later) - unix_seconds(earlier)) / 60.0
}
