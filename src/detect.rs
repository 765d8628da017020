use tracing::{debug, warn};

use crate::error::{GeolocationError, Result};
use crate::types::{LightSample, LightSeries, TwilightEvent, TwilightList};

pub fn is_day(sample: &LightSample, threshold: f64) -> bool {
    sample.intensity > threshold
}

pub fn detect_twilights(series: &LightSeries, threshold: f64) -> Result<TwilightList> {
    detect_in_samples(series.samples(), threshold)
}

pub fn detect_in_samples(samples: &[LightSample], threshold: f64) -> Result<TwilightList> {
    if !threshold.is_finite() {
        return Err(GeolocationError::invalid_input(format!(
            "light threshold must be finite, got {threshold}"
        )));
    }
    if samples.len() < 2 {
        warn!(
            samples = samples.len(),
            "fewer than two valid light samples, no twilights detected"
        );
        return Ok(Vec::new());
    }

    let mut events: TwilightList = Vec::new();
    for pair in samples.windows(2) {
        let (before, after) = (is_day(&pair[0], threshold), is_day(&pair[1], threshold));
        if before == after {
            continue;
        }
        let event = TwilightEvent {
            instant: pair[1].timestamp,
            is_rise: after,
        };
        // Two flips at one repeated timestamp cancel out.
        if events.last().is_some_and(|last| last.instant == event.instant) {
            debug!(instant = %event.instant, "transition reverted at a repeated timestamp");
            events.pop();
        } else {
            events.push(event);
        }
    }

    if events.is_empty() {
        warn!(
            samples = samples.len(),
            threshold, "light never crossed the threshold, no twilights detected"
        );
    } else {
        debug!(events = events.len(), samples = samples.len(), "twilights detected");
    }
    Ok(events)
}

pub fn has_both_directions(events: &[TwilightEvent]) -> bool {
    events.iter().any(|e| e.is_rise) && events.iter().any(|e| !e.is_rise)
}
