use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FilterConfig;
use crate::time::{hours_between, offset_minutes};
use crate::types::{LightSeries, TwilightEvent, TwilightList};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterReport {
    pub events: TwilightList,
    pub removed_min_gap: usize,
    pub removed_interval: usize,
    pub removed_unstable: usize,
}

impl FilterReport {
    pub fn removed(&self) -> usize {
        self.removed_min_gap + self.removed_interval + self.removed_unstable
    }
}

pub fn expected_gap_hours(previous: &TwilightEvent, current: &TwilightEvent) -> f64 {
    if previous.is_rise == current.is_rise {
        24.0
    } else {
        12.0
    }
}

/// Hours between the gap and the nearest plausible interval, allowing for
/// whole days of missed twilights (12, 36, 60 h for opposite directions;
/// 24, 48 h for the same direction).
pub fn interval_deviation_hours(previous: &TwilightEvent, current: &TwilightEvent) -> f64 {
    let gap = hours_between(&previous.instant, &current.instant);
    let expected = expected_gap_hours(previous, current);
    let missed_days = ((gap - expected) / 24.0).round().max(0.0);
    (gap - expected - 24.0 * missed_days).abs()
}

// Survivors are compared with the most recent survivor, not the raw predecessor.
fn retain_against_last_kept<F>(events: &[TwilightEvent], keep: F) -> TwilightList
where
    F: Fn(&TwilightEvent, &TwilightEvent) -> bool,
{
    let mut kept: TwilightList = Vec::with_capacity(events.len());
    for event in events {
        match kept.last() {
            Some(last) if !keep(last, event) => {}
            _ => kept.push(*event),
        }
    }
    kept
}

pub fn drop_too_close(events: &[TwilightEvent], min_gap_hours: f64) -> TwilightList {
    retain_against_last_kept(events, |last, event| {
        hours_between(&last.instant, &event.instant) >= min_gap_hours
    })
}

pub fn drop_irregular_intervals(
    events: &[TwilightEvent],
    max_deviation_hours: f64,
) -> TwilightList {
    retain_against_last_kept(events, |last, event| {
        interval_deviation_hours(last, event) <= max_deviation_hours
    })
}

pub fn max_light_jump(
    event: &TwilightEvent,
    light: &LightSeries,
    window_minutes: f64,
    min_samples: usize,
) -> Option<f64> {
    let start = offset_minutes(&event.instant, -window_minutes)?;
    let end = offset_minutes(&event.instant, window_minutes)?;
    let samples = light.window(start, end);
    if samples.len() < min_samples {
        return None;
    }
    samples
        .windows(2)
        .map(|pair| (pair[1].intensity - pair[0].intensity).abs())
        .reduce(f64::max)
}

pub fn drop_unstable_light(
    events: &[TwilightEvent],
    light: &LightSeries,
    config: &FilterConfig,
) -> TwilightList {
    events
        .iter()
        .filter(|event| {
            max_light_jump(
                event,
                light,
                config.instability_window_minutes,
                config.instability_min_samples,
            )
            .map_or(true, |jump| jump <= config.instability_threshold)
        })
        .copied()
        .collect()
}

// Dropping unstable events re-runs the interval check on the survivors.
pub fn filter_twilights(
    events: &[TwilightEvent],
    light: Option<&LightSeries>,
    config: &FilterConfig,
    strict: bool,
) -> FilterReport {
    let input = events.len();

    let spaced = drop_too_close(events, config.min_gap_hours(strict));
    let removed_min_gap = input - spaced.len();

    let regular = if spaced.len() > config.interval_check_min_events {
        drop_irregular_intervals(&spaced, config.max_interval_deviation_hours)
    } else {
        spaced.clone()
    };
    let mut removed_interval = spaced.len() - regular.len();

    let stable = match light {
        Some(light) if !strict && regular.len() > config.light_check_min_events => {
            drop_unstable_light(&regular, light, config)
        }
        _ => regular.clone(),
    };
    let removed_unstable = regular.len() - stable.len();

    let events = if removed_unstable > 0 {
        let rechecked = drop_irregular_intervals(&stable, config.max_interval_deviation_hours);
        removed_interval += stable.len() - rechecked.len();
        rechecked
    } else {
        stable
    };

    debug!(
        input,
        strict,
        removed_min_gap,
        removed_interval,
        removed_unstable,
        kept = events.len(),
        "twilight filter"
    );

    FilterReport {
        events,
        removed_min_gap,
        removed_interval,
        removed_unstable,
    }
}
