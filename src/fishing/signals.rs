//! Signal functions for fishing-quality scoring
//!
//! Each function is pure and maps raw inputs to a suitability value in
//! [0,1]. No side effects, no shared state; the hourly scorer combines
//! them with mode-specific weights.

use crate::models::{SunTimes, TidePrediction};
use chrono::{Duration, NaiveDateTime};

/// Hours from an extremum at which the slack signal reaches zero
const SLACK_FALLOFF_HOURS: f64 = 3.0;

/// Tidal range scoring zero point (regional calibration: ~2.5 ft neaps)
const TIDE_RANGE_FLOOR_FT: f64 = 2.0;

/// Tidal range above the floor that saturates the score (~6 ft springs)
const TIDE_RANGE_SPAN_FT: f64 = 4.0;

/// Degrees F outside the ideal band over which suitability decays to zero
const TEMP_DECAY_BAND_F: f64 = 10.0;

/// Proximity to the nearest slack tide (the turn at each high and low).
///
/// 1.0 exactly at an extremum, falling linearly to 0 at three hours out.
/// An empty extrema list means no slack signal is available: score 0.
#[must_use]
pub fn slack_tide_score(hour: NaiveDateTime, tides: &[TidePrediction]) -> f64 {
    let nearest_secs = tides
        .iter()
        .map(|t| (t.time - hour).num_seconds().abs())
        .min();

    match nearest_secs {
        Some(secs) => (1.0 - secs as f64 / (SLACK_FALLOFF_HOURS * 3600.0)).max(0.0),
        None => 0.0,
    }
}

/// Current strength: the inverse of the slack signal, peaking midway
/// between extrema when water is moving hardest over the rips.
#[must_use]
pub fn current_flow_score(hour: NaiveDateTime, tides: &[TidePrediction]) -> f64 {
    1.0 - slack_tide_score(hour, tides)
}

/// Spring-vs-neap quality of the day's tidal range: linear ramp from the
/// floor to saturation (2 ft scores 0, 6 ft scores 1).
#[must_use]
pub fn tide_range_score(range_ft: f64) -> f64 {
    ((range_ft - TIDE_RANGE_FLOOR_FT) / TIDE_RANGE_SPAN_FT).clamp(0.0, 1.0)
}

/// Water-temperature suitability: 1.0 inside the ideal band, decaying
/// linearly to 0 over ten degrees on either side. Unknown is neutral 0.5.
#[must_use]
pub fn water_temp_score(temp_f: Option<f64>, ideal_min_f: f64, ideal_max_f: f64) -> f64 {
    let Some(temp) = temp_f else {
        return 0.5;
    };
    if temp >= ideal_min_f && temp <= ideal_max_f {
        1.0
    } else if temp < ideal_min_f {
        (1.0 - (ideal_min_f - temp) / TEMP_DECAY_BAND_F).max(0.0)
    } else {
        (1.0 - (temp - ideal_max_f) / TEMP_DECAY_BAND_F).max(0.0)
    }
}

/// Feeding-time quality across the day: primary peak around dawn,
/// secondary peak into dusk, flat midday, near-zero overnight.
#[must_use]
pub fn time_of_day_score(hour: NaiveDateTime, sun: &SunTimes) -> f64 {
    let peak_start = sun.dawn - Duration::minutes(30);
    let peak_end = sun.sunrise + Duration::hours(2);

    if hour >= peak_start && hour <= peak_end {
        // Ramp up to the peak at sunrise, then slowly decline
        if hour <= sun.sunrise {
            let progress = seconds_between(peak_start, hour) / seconds_between(peak_start, sun.sunrise);
            return 0.8 + 0.2 * progress;
        }
        let progress = seconds_between(sun.sunrise, hour) / seconds_between(sun.sunrise, peak_end);
        return 1.0 - 0.3 * progress;
    }

    let dusk_start = sun.sunset - Duration::hours(2);
    if hour >= dusk_start && hour <= sun.sunset {
        let progress = seconds_between(dusk_start, hour) / seconds_between(dusk_start, sun.sunset);
        return 0.5 + 0.3 * progress;
    }

    if hour > peak_end && hour < dusk_start {
        return 0.2;
    }

    // Night: low but not zero, the bite never fully stops
    0.1
}

/// New/full moon proximity: 1.0 at new (phase 0) and full (phase 0.5),
/// 0.5 at the quarters.
#[must_use]
pub fn moon_phase_score(phase: f64) -> f64 {
    let dist_from_new = phase.min(1.0 - phase);
    let dist_from_full = (phase - 0.5).abs();
    1.0 - 2.0 * dist_from_new.min(dist_from_full)
}

fn seconds_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64
}
