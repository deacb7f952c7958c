//! Hourly scorer: combines the signal functions into a 24-entry score curve

use crate::config::ScoringConfig;
use crate::fishing::signals;
use crate::models::{FactorScores, FishingMode, HourlyScore, SunTimes, TidePrediction};
use chrono::NaiveDate;

// Offshore weights: slack-tide feeding windows dominate
const OFFSHORE_SLACK_WEIGHT: f64 = 0.3;
const OFFSHORE_TIME_OF_DAY_WEIGHT: f64 = 0.3;
const OFFSHORE_SEASONAL_WEIGHT: f64 = 0.2;
const OFFSHORE_MOON_WEIGHT: f64 = 0.1;
const OFFSHORE_TEMP_WEIGHT: f64 = 0.1;

// Inshore weights: moving water over structure dominates
const INSHORE_FLOW_WEIGHT: f64 = 0.35;
const INSHORE_RANGE_WEIGHT: f64 = 0.2;
const INSHORE_TIME_OF_DAY_WEIGHT: f64 = 0.25;
const INSHORE_MOON_WEIGHT: f64 = 0.1;
const INSHORE_SEASONAL_WEIGHT: f64 = 0.1;

/// Precomputed per-day inputs for the hourly scorer
#[derive(Debug, Clone)]
pub struct DayInputs<'a> {
    /// Calendar day being scored
    pub date: NaiveDate,
    /// The day's tide extrema
    pub tides: &'a [TidePrediction],
    /// The day's solar times
    pub sun_times: &'a SunTimes,
    /// Moon-phase signal for the day
    pub moon_phase_score: f64,
    /// Seasonal suitability for the month and mode
    pub seasonal_score: f64,
    /// Water temperature, if known
    pub water_temp_f: Option<f64>,
    /// The day's tidal range in feet
    pub tidal_range_ft: f64,
}

/// Produce exactly 24 hourly scores for one calendar day.
///
/// Every factor is evaluated per hour and combined with the mode's fixed
/// weighting; factors the mode does not use are zero-filled on the record.
#[must_use]
pub fn compute_hourly_scores(
    mode: FishingMode,
    inputs: &DayInputs<'_>,
    scoring: &ScoringConfig,
) -> Vec<HourlyScore> {
    let mut scores = Vec::with_capacity(24);

    for h in 0..24u32 {
        let Some(hour) = inputs.date.and_hms_opt(h, 0, 0) else {
            continue;
        };
        let time_of_day = signals::time_of_day_score(hour, inputs.sun_times);

        let (score, factors) = match mode {
            FishingMode::Offshore => {
                let slack = signals::slack_tide_score(hour, inputs.tides);
                let water_temp = signals::water_temp_score(
                    inputs.water_temp_f,
                    scoring.ideal_temp_min_f,
                    scoring.ideal_temp_max_f,
                );
                let total = slack * OFFSHORE_SLACK_WEIGHT
                    + time_of_day * OFFSHORE_TIME_OF_DAY_WEIGHT
                    + inputs.seasonal_score * OFFSHORE_SEASONAL_WEIGHT
                    + inputs.moon_phase_score * OFFSHORE_MOON_WEIGHT
                    + water_temp * OFFSHORE_TEMP_WEIGHT;
                (
                    total,
                    FactorScores {
                        slack_tide: slack,
                        time_of_day,
                        seasonal: inputs.seasonal_score,
                        moon_phase: inputs.moon_phase_score,
                        water_temp,
                        current_flow: 0.0,
                        tide_range: 0.0,
                    },
                )
            }
            FishingMode::Inshore => {
                let current_flow = signals::current_flow_score(hour, inputs.tides);
                let tide_range = signals::tide_range_score(inputs.tidal_range_ft);
                let total = current_flow * INSHORE_FLOW_WEIGHT
                    + tide_range * INSHORE_RANGE_WEIGHT
                    + time_of_day * INSHORE_TIME_OF_DAY_WEIGHT
                    + inputs.moon_phase_score * INSHORE_MOON_WEIGHT
                    + inputs.seasonal_score * INSHORE_SEASONAL_WEIGHT;
                (
                    total,
                    FactorScores {
                        slack_tide: 0.0,
                        time_of_day,
                        seasonal: inputs.seasonal_score,
                        moon_phase: inputs.moon_phase_score,
                        water_temp: 0.0,
                        current_flow,
                        tide_range,
                    },
                )
            }
        };

        scores.push(HourlyScore {
            hour,
            score: score.clamp(0.0, 1.0),
            factors,
        });
    }

    scores
}
