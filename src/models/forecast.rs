//! Scoring data model: modes, factor breakdowns, hourly scores, windows

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which fishery the forecast targets.
///
/// The two modes weight the same signals differently: offshore chases
/// slack-tide feeding windows, inshore works moving water over structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FishingMode {
    /// Offshore/pelagic fishing (bluefin east of the harbor)
    Offshore,
    /// Inshore fishing on the rips and shoals
    Inshore,
}

impl fmt::Display for FishingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FishingMode::Offshore => write!(f, "offshore"),
            FishingMode::Inshore => write!(f, "inshore"),
        }
    }
}

/// Per-factor score breakdown for one hour.
///
/// Every factor is always populated; factors a mode's formula does not use
/// are explicitly 0.0 so downstream consumers stay total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    /// Proximity to the nearest tide extremum
    pub slack_tide: f64,
    /// Dawn/dusk feeding-time quality
    pub time_of_day: f64,
    /// Monthly seasonal suitability
    pub seasonal: f64,
    /// New/full moon proximity
    pub moon_phase: f64,
    /// Water-temperature suitability
    pub water_temp: f64,
    /// Current strength between extrema (inshore)
    pub current_flow: f64,
    /// Spring-vs-neap tidal range quality (inshore)
    pub tide_range: f64,
}

impl FactorScores {
    /// All factors with their display labels, in fixed declaration order
    #[must_use]
    pub fn labeled(&self) -> [(&'static str, f64); 7] {
        [
            ("slack tide", self.slack_tide),
            ("time of day", self.time_of_day),
            ("season", self.seasonal),
            ("moon phase", self.moon_phase),
            ("water temp", self.water_temp),
            ("current flow", self.current_flow),
            ("tidal range", self.tide_range),
        ]
    }

    /// The two strongest factor labels joined as a window reason,
    /// e.g. "slack tide + time of day". Ties keep declaration order.
    #[must_use]
    pub fn top_two_labels(&self) -> String {
        let mut factors = self.labeled();
        factors.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        format!("{} + {}", factors[0].0, factors[1].0)
    }
}

/// Composite score for one local hour, with the full factor breakdown
/// retained for window reasons and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyScore {
    /// Station-local hour instant (minute zero)
    pub hour: NaiveDateTime,
    /// Weighted composite in [0,1]
    pub score: f64,
    /// Contributing factor scores, each in [0,1]
    pub factors: FactorScores,
}

/// A contiguous above-threshold stretch of the day's score curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingWindow {
    /// First hour of the window (hour-aligned, station-local)
    pub start: NaiveDateTime,
    /// Last hour still at/above threshold (start <= end)
    pub end: NaiveDateTime,
    /// Maximum composite score observed inside the window
    pub score: f64,
    /// Top two contributing factors at the point of maximum score
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display() {
        assert_eq!(FishingMode::Offshore.to_string(), "offshore");
        assert_eq!(FishingMode::Inshore.to_string(), "inshore");
    }

    #[test]
    fn test_mode_serde_roundtrip() {
        let json = serde_json::to_string(&FishingMode::Offshore).unwrap();
        assert_eq!(json, "\"offshore\"");
        let mode: FishingMode = serde_json::from_str("\"inshore\"").unwrap();
        assert_eq!(mode, FishingMode::Inshore);
    }

    #[test]
    fn test_top_two_labels() {
        let factors = FactorScores {
            slack_tide: 0.9,
            time_of_day: 1.0,
            seasonal: 0.2,
            ..FactorScores::default()
        };
        assert_eq!(factors.top_two_labels(), "time of day + slack tide");
    }

    #[test]
    fn test_top_two_labels_tie_keeps_declaration_order() {
        let factors = FactorScores {
            slack_tide: 0.8,
            time_of_day: 0.8,
            ..FactorScores::default()
        };
        assert_eq!(factors.top_two_labels(), "slack tide + time of day");
    }
}
