//! Solar and lunar data models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Solar day times for the reference station, station-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    /// Sunrise
    pub sunrise: NaiveDateTime,
    /// Sunset
    pub sunset: NaiveDateTime,
    /// Civil twilight start
    pub dawn: NaiveDateTime,
    /// Civil twilight end
    pub dusk: NaiveDateTime,
    /// Nautical twilight start
    pub nautical_dawn: NaiveDateTime,
    /// Nautical twilight end
    pub nautical_dusk: NaiveDateTime,
}

/// Named lunar phase bucket, 1/16-cycle thresholds around the principal phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Bucket a phase fraction in [0,1) into a named phase
    #[must_use]
    pub fn from_phase(phase: f64) -> Self {
        match phase {
            p if p < 0.0625 => MoonPhase::New,
            p if p < 0.1875 => MoonPhase::WaxingCrescent,
            p if p < 0.3125 => MoonPhase::FirstQuarter,
            p if p < 0.4375 => MoonPhase::WaxingGibbous,
            p if p < 0.5625 => MoonPhase::Full,
            p if p < 0.6875 => MoonPhase::WaningGibbous,
            p if p < 0.8125 => MoonPhase::LastQuarter,
            p if p < 0.9375 => MoonPhase::WaningCrescent,
            _ => MoonPhase::New,
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoonPhase::New => write!(f, "New Moon"),
            MoonPhase::WaxingCrescent => write!(f, "Waxing Crescent"),
            MoonPhase::FirstQuarter => write!(f, "First Quarter"),
            MoonPhase::WaxingGibbous => write!(f, "Waxing Gibbous"),
            MoonPhase::Full => write!(f, "Full Moon"),
            MoonPhase::WaningGibbous => write!(f, "Waning Gibbous"),
            MoonPhase::LastQuarter => write!(f, "Last Quarter"),
            MoonPhase::WaningCrescent => write!(f, "Waning Crescent"),
        }
    }
}

/// Lunar data for one calendar day at the reference station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonData {
    /// Phase fraction in [0,1): 0.0 new, 0.5 full
    pub phase: f64,
    /// Named phase bucket derived from `phase`
    pub phase_name: MoonPhase,
    /// Illuminated fraction in [0,1]
    pub illumination: f64,
    /// Station-local moonrise, if the moon rises this day
    pub moonrise: Option<NaiveDateTime>,
    /// Station-local moonset, if the moon sets this day
    pub moonset: Option<NaiveDateTime>,
}
