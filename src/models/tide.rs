//! Tide and water data models

use crate::FishcastError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Kind of tide extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TideKind {
    /// High tide
    High,
    /// Low tide
    Low,
}

impl TideKind {
    /// Parse the NOAA hilo type code ("H" or "L")
    pub fn from_noaa(code: &str) -> Result<Self, FishcastError> {
        match code {
            "H" => Ok(TideKind::High),
            "L" => Ok(TideKind::Low),
            other => Err(FishcastError::parse(format!(
                "unknown tide extremum type '{other}'"
            ))),
        }
    }
}

/// A predicted tide extremum at the reference station.
///
/// Instants are station-local (NOAA `lst_ldt`), heights are feet above MLLW.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidePrediction {
    /// Station-local instant of the extremum
    pub time: NaiveDateTime,
    /// Predicted height in feet (signed, relative to MLLW)
    pub height_ft: f64,
    /// High or Low
    pub kind: TideKind,
}

/// One point of the hourly tide-height curve (display only, unused by scoring)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyTideHeight {
    /// Station-local instant
    pub time: NaiveDateTime,
    /// Predicted height in feet
    pub height_ft: f64,
}

/// A single water-temperature observation from the NDBC buoy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterTempReading {
    /// Observation instant (UTC clock of the buoy report)
    pub time: NaiveDateTime,
    /// Water temperature in degrees Fahrenheit
    pub temp_f: f64,
}

/// Parse a NOAA timestamp string like `"2026-06-15 04:23"`
pub fn parse_noaa_time(raw: &str) -> Result<NaiveDateTime, FishcastError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .map_err(|e| FishcastError::parse(format!("bad NOAA timestamp '{raw}': {e}")))
}

/// Parse a NOAA height string like `"6.1"`
pub fn parse_noaa_height(raw: &str) -> Result<f64, FishcastError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| FishcastError::parse(format!("bad NOAA height '{raw}': {e}")))
}

/// Tidal range for a day: highest high minus lowest low.
///
/// Returns 0.0 when either side is missing (no-signal day).
#[must_use]
pub fn tidal_range(tides: &[TidePrediction]) -> f64 {
    let highs = tides
        .iter()
        .filter(|t| t.kind == TideKind::High)
        .map(|t| t.height_ft);
    let lows = tides
        .iter()
        .filter(|t| t.kind == TideKind::Low)
        .map(|t| t.height_ft);

    match (
        highs.fold(None::<f64>, |acc, h| Some(acc.map_or(h, |a| a.max(h)))),
        lows.fold(None::<f64>, |acc, l| Some(acc.map_or(l, |a| a.min(l)))),
    ) {
        (Some(max_high), Some(min_low)) => max_high - min_low,
        _ => 0.0,
    }
}

/// Keep only the extrema that fall on the given calendar day
#[must_use]
pub fn extrema_for_day(tides: &[TidePrediction], date: NaiveDate) -> Vec<TidePrediction> {
    tides
        .iter()
        .filter(|t| t.time.date() == date)
        .cloned()
        .collect()
}
