//! Data models for the Fishcast application
//!
//! This module contains the core domain models organized by concern:
//! - Tide: tide extrema, hourly heights, water temperature
//! - Astronomy: solar day times and lunar data
//! - Forecast: hourly scores, fishing windows, and day forecasts

pub mod astronomy;
pub mod forecast;
pub mod tide;

// Re-export all public types for convenient access
pub use astronomy::{MoonData, MoonPhase, SunTimes};
pub use forecast::{FactorScores, FishingMode, FishingWindow, HourlyScore};
pub use tide::{HourlyTideHeight, TideKind, TidePrediction, WaterTempReading};
