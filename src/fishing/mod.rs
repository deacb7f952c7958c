//! Fishing forecast module
//!
//! This module provides the forecast scoring core:
//! - Pure signal functions (slack tide, current flow, tidal range,
//!   water temperature, time of day, moon phase)
//! - The per-hour scorer with mode-specific weightings
//! - Window detection over the daily score curve
//! - Seasonal and spot reference tables
//! - Per-day forecast assembly and the multi-day outlook

pub mod forecast;
pub mod scorer;
pub mod seasons;
pub mod signals;
pub mod spots;
pub mod windows;

// Re-export commonly used types from submodules
pub use forecast::{DayForecast, ForecastService, rating_from_scores};
pub use scorer::{DayInputs, compute_hourly_scores};
pub use seasons::{SeasonEntry, SeasonalTable};
pub use spots::{FishingSpot, SpotCatalog, SpotCategory};
pub use windows::find_best_windows;
