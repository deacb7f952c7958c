//! `Fishcast` - Tide- and astronomy-driven fishing forecasts for Chatham, MA
//!
//! This library combines tide, solar/lunar, seasonal, and water-temperature
//! signals into an hourly fishing-quality curve, then derives best time
//! windows, an overall rating, spot recommendations, and a suggested
//! departure time for offshore runs.

pub mod astronomy;
pub mod config;
pub mod error;
pub mod fishing;
pub mod models;
pub mod noaa;

// Re-export core types for public API
pub use astronomy::AstronomicalProvider;
pub use config::FishcastConfig;
pub use error::FishcastError;
pub use fishing::{DayForecast, FishingSpot, ForecastService, SeasonalTable, SpotCatalog};
pub use models::{FishingMode, FishingWindow, HourlyScore, TidePrediction};
pub use noaa::{ForecastInputs, NoaaClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FishcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
