//! Configuration management for the `Fishcast` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::FishcastError;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Fishcast` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishcastConfig {
    /// Reference station and home-port settings
    pub station: StationConfig,
    /// NOAA/NDBC fetch settings
    pub fetch: FetchConfig,
    /// Scoring calibration settings
    pub scoring: ScoringConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Reference station and home-port settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// NOAA tide prediction station (Chatham, Lydia Cove)
    #[serde(default = "default_tide_station")]
    pub tide_station: String,
    /// NDBC buoy with water temperature (Nantucket Sound)
    #[serde(default = "default_ndbc_buoy")]
    pub ndbc_buoy: String,
    /// Home-port latitude
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Home-port longitude
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// IANA timezone of the station (NOAA `lst_ldt` local time)
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// NOAA/NDBC fetch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Base URL for the NOAA Tides and Currents data getter
    #[serde(default = "default_noaa_base_url")]
    pub noaa_base_url: String,
    /// Base URL for NDBC realtime buoy observations
    #[serde(default = "default_ndbc_base_url")]
    pub ndbc_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_fetch_max_retries")]
    pub max_retries: u32,
}

/// Scoring calibration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lower edge of the ideal water-temperature band (deg F)
    #[serde(default = "default_ideal_temp_min")]
    pub ideal_temp_min_f: f64,
    /// Upper edge of the ideal water-temperature band (deg F)
    #[serde(default = "default_ideal_temp_max")]
    pub ideal_temp_max_f: f64,
    /// Score threshold for forecast window detection
    #[serde(default = "default_window_threshold")]
    pub window_threshold: f64,
    /// Score threshold for visual highlighting of strong hours
    #[serde(default = "default_highlight_threshold")]
    pub highlight_threshold: f64,
    /// Assumed vessel cruise speed in knots
    #[serde(default = "default_cruise_speed")]
    pub cruise_speed_kts: f64,
    /// Number of days covered by the outlook
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_tide_station() -> String {
    "8447435".to_string()
}

fn default_ndbc_buoy() -> String {
    "44020".to_string()
}

fn default_latitude() -> f64 {
    41.6823
}

fn default_longitude() -> f64 {
    -69.9597
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_noaa_base_url() -> String {
    "https://api.tidesandcurrents.noaa.gov/api/prod/datagetter".to_string()
}

fn default_ndbc_base_url() -> String {
    "https://www.ndbc.noaa.gov/data/realtime2".to_string()
}

fn default_fetch_timeout() -> u32 {
    30
}

fn default_fetch_max_retries() -> u32 {
    3
}

fn default_ideal_temp_min() -> f64 {
    55.0
}

fn default_ideal_temp_max() -> f64 {
    63.0
}

fn default_window_threshold() -> f64 {
    0.5
}

fn default_highlight_threshold() -> f64 {
    0.6
}

fn default_cruise_speed() -> f64 {
    25.0
}

fn default_forecast_days() -> u32 {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            tide_station: default_tide_station(),
            ndbc_buoy: default_ndbc_buoy(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            noaa_base_url: default_noaa_base_url(),
            ndbc_base_url: default_ndbc_base_url(),
            timeout_seconds: default_fetch_timeout(),
            max_retries: default_fetch_max_retries(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ideal_temp_min_f: default_ideal_temp_min(),
            ideal_temp_max_f: default_ideal_temp_max(),
            window_threshold: default_window_threshold(),
            highlight_threshold: default_highlight_threshold(),
            cruise_speed_kts: default_cruise_speed(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for FishcastConfig {
    fn default() -> Self {
        Self {
            station: StationConfig::default(),
            fetch: FetchConfig::default(),
            scoring: ScoringConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl FishcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with FISHCAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("FISHCAST")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: FishcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fishcast").join("config.toml"))
    }

    /// Parse the configured station timezone
    pub fn station_timezone(&self) -> Result<Tz> {
        self.station.timezone.parse::<Tz>().map_err(|_| {
            FishcastError::config(format!("Unknown timezone '{}'", self.station.timezone)).into()
        })
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.station.latitude) {
            return Err(
                FishcastError::config("Station latitude must be between -90 and 90").into(),
            );
        }

        if !(-180.0..=180.0).contains(&self.station.longitude) {
            return Err(
                FishcastError::config("Station longitude must be between -180 and 180").into(),
            );
        }

        if self.fetch.timeout_seconds == 0 || self.fetch.timeout_seconds > 300 {
            return Err(
                FishcastError::config("Fetch timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.fetch.max_retries > 10 {
            return Err(FishcastError::config("Fetch max retries cannot exceed 10").into());
        }

        if self.scoring.ideal_temp_min_f >= self.scoring.ideal_temp_max_f {
            return Err(FishcastError::config(
                "Ideal water-temperature band must have min below max",
            )
            .into());
        }

        if !(0.0..=1.0).contains(&self.scoring.window_threshold) {
            return Err(
                FishcastError::config("Window threshold must be between 0.0 and 1.0").into(),
            );
        }

        if !(0.0..=1.0).contains(&self.scoring.highlight_threshold) {
            return Err(
                FishcastError::config("Highlight threshold must be between 0.0 and 1.0").into(),
            );
        }

        if self.scoring.cruise_speed_kts <= 0.0 {
            return Err(FishcastError::config("Cruise speed must be positive").into());
        }

        if self.scoring.forecast_days == 0 || self.scoring.forecast_days > 14 {
            return Err(FishcastError::config("Forecast days must be between 1 and 14").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(FishcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(FishcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.fetch.noaa_base_url.starts_with("http://")
            && !self.fetch.noaa_base_url.starts_with("https://")
        {
            return Err(
                FishcastError::config("NOAA base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.station.tide_station.is_empty() {
            return Err(FishcastError::config("Tide station id cannot be empty").into());
        }

        self.station.timezone.parse::<Tz>().map_err(|_| {
            FishcastError::config(format!("Unknown timezone '{}'", self.station.timezone))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FishcastConfig::default();
        assert_eq!(config.station.tide_station, "8447435");
        assert_eq!(config.station.ndbc_buoy, "44020");
        assert_eq!(config.fetch.timeout_seconds, 30);
        assert_eq!(config.scoring.cruise_speed_kts, 25.0);
        assert_eq!(config.scoring.forecast_days, 7);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_station_timezone_parses() {
        let config = FishcastConfig::default();
        assert_eq!(config.station_timezone().unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = FishcastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = FishcastConfig::default();
        config.fetch.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));

        let mut config = FishcastConfig::default();
        config.scoring.ideal_temp_min_f = 70.0;
        assert!(config.validate().is_err());

        let mut config = FishcastConfig::default();
        config.scoring.window_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_timezone() {
        let mut config = FishcastConfig::default();
        config.station.timezone = "Atlantis/Lost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = FishcastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("fishcast"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
