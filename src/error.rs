//! Error types and handling for the `Fishcast` forecast engine

use thiserror::Error;

/// Main error type for the `Fishcast` application
#[derive(Error, Debug)]
pub enum FishcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// NOAA/NDBC communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Upstream payload parsing errors (timestamps, heights, buoy rows)
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl FishcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FishcastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FishcastError::Api { .. } => {
                "Unable to reach NOAA/NDBC services. Please check your internet connection."
                    .to_string()
            }
            FishcastError::Parse { message } => {
                format!("Received malformed data from upstream: {message}")
            }
            FishcastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            FishcastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            FishcastError::General { message } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = FishcastError::config("missing station id");
        assert!(matches!(config_err, FishcastError::Config { .. }));

        let api_err = FishcastError::api("connection failed");
        assert!(matches!(api_err, FishcastError::Api { .. }));

        let parse_err = FishcastError::parse("bad timestamp");
        assert!(matches!(parse_err, FishcastError::Parse { .. }));

        let validation_err = FishcastError::validation("invalid coordinates");
        assert!(matches!(validation_err, FishcastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = FishcastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = FishcastError::api("test");
        assert!(api_err.user_message().contains("Unable to reach"));

        let parse_err = FishcastError::parse("tide height");
        assert!(parse_err.user_message().contains("tide height"));

        let validation_err = FishcastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let fishcast_err: FishcastError = io_err.into();
        assert!(matches!(fishcast_err, FishcastError::Io { .. }));
    }
}
