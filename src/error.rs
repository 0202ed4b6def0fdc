//! Error types and handling for the `WeatherLens` service

use thiserror::Error;

/// Main error type for the `WeatherLens` service
#[derive(Error, Debug)]
pub enum WeatherLensError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Client input malformed or out of range
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Upstream provider unreachable, rejected credentials, or returned a
    /// failure status
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Upstream response could not be parsed or failed structural checks
    #[error("Invalid upstream response: {message}")]
    InvalidResponse { message: String },

    /// The generative call lost the race against its deadline
    #[error("Analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl WeatherLensError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new invalid-response error
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new timeout error
    #[must_use]
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    /// Machine-readable error category for response bodies
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            WeatherLensError::Config { .. } => "configuration_error",
            WeatherLensError::Validation { .. } => "validation_error",
            WeatherLensError::Upstream { .. } => "upstream_error",
            WeatherLensError::InvalidResponse { .. } => "invalid_upstream_response",
            WeatherLensError::Timeout { .. } => "timeout",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherLensError::Config { .. } => {
                "Configuration error. Please check the service environment.".to_string()
            }
            WeatherLensError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherLensError::Upstream { .. } => {
                "Unable to reach an external weather service. Please try again later.".to_string()
            }
            WeatherLensError::InvalidResponse { .. } => {
                "An external service returned an unusable response.".to_string()
            }
            WeatherLensError::Timeout { .. } => {
                "The analysis took too long to generate. Try a narrower location or date query."
                    .to_string()
            }
        }
    }
}
