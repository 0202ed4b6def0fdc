//! `WeatherLens` - AI-assisted weather likelihood analysis
//!
//! This library provides the core functionality for fetching point-in-time
//! weather observations, deriving descriptive statistics over the preceding
//! years, and producing a generated likelihood analysis for a location and
//! date.

pub mod api;
pub mod config;
pub mod error;
pub mod genai;
pub mod models;
pub mod stats;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::WeatherLensConfig;
pub use error::WeatherLensError;
pub use genai::{GeminiClient, TextGenerator, WeatherAnalyzer};
pub use models::{CompositeForecast, DailyObservation, MonthlyAverages, WeatherQuery};
pub use stats::{DescriptiveStatistics, Trend};
pub use weather::{FetchedDay, VisualCrossingClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
