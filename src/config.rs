//! Environment-backed configuration for the `WeatherLens` service
//!
//! Loaded once at startup and never changed. Missing required API keys
//! abort startup so a misconfigured deployment fails before serving.

use std::env;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone)]
pub struct WeatherLensConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// API key for the generative-text provider (required)
    pub gemini_api_key: String,
    /// API key for the weather-data provider (required)
    pub visual_crossing_api_key: String,
    /// Allowed CORS origins; `*` allows any
    pub allowed_origins: Vec<String>,
    /// Deployment environment name
    pub environment: String,
}

impl WeatherLensConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a number, got '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let gemini_api_key =
            env::var("GEMINI_API_KEY").context("Missing GEMINI_API_KEY env var")?;
        let visual_crossing_api_key = env::var("VISUAL_CROSSING_API_KEY")
            .context("Missing VISUAL_CROSSING_API_KEY env var")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            port,
            gemini_api_key,
            visual_crossing_api_key,
            allowed_origins,
            environment,
        })
    }
}

/// Split a comma-separated origin list, dropping empty entries
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("https://a.example, https://b.example ,");
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_parse_origins_wildcard() {
        assert_eq!(parse_origins("*"), vec!["*"]);
    }

    #[test]
    fn test_parse_origins_empty_input() {
        assert!(parse_origins("").is_empty());
    }
}
