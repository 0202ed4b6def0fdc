//! Visual Crossing Timeline API client
//!
//! Single-day point lookups by coordinates. Missing fields in the provider
//! payload default to zero so the observation stays fully populated.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::Result;
use crate::error::WeatherLensError;
use crate::models::DailyObservation;
use crate::weather::{FetchedDay, WeatherProvider};

const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct VisualCrossingClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl VisualCrossingClient {
    /// Create a client against the production endpoint
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an explicit endpoint (tests, proxies)
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("weatherlens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeatherLensError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            api_key,
            base_url,
            http,
        })
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingClient {
    async fn day_observation(
        &self,
        latitude: &str,
        longitude: &str,
        date: &str,
    ) -> Result<FetchedDay> {
        let url = format!(
            "{}/{},{}/{}?unitGroup=metric&include=days&key={}&contentType=json",
            self.base_url,
            urlencoding::encode(latitude),
            urlencoding::encode(longitude),
            urlencoding::encode(date),
            self.api_key,
        );
        debug!(%date, "Requesting Visual Crossing timeline day");

        let response = self.http.get(&url).send().await.map_err(|e| {
            WeatherLensError::upstream(format!("Visual Crossing request failed: {e}"))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            WeatherLensError::upstream(format!("Failed to read Visual Crossing response: {e}"))
        })?;

        if !status.is_success() {
            return Err(WeatherLensError::upstream(format!(
                "Visual Crossing request failed with status {status}: {}",
                truncate_body(&body)
            )));
        }

        let parsed: TimelineResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherLensError::invalid_response(format!(
                "Failed to parse Visual Crossing response: {e}"
            ))
        })?;

        let day = parsed.days.into_iter().next().ok_or_else(|| {
            WeatherLensError::invalid_response(format!(
                "Visual Crossing returned no day data for {date}"
            ))
        })?;

        Ok(FetchedDay {
            resolved_address: parsed
                .resolved_address
                .unwrap_or_else(|| format!("{latitude},{longitude}")),
            observation: day.into_observation(date),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TimelineResponse {
    #[serde(rename = "resolvedAddress")]
    resolved_address: Option<String>,
    #[serde(default)]
    days: Vec<TimelineDay>,
}

/// One day from the timeline payload. Every measurement is optional on the
/// wire; `null` and absent both collapse to the same default.
#[derive(Debug, Default, Deserialize)]
struct TimelineDay {
    datetime: Option<String>,
    temp: Option<f64>,
    tempmin: Option<f64>,
    tempmax: Option<f64>,
    feelslike: Option<f64>,
    humidity: Option<f64>,
    precip: Option<f64>,
    precipprob: Option<f64>,
    snow: Option<f64>,
    snowdepth: Option<f64>,
    windspeed: Option<f64>,
    windgust: Option<f64>,
    winddir: Option<f64>,
    pressure: Option<f64>,
    cloudcover: Option<f64>,
    visibility: Option<f64>,
    uvindex: Option<f64>,
    conditions: Option<String>,
}

impl TimelineDay {
    fn into_observation(self, requested_date: &str) -> DailyObservation {
        DailyObservation {
            date: self.datetime.unwrap_or_else(|| requested_date.to_string()),
            temp: self.temp.unwrap_or(0.0),
            temp_min: self.tempmin.unwrap_or(0.0),
            temp_max: self.tempmax.unwrap_or(0.0),
            feels_like: self.feelslike.unwrap_or(0.0),
            humidity: self.humidity.unwrap_or(0.0),
            precip: self.precip.unwrap_or(0.0),
            precip_prob: self.precipprob.unwrap_or(0.0),
            snow: self.snow.unwrap_or(0.0),
            snow_depth: self.snowdepth.unwrap_or(0.0),
            wind_speed: self.windspeed.unwrap_or(0.0),
            wind_gust: self.windgust.unwrap_or(0.0),
            wind_dir: self.winddir.unwrap_or(0.0),
            pressure: self.pressure.unwrap_or(0.0),
            cloud_cover: self.cloudcover.unwrap_or(0.0),
            visibility: self.visibility.unwrap_or(0.0),
            uv_index: self.uvindex.unwrap_or(0.0),
            conditions: self.conditions.unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_day_conversion_defaults_missing_fields() {
        let json = r#"{
            "resolvedAddress": "London, England, United Kingdom",
            "days": [{
                "datetime": "2026-12-25",
                "temp": 4.5,
                "tempmax": 7.2,
                "humidity": 81.0,
                "precip": null,
                "conditions": "Overcast"
            }]
        }"#;

        let parsed: TimelineResponse = serde_json::from_str(json).unwrap();
        let day = parsed.days.into_iter().next().unwrap();
        let obs = day.into_observation("2026-12-25");

        assert_eq!(obs.date, "2026-12-25");
        assert_eq!(obs.temp, 4.5);
        assert_eq!(obs.temp_max, 7.2);
        assert_eq!(obs.temp_min, 0.0); // absent
        assert_eq!(obs.precip, 0.0); // null
        assert_eq!(obs.conditions, "Overcast");
    }

    #[test]
    fn test_missing_conditions_defaults_to_unknown() {
        let day = TimelineDay::default();
        let obs = day.into_observation("2026-01-01");
        assert_eq!(obs.conditions, "Unknown");
        assert_eq!(obs.date, "2026-01-01");
    }

    #[test]
    fn test_empty_days_payload_is_invalid_response() {
        let parsed: TimelineResponse =
            serde_json::from_str(r#"{"resolvedAddress": "Nowhere"}"#).unwrap();
        assert!(parsed.days.is_empty());
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
