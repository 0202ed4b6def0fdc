//! Composite forecast assembled per request from provider data

use serde::{Deserialize, Serialize};

use crate::models::DailyObservation;
use crate::stats::DescriptiveStatistics;

/// Per-variable arithmetic means across the historical set.
///
/// All fields are 0.0 when the historical set is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverages {
    pub temperature: f64,
    pub precipitation: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

/// Everything fetched and derived for one request.
///
/// Constructed fresh per request and discarded once the response is sent.
/// Exactly one of `current`/`forecast` is populated, decided by whether the
/// target date lies in the future at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeForecast {
    /// Coordinates as queried, `lat,lon`
    pub location: String,
    /// Provider-resolved address for the coordinates
    pub resolved_address: String,
    /// Target date in `YYYY-MM-DD` form
    pub date: String,
    /// Whether the target date is strictly after today
    pub is_future: bool,
    /// Observation for the target day when it is today or in the past
    pub current: Option<DailyObservation>,
    /// Observation for the target day when it is in the future
    pub forecast: Option<DailyObservation>,
    /// Same-calendar-day observations from up to 5 preceding years,
    /// ordered year−1 first; failed years are simply absent
    pub history: Vec<DailyObservation>,
    /// Arithmetic means over the historical set
    pub monthly_averages: MonthlyAverages,
    /// Descriptive statistics over the historical set
    pub statistics: DescriptiveStatistics,
}

impl CompositeForecast {
    /// The target day's observation, whichever side it landed on
    #[must_use]
    pub fn target_day(&self) -> Option<&DailyObservation> {
        self.current.as_ref().or(self.forecast.as_ref())
    }
}

/// The real-data block appended onto the generated analysis document.
///
/// Field names match what the frontend renders, hence the camelCase renames.
#[derive(Debug, Clone, Serialize)]
pub struct RealDataBlock {
    pub source: &'static str,
    pub location: String,
    #[serde(rename = "actualData")]
    pub actual_data: Option<DailyObservation>,
    #[serde(rename = "historicalAverages")]
    pub historical_averages: MonthlyAverages,
    pub statistics: DescriptiveStatistics,
}

impl From<&CompositeForecast> for RealDataBlock {
    fn from(composite: &CompositeForecast) -> Self {
        Self {
            source: "Visual Crossing Weather API",
            location: composite.resolved_address.clone(),
            actual_data: composite.target_day().cloned(),
            historical_averages: composite.monthly_averages.clone(),
            statistics: composite.statistics.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats;

    fn observation(date: &str, temp: f64) -> DailyObservation {
        DailyObservation {
            date: date.to_string(),
            temp,
            temp_min: temp - 3.0,
            temp_max: temp + 3.0,
            feels_like: temp,
            humidity: 70.0,
            precip: 0.0,
            precip_prob: 0.0,
            snow: 0.0,
            snow_depth: 0.0,
            wind_speed: 10.0,
            wind_gust: 18.0,
            wind_dir: 180.0,
            pressure: 1015.0,
            cloud_cover: 40.0,
            visibility: 10.0,
            uv_index: 3.0,
            conditions: "Partly cloudy".to_string(),
        }
    }

    fn composite_with_current() -> CompositeForecast {
        let history = vec![observation("2025-12-25", 6.0), observation("2024-12-25", 5.0)];
        CompositeForecast {
            location: "51.5074,-0.1278".to_string(),
            resolved_address: "London, England, United Kingdom".to_string(),
            date: "2026-12-25".to_string(),
            is_future: false,
            current: Some(observation("2026-12-25", 4.5)),
            forecast: None,
            monthly_averages: stats::monthly_averages(&history),
            statistics: stats::analyze(&history),
            history,
        }
    }

    #[test]
    fn test_target_day_prefers_current() {
        let composite = composite_with_current();
        assert_eq!(composite.target_day().unwrap().temp, 4.5);
    }

    #[test]
    fn test_real_data_block_round_trips_current_observation() {
        let composite = composite_with_current();
        let block = RealDataBlock::from(&composite);
        let value = serde_json::to_value(&block).unwrap();

        // actualData carries the current observation's fields unchanged
        assert_eq!(value["actualData"]["temp"], 4.5);
        assert_eq!(value["actualData"]["conditions"], "Partly cloudy");
        assert_eq!(value["source"], "Visual Crossing Weather API");
        assert_eq!(value["location"], "London, England, United Kingdom");
        assert!(value["historicalAverages"]["temperature"].is_number());
        assert!(value["statistics"]["temperature"]["mean"].is_number());
    }
}
