//! Daily observation model sourced from the weather-data provider

use serde::{Deserialize, Serialize};

/// One calendar day's weather record for a location.
///
/// Sourced from the external weather-data provider and never mutated after
/// construction. Missing provider fields default to zero so downstream
/// arithmetic stays total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    /// Observation date in `YYYY-MM-DD` form
    pub date: String,
    /// Temperature in Celsius
    pub temp: f64,
    /// Daily minimum temperature in Celsius
    pub temp_min: f64,
    /// Daily maximum temperature in Celsius
    pub temp_max: f64,
    /// Apparent temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Precipitation amount in mm
    pub precip: f64,
    /// Precipitation probability percentage
    pub precip_prob: f64,
    /// Snowfall in cm
    pub snow: f64,
    /// Snow depth in cm
    pub snow_depth: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Wind gust speed in km/h
    pub wind_gust: f64,
    /// Wind direction in degrees
    pub wind_dir: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Cloud cover percentage
    pub cloud_cover: f64,
    /// Visibility in km
    pub visibility: f64,
    /// UV index
    pub uv_index: f64,
    /// Human-readable condition text
    pub conditions: String,
}

/// The three validated query parameters, kept as received.
///
/// The date is in `DD-MM-YYYY` textual form and reformatted to the
/// provider's `YYYY-MM-DD` form at the orchestration boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub latitude: String,
    pub longitude: String,
    pub date: String,
}

impl WeatherQuery {
    #[must_use]
    pub fn new(
        latitude: impl Into<String>,
        longitude: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
            date: date.into(),
        }
    }

    /// Format the query coordinates as a `lat,lon` pair
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let query = WeatherQuery::new("51.5074", "-0.1278", "25-12-2026");
        assert_eq!(query.format_coordinates(), "51.5074,-0.1278");
    }

    #[test]
    fn test_observation_serializes_with_snake_case_keys() {
        let obs = DailyObservation {
            date: "2026-12-25".to_string(),
            temp: 4.5,
            temp_min: 1.0,
            temp_max: 7.2,
            feels_like: 2.1,
            humidity: 81.0,
            precip: 0.4,
            precip_prob: 30.0,
            snow: 0.0,
            snow_depth: 0.0,
            wind_speed: 14.0,
            wind_gust: 28.0,
            wind_dir: 220.0,
            pressure: 1013.0,
            cloud_cover: 75.0,
            visibility: 10.0,
            uv_index: 1.0,
            conditions: "Overcast".to_string(),
        };

        let value = serde_json::to_value(&obs).unwrap();
        assert_eq!(value["temp"], 4.5);
        assert_eq!(value["feels_like"], 2.1);
        assert_eq!(value["conditions"], "Overcast");
    }
}
