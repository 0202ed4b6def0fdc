//! Weather-data provider integration and per-request forecast assembly
//!
//! The provider seam is a trait so the HTTP layer and tests can substitute
//! doubles; the production implementation is the Visual Crossing Timeline
//! client in [`visual_crossing`].

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::Result;
use crate::models::{CompositeForecast, DailyObservation, WeatherQuery};
use crate::stats;

pub mod history;
pub mod visual_crossing;

pub use visual_crossing::VisualCrossingClient;

/// A single day's provider result: the observation plus the address the
/// provider resolved the coordinates to.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedDay {
    pub resolved_address: String,
    pub observation: DailyObservation,
}

/// Point-in-time weather lookup against an external data provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the observation record for one day at the given coordinates.
    /// `date` is in the provider's `YYYY-MM-DD` form.
    async fn day_observation(
        &self,
        latitude: &str,
        longitude: &str,
        date: &str,
    ) -> Result<FetchedDay>;
}

/// Build the composite forecast for a validated query.
///
/// The target-day fetch is fatal; historical shortfalls are absorbed by the
/// aggregator and only degrade statistic quality.
pub async fn build_composite(
    provider: &dyn WeatherProvider,
    query: &WeatherQuery,
) -> Result<CompositeForecast> {
    let date = to_provider_date(&query.date);
    let is_future = is_future_date(&date, Utc::now().date_naive());

    info!(
        latitude = %query.latitude,
        longitude = %query.longitude,
        %date,
        is_future,
        "Fetching target-day observation"
    );
    let target = provider
        .day_observation(&query.latitude, &query.longitude, &date)
        .await?;

    let history =
        history::collect_history(provider, &query.latitude, &query.longitude, &date).await;
    debug!(years = history.len(), "Historical set assembled");

    let statistics = stats::analyze(&history);
    let monthly_averages = stats::monthly_averages(&history);

    let (current, forecast) = if is_future {
        (None, Some(target.observation))
    } else {
        (Some(target.observation), None)
    };

    Ok(CompositeForecast {
        location: query.format_coordinates(),
        resolved_address: target.resolved_address,
        date,
        is_future,
        current,
        forecast,
        history,
        monthly_averages,
        statistics,
    })
}

/// Reformat a `DD-MM-YYYY` query date into the provider's `YYYY-MM-DD` form.
///
/// Purely textual, mirroring the pattern-only validation upstream; a value
/// that is no real calendar date passes through and fails at the provider.
pub(crate) fn to_provider_date(date: &str) -> String {
    let mut parts: Vec<&str> = date.split('-').collect();
    parts.reverse();
    parts.join("-")
}

/// A date strictly after today is a forecast; today itself is current.
/// Unparseable dates fall back to current and are left to the provider.
fn is_future_date(provider_date: &str, today: NaiveDate) -> bool {
    NaiveDate::parse_from_str(provider_date, "%Y-%m-%d")
        .map(|date| date > today)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherLensError;
    use std::sync::Mutex;

    pub(crate) fn observation(date: &str, temp: f64, precip: f64) -> DailyObservation {
        DailyObservation {
            date: date.to_string(),
            temp,
            temp_min: temp - 2.0,
            temp_max: temp + 2.0,
            feels_like: temp,
            humidity: 65.0,
            precip,
            precip_prob: 20.0,
            snow: 0.0,
            snow_depth: 0.0,
            wind_speed: 11.0,
            wind_gust: 19.0,
            wind_dir: 200.0,
            pressure: 1014.0,
            cloud_cover: 30.0,
            visibility: 10.0,
            uv_index: 4.0,
            conditions: "Clear".to_string(),
        }
    }

    /// Provider double: records requested dates, fails the configured ones.
    pub(crate) struct ScriptedProvider {
        pub requested: Mutex<Vec<String>>,
        pub failing_dates: Vec<String>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(failing_dates: &[&str]) -> Self {
            Self {
                requested: Mutex::new(Vec::new()),
                failing_dates: failing_dates.iter().map(|d| (*d).to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for ScriptedProvider {
        async fn day_observation(
            &self,
            _latitude: &str,
            _longitude: &str,
            date: &str,
        ) -> Result<FetchedDay> {
            self.requested.lock().unwrap().push(date.to_string());
            if self.failing_dates.iter().any(|d| d == date) {
                return Err(WeatherLensError::upstream(format!(
                    "no data for {date}"
                )));
            }
            Ok(FetchedDay {
                resolved_address: "Testville".to_string(),
                observation: observation(date, 12.0, 0.5),
            })
        }
    }

    #[test]
    fn test_to_provider_date() {
        assert_eq!(to_provider_date("25-12-2026"), "2026-12-25");
        assert_eq!(to_provider_date("01-01-2020"), "2020-01-01");
    }

    #[test]
    fn test_is_future_date_boundary() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert!(!is_future_date("2026-08-07", today)); // same day is current
        assert!(is_future_date("2026-08-08", today));
        assert!(!is_future_date("2026-08-06", today));
        assert!(!is_future_date("2026-13-45", today)); // garbage falls back
    }

    #[tokio::test]
    async fn test_build_composite_places_past_day_under_current() {
        let provider = ScriptedProvider::new(&[]);
        let query = WeatherQuery::new("51.5", "-0.12", "25-12-2020");

        let composite = build_composite(&provider, &query).await.unwrap();
        assert!(!composite.is_future);
        assert!(composite.current.is_some());
        assert!(composite.forecast.is_none());
        assert_eq!(composite.date, "2020-12-25");
        assert_eq!(composite.resolved_address, "Testville");
        assert_eq!(composite.history.len(), 5);
    }

    #[tokio::test]
    async fn test_build_composite_places_far_future_day_under_forecast() {
        let provider = ScriptedProvider::new(&[]);
        let query = WeatherQuery::new("51.5", "-0.12", "25-12-2999");

        let composite = build_composite(&provider, &query).await.unwrap();
        assert!(composite.is_future);
        assert!(composite.current.is_none());
        assert!(composite.forecast.is_some());
    }

    #[tokio::test]
    async fn test_build_composite_fails_when_target_day_fails() {
        let provider = ScriptedProvider::new(&["2020-12-25"]);
        let query = WeatherQuery::new("51.5", "-0.12", "25-12-2020");

        let err = build_composite(&provider, &query).await.unwrap_err();
        assert!(matches!(err, WeatherLensError::Upstream { .. }));
    }

    #[tokio::test]
    async fn test_build_composite_tolerates_historical_gaps() {
        let provider = ScriptedProvider::new(&["2018-12-25", "2016-12-25"]);
        let query = WeatherQuery::new("51.5", "-0.12", "25-12-2020");

        let composite = build_composite(&provider, &query).await.unwrap();
        assert_eq!(composite.history.len(), 3);
        let years: Vec<&str> = composite
            .history
            .iter()
            .map(|o| o.date.as_str())
            .collect();
        assert_eq!(years, vec!["2019-12-25", "2017-12-25", "2015-12-25"]);
    }
}
