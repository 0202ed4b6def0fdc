//! Historical same-calendar-day aggregation across preceding years

use tracing::{debug, warn};

use crate::models::DailyObservation;
use crate::weather::WeatherProvider;

/// How many preceding years the historical set covers
pub const HISTORY_YEARS: i32 = 5;

/// Fetch the same month/day for the 5 preceding years, strictly one at a
/// time, in the order year−1 … year−5.
///
/// A failed year is logged and omitted; the result order must be preserved
/// because the trend slope direction depends on it. Only the target-day
/// fetch, outside this function, is fatal to a request.
pub async fn collect_history(
    provider: &dyn WeatherProvider,
    latitude: &str,
    longitude: &str,
    date: &str,
) -> Vec<DailyObservation> {
    let Some((year, month_day)) = split_provider_date(date) else {
        warn!(%date, "Cannot derive historical dates from target date");
        return Vec::new();
    };

    let mut history = Vec::new();
    for offset in 1..=HISTORY_YEARS {
        let past_date = format!("{}-{month_day}", year - offset);
        match provider.day_observation(latitude, longitude, &past_date).await {
            Ok(day) => {
                debug!(%past_date, "Historical observation fetched");
                history.push(day.observation);
            }
            Err(err) => {
                warn!(%past_date, error = %err, "Historical fetch failed, omitting year");
            }
        }
    }
    history
}

/// Split a `YYYY-MM-DD` string into its numeric year and `MM-DD` remainder.
/// Month/day stay textual so a Feb 29 target simply fails to resolve in
/// non-leap years and that year is omitted.
fn split_provider_date(date: &str) -> Option<(i32, &str)> {
    let (year, month_day) = date.split_once('-')?;
    Some((year.parse().ok()?, month_day))
}
