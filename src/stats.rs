//! Descriptive statistics over short historical observation series
//!
//! Pure functions: same input list, bit-identical output. Empty input
//! produces zeroed statistics and `Stable` trends rather than an error.

use serde::{Deserialize, Serialize};

use crate::models::{DailyObservation, MonthlyAverages};

/// Slope magnitude below which a series is considered flat
const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Three-way trend classification from a linear-regression slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

/// Temperature statistics over the historical set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    pub trend: Trend,
}

/// Precipitation statistics over the historical set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationStats {
    pub mean: f64,
    pub max: f64,
    /// Share of days with any precipitation, as a percentage
    pub probability: f64,
    pub trend: Trend,
}

/// Statistics recomputed on every request from the historical set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStatistics {
    pub temperature: TemperatureStats,
    pub precipitation: PrecipitationStats,
}

impl DescriptiveStatistics {
    /// Zeroed statistics for an empty historical set
    #[must_use]
    pub fn empty() -> Self {
        Self {
            temperature: TemperatureStats {
                mean: 0.0,
                min: 0.0,
                max: 0.0,
                std_dev: 0.0,
                trend: Trend::Stable,
            },
            precipitation: PrecipitationStats {
                mean: 0.0,
                max: 0.0,
                probability: 0.0,
                trend: Trend::Stable,
            },
        }
    }
}

/// Compute descriptive statistics over a historical set.
///
/// The slice order must be the order the set was assembled in (year−1
/// first); trend direction depends on it.
#[must_use]
pub fn analyze(history: &[DailyObservation]) -> DescriptiveStatistics {
    if history.is_empty() {
        return DescriptiveStatistics::empty();
    }

    let temps: Vec<f64> = history.iter().map(|o| o.temp).collect();
    let precips: Vec<f64> = history.iter().map(|o| o.precip).collect();
    let n = history.len() as f64;

    let temp_mean = temps.iter().sum::<f64>() / n;
    let temp_min = temps.iter().copied().fold(f64::INFINITY, f64::min);
    let temp_max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // population standard deviation: divide by N
    let temp_variance = temps.iter().map(|t| (t - temp_mean).powi(2)).sum::<f64>() / n;

    let precip_mean = precips.iter().sum::<f64>() / n;
    let precip_max = precips.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let wet_days = precips.iter().filter(|p| **p > 0.0).count() as f64;

    DescriptiveStatistics {
        temperature: TemperatureStats {
            mean: round2(temp_mean),
            min: round2(temp_min),
            max: round2(temp_max),
            std_dev: round2(temp_variance.sqrt()),
            trend: classify_trend(&temps),
        },
        precipitation: PrecipitationStats {
            mean: round2(precip_mean),
            max: round2(precip_max),
            probability: round2(wet_days / n * 100.0),
            trend: classify_trend(&precips),
        },
    }
}

/// Per-variable arithmetic means across the historical set, 0.0 when empty
#[must_use]
pub fn monthly_averages(history: &[DailyObservation]) -> MonthlyAverages {
    if history.is_empty() {
        return MonthlyAverages {
            temperature: 0.0,
            precipitation: 0.0,
            humidity: 0.0,
            wind_speed: 0.0,
        };
    }

    let n = history.len() as f64;
    MonthlyAverages {
        temperature: round2(history.iter().map(|o| o.temp).sum::<f64>() / n),
        precipitation: round2(history.iter().map(|o| o.precip).sum::<f64>() / n),
        humidity: round2(history.iter().map(|o| o.humidity).sum::<f64>() / n),
        wind_speed: round2(history.iter().map(|o| o.wind_speed).sum::<f64>() / n),
    }
}

/// Classify a series by its ordinary-least-squares slope against index.
///
/// The threshold compares the unrounded slope.
fn classify_trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }

    let slope = regression_slope(values);
    if slope > TREND_SLOPE_THRESHOLD {
        Trend::Increasing
    } else if slope < -TREND_SLOPE_THRESHOLD {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// OLS slope of value against index 0..N−1
fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum_x = (0..values.len()).map(|i| i as f64).sum::<f64>();
    let sum_y = values.iter().sum::<f64>();
    let sum_xy = values.iter().enumerate().map(|(i, y)| i as f64 * y).sum::<f64>();
    let sum_xx = (0..values.len()).map(|i| (i as f64).powi(2)).sum::<f64>();

    (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
