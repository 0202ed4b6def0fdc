//! Prompt assembly for the weather-likelihood analysis

use std::fmt::Write;

use crate::models::{CompositeForecast, WeatherQuery};

/// Build the instruction document for the generative endpoint.
///
/// Embeds the query parameters and, when available, the fetched real data so
/// the generator grounds its numbers instead of inventing them. The response
/// contract mirrors what the frontend renders.
#[must_use]
pub fn build_prompt(query: &WeatherQuery, composite: Option<&CompositeForecast>) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a weather analysis assistant. Produce a weather likelihood \
         analysis for latitude {}, longitude {} on {} (DD-MM-YYYY).",
        query.latitude, query.longitude, query.date
    );
    prompt.push('\n');

    if let Some(composite) = composite {
        let _ = writeln!(prompt, "Use this real weather data as ground truth:");
        let _ = writeln!(prompt, "Location: {}", composite.resolved_address);

        if let Some(day) = composite.target_day() {
            let label = if composite.is_future {
                "Forecast for the target date"
            } else {
                "Observed on the target date"
            };
            let _ = writeln!(
                prompt,
                "{label}: temperature {:.1}C (min {:.1}C, max {:.1}C, feels like {:.1}C), \
                 humidity {:.0}%, precipitation {:.1}mm ({:.0}% probability), snow {:.1}cm, \
                 wind {:.1} km/h gusting {:.1} km/h, pressure {:.1} hPa, cloud cover {:.0}%, \
                 visibility {:.1} km, UV index {:.1}, conditions: {}",
                day.temp,
                day.temp_min,
                day.temp_max,
                day.feels_like,
                day.humidity,
                day.precip,
                day.precip_prob,
                day.snow,
                day.wind_speed,
                day.wind_gust,
                day.pressure,
                day.cloud_cover,
                day.visibility,
                day.uv_index,
                day.conditions,
            );
        }

        let averages = &composite.monthly_averages;
        let _ = writeln!(
            prompt,
            "Historical averages for this calendar day over the last {} year(s): \
             temperature {:.2}C, precipitation {:.2}mm, humidity {:.2}%, wind {:.2} km/h",
            composite.history.len(),
            averages.temperature,
            averages.precipitation,
            averages.humidity,
            averages.wind_speed,
        );

        let stats = &composite.statistics;
        let _ = writeln!(
            prompt,
            "Historical statistics: temperature mean {:.2}C (min {:.2}C, max {:.2}C, \
             std dev {:.2}, trend {:?}); precipitation mean {:.2}mm (max {:.2}mm, \
             {:.2}% of years wet, trend {:?})",
            stats.temperature.mean,
            stats.temperature.min,
            stats.temperature.max,
            stats.temperature.std_dev,
            stats.temperature.trend,
            stats.precipitation.mean,
            stats.precipitation.max,
            stats.precipitation.probability,
            stats.precipitation.trend,
        );
        prompt.push('\n');
    }

    prompt.push_str(RESPONSE_CONTRACT);
    prompt
}

/// The fixed response schema the generator must fill. Every key is required;
/// unknown values must be `null`, `0`, or `[]` rather than omitted.
const RESPONSE_CONTRACT: &str = r#"Respond with a single JSON object and nothing else, following exactly this structure:
{
  "request_parameters": { "latitude": string, "longitude": string, "date": string },
  "overall_comfortability_score": { "score": number between 0 and 100, "summary": string },
  "activities": { "suggestions": string[], "warnings": string[], "reminders": string[] },
  "weather_conditions": {
    "general_conditions": {
      "is_very_hot_percentage": number 0-100,
      "is_very_cold_percentage": number 0-100,
      "is_very_windy_percentage": number 0-100,
      "is_very_wet_percentage": number 0-100
    },
    "specific_variables": {
      "temperature_celsius": number, "rainfall_mm": number, "windspeed_kph": number,
      "dust_concentration_ug_m3": number, "snowfall_cm": number, "snow_depth_cm": number,
      "cloud_cover_percent": number, "air_quality_index": number, "humidity_percent": number
    }
  },
  "statistical_analysis": {
    "threshold_probabilities": [ { "description": string, "percentage": number } ],
    "long_term_mean_comparison": [ { "variable": string, "mean_value": number, "deviation_from_mean": number } ],
    "trend_estimation": { "heavy_rain_trend": string, "high_temperature_trend": string }
  },
  "temperature_graph_data": { "description": string, "year_minus_5": number[4], "year_minus_4": number[4], "year_minus_3": number[4], "year_minus_2": number[4], "year_minus_1": number[4] },
  "rain_graph_data": { "description": string, "year_minus_5": number[4], "year_minus_4": number[4], "year_minus_3": number[4], "year_minus_2": number[4], "year_minus_1": number[4] },
  "snow_graph_data": { "description": string, "year_minus_5": number[4], "year_minus_4": number[4], "year_minus_3": number[4], "year_minus_2": number[4], "year_minus_1": number[4] }
}
Each number[4] holds quarterly values [Q1, Q2, Q3, Q4] for that year.
Use null, 0 or [] for unknown values; never omit a key."#;
