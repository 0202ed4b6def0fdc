//! HTTP surface: health probe plus the weather-analysis endpoint
//!
//! Stateless, one request at a time: validate the three query parameters in
//! order, build the composite forecast, hand it to the analyzer, and map
//! every failure to exactly one HTTP status.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::error::WeatherLensError;
use crate::genai::WeatherAnalyzer;
use crate::models::WeatherQuery;
use crate::weather::{self, WeatherProvider};

const EXAMPLE_CALL: &str = "/api/weather?latitude=51.5074&longitude=-0.1278&date=25-12-2026";

/// Shared handler dependencies, constructed once at startup
pub struct AppState {
    pub weather: Arc<dyn WeatherProvider>,
    pub analyzer: WeatherAnalyzer,
}

impl AppState {
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherProvider>, analyzer: WeatherAnalyzer) -> Self {
        Self { weather, analyzer }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather", get(weather_analysis))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "service": "weatherlens",
        "version": crate::VERSION,
    }))
}

/// Raw query parameters before validation
#[derive(Debug, Deserialize)]
struct RawWeatherQuery {
    latitude: Option<String>,
    longitude: Option<String>,
    date: Option<String>,
}

async fn weather_analysis(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawWeatherQuery>,
) -> Response {
    let query = match validate_query(raw) {
        Ok(query) => query,
        Err(response) => return response,
    };

    info!(
        latitude = %query.latitude,
        longitude = %query.longitude,
        date = %query.date,
        "Weather analysis requested"
    );

    let composite = match weather::build_composite(state.weather.as_ref(), &query).await {
        Ok(composite) => composite,
        Err(err) => return error_response(&err),
    };

    match state.analyzer.analyze(&query, Some(&composite)).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Apply the validation checks in order; the first failure short-circuits
fn validate_query(raw: RawWeatherQuery) -> Result<WeatherQuery, Response> {
    let (Some(latitude), Some(longitude), Some(date)) = (raw.latitude, raw.longitude, raw.date)
    else {
        return Err(validation_error(
            "Missing required parameters",
            "latitude, longitude and date query parameters are all required",
        ));
    };

    if !is_valid_date_format(&date) {
        return Err(validation_error(
            "Invalid date format",
            "date must be in DD-MM-YYYY format",
        ));
    }

    if !latitude
        .parse::<f64>()
        .is_ok_and(|lat| (-90.0..=90.0).contains(&lat))
    {
        return Err(validation_error(
            "Invalid latitude",
            "latitude must be a number between -90 and 90",
        ));
    }

    if !longitude
        .parse::<f64>()
        .is_ok_and(|lon| (-180.0..=180.0).contains(&lon))
    {
        return Err(validation_error(
            "Invalid longitude",
            "longitude must be a number between -180 and 180",
        ));
    }

    Ok(WeatherQuery {
        latitude,
        longitude,
        date,
    })
}

/// `DD-MM-YYYY`: exactly two digits, dash, two digits, dash, four digits.
/// Structural only; no calendar validation.
fn is_valid_date_format(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                2 | 5 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
}

fn validation_error(error: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": error,
            "message": message,
            "example": EXAMPLE_CALL,
        })),
    )
        .into_response()
}

fn error_response(err: &WeatherLensError) -> Response {
    let status = match err {
        WeatherLensError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!(status = %status, error = %err, "Request failed");

    (
        status,
        Json(json!({
            "error": err.category(),
            "message": err.user_message(),
            "details": err.to_string(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("25-12-2026", true)]
    #[case("01-01-2020", true)]
    #[case("99-99-9999", true)] // structurally valid, left to the provider
    #[case("2026-12-25", false)]
    #[case("25/12/2026", false)]
    #[case("5-12-2026", false)]
    #[case("25-12-26", false)]
    #[case("aa-bb-cccc", false)]
    #[case("", false)]
    fn test_date_format_validation(#[case] date: &str, #[case] expected: bool) {
        assert_eq!(is_valid_date_format(date), expected);
    }

    #[rstest]
    #[case(None, Some("-0.12"), Some("25-12-2026"))]
    #[case(Some("51.5"), None, Some("25-12-2026"))]
    #[case(Some("51.5"), Some("-0.12"), None)]
    fn test_missing_parameters_rejected(
        #[case] latitude: Option<&str>,
        #[case] longitude: Option<&str>,
        #[case] date: Option<&str>,
    ) {
        let raw = RawWeatherQuery {
            latitude: latitude.map(String::from),
            longitude: longitude.map(String::from),
            date: date.map(String::from),
        };
        assert!(validate_query(raw).is_err());
    }

    #[rstest]
    #[case("200", "-0.12")] // latitude out of range
    #[case("abc", "-0.12")] // latitude not a number
    #[case("51.5", "300")] // longitude out of range
    #[case("51.5", "east")] // longitude not a number
    fn test_out_of_range_coordinates_rejected(#[case] latitude: &str, #[case] longitude: &str) {
        let raw = RawWeatherQuery {
            latitude: Some(latitude.to_string()),
            longitude: Some(longitude.to_string()),
            date: Some("25-12-2026".to_string()),
        };
        assert!(validate_query(raw).is_err());
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let raw = RawWeatherQuery {
            latitude: Some("-90".to_string()),
            longitude: Some("180".to_string()),
            date: Some("25-12-2026".to_string()),
        };
        let query = validate_query(raw).unwrap();
        assert_eq!(query.latitude, "-90");
        assert_eq!(query.longitude, "180");
    }
}
