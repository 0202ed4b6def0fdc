//! Server bootstrap: CORS, hard request timeout, bind and serve

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::config::WeatherLensConfig;
use crate::genai::{self, GeminiClient, WeatherAnalyzer};
use crate::weather::VisualCrossingClient;

/// Hard timeout for the full request/response cycle, independent of the
/// analyzer's own deadline
const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

pub async fn run(config: WeatherLensConfig) -> Result<()> {
    let weather = VisualCrossingClient::new(config.visual_crossing_api_key.clone())
        .context("Failed to create weather-data client")?;
    let generator =
        GeminiClient::new(config.gemini_api_key.clone()).context("Failed to create generator")?;
    let state = Arc::new(AppState::new(
        Arc::new(weather),
        WeatherAnalyzer::new(Arc::new(generator), genai::ANALYSIS_TIMEOUT),
    ));

    let app = Router::new()
        .nest("/api", api::router(state))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors_layer(&config.allowed_origins)?);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(cors.allow_origin(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_wildcard() {
        assert!(cors_layer(&["*".to_string()]).is_ok());
    }

    #[test]
    fn test_cors_layer_accepts_origin_list() {
        let origins = vec![
            "https://app.example".to_string(),
            "http://localhost:5173".to_string(),
        ];
        assert!(cors_layer(&origins).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_unparseable_origin() {
        assert!(cors_layer(&["not an origin\u{7f}".to_string()]).is_err());
    }
}
