//! Generative-text integration and the analysis adapter
//!
//! The generator seam is a trait; the production implementation calls the
//! Gemini `generateContent` endpoint. The adapter races the call against a
//! deadline, strips code fences, parses and structurally checks the JSON,
//! then merges the fetched real-data block in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::Result;
use crate::error::WeatherLensError;
use crate::models::{CompositeForecast, RealDataBlock, WeatherQuery};

pub mod prompt;

/// Default deadline for one generative call
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(60);

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.0-flash";

/// Text generation against an external generative endpoint
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Submit a prompt and return the raw generated text
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a client against the production endpoint
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against an explicit endpoint (tests, proxies)
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self> {
        let http = Client::builder()
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
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{MODEL}:generateContent?key={}",
            self.base_url, self.api_key
        );

        let request = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "topP": 0.95,
                "topK": 40,
                "maxOutputTokens": 8192,
                "responseMimeType": "application/json"
            }
        });

        debug!(prompt_bytes = prompt.len(), "Submitting generation request");
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WeatherLensError::upstream(format!("Generation request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            WeatherLensError::upstream(format!("Failed to read generation response: {e}"))
        })?;

        if !status.is_success() {
            return Err(WeatherLensError::upstream(format!(
                "Generation request failed with status {status}: {}",
                truncate_body(&body)
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            WeatherLensError::invalid_response(format!(
                "Failed to parse generation response: {e}"
            ))
        })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                WeatherLensError::invalid_response("Generation response contained no candidates")
            })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

/// Turns a query plus optional fetched data into the final analysis document
pub struct WeatherAnalyzer {
    generator: Arc<dyn TextGenerator>,
    deadline: Duration,
}

impl WeatherAnalyzer {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, deadline: Duration) -> Self {
        Self {
            generator,
            deadline,
        }
    }

    /// Produce the analysis document for a validated query.
    ///
    /// The generative call is raced against the configured deadline; losing
    /// the race abandons the in-flight call without cancelling it.
    pub async fn analyze(
        &self,
        query: &WeatherQuery,
        composite: Option<&CompositeForecast>,
    ) -> Result<Value> {
        let prompt = prompt::build_prompt(query, composite);

        let raw = tokio::time::timeout(self.deadline, self.generator.generate(&prompt))
            .await
            .map_err(|_| WeatherLensError::timeout(self.deadline.as_secs()))??;

        let stripped = strip_code_fences(&raw);
        let mut document: Value = serde_json::from_str(stripped).map_err(|e| {
            WeatherLensError::invalid_response(format!(
                "Generated analysis is not valid JSON: {e}"
            ))
        })?;
        validate_structure(&document)?;

        if let Some(composite) = composite {
            let block = serde_json::to_value(RealDataBlock::from(composite)).map_err(|e| {
                WeatherLensError::invalid_response(format!(
                    "Failed to serialize real-data block: {e}"
                ))
            })?;
            document["visual_crossing_data"] = block;
        }

        info!("Analysis document assembled");
        Ok(document)
    }
}

/// Strip Markdown code-fence delimiters from generated text, if present
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

/// The generator is trusted beyond the two keys the frontend cannot live
/// without.
fn validate_structure(document: &Value) -> Result<()> {
    let has_score = document
        .get("overall_comfortability_score")
        .is_some_and(|v| !v.is_null());
    let has_activities = document.get("activities").is_some_and(|v| !v.is_null());

    if has_score && has_activities {
        Ok(())
    } else {
        Err(WeatherLensError::invalid_response(
            "Invalid response structure: missing overall_comfortability_score or activities",
        ))
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
