//! Gemini Provider - implementation of TextGenerator for Google's
//! Generative Language API.
//!
//! Calls the non-streaming `generateContent` endpoint with a JSON response
//! MIME type. Transport failures map onto [`GenerationError`]; a 200
//! response whose envelope carries no usable candidate text yields an
//! empty string, which downstream parsing turns into the rule-based
//! fallback batch.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::config::AiConfig;
use crate::ports::{GenerationError, TextGenerator};

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication; absent keys fail per request with
    /// [`GenerationError::MissingCredentials`].
    api_key: Option<Secret<String>>,
    /// Model to use (e.g. "gemini-1.5-flash").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.map(Secret::new),
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Builds the configuration from the application config section.
    pub fn from_app_config(config: &AiConfig) -> Self {
        Self::new(config.google_api_key().map(str::to_string))
            .with_model(config.model.clone())
            .with_timeout(config.timeout())
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.is_empty())
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL.
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Maps non-success statuses onto the transport error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GenerationError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = parse_retry_after(&response);
        let error_body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GenerationError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(GenerationError::rate_limited(retry_after)),
            StatusCode::BAD_REQUEST => Err(GenerationError::InvalidRequest(error_body)),
            s if s.is_server_error() => Err(GenerationError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerationError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

/// Reads the Retry-After header, defaulting to 30 seconds.
fn parse_retry_after(response: &Response) -> u32 {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(30)
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .config
            .api_key()
            .ok_or(GenerationError::MissingCredentials)?;

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("Connection failed: {}", e))
                } else {
                    GenerationError::network(e.to_string())
                }
            })?;

        let response = self.handle_response_status(response).await?;

        // A well-formed failure envelope or a bodyless 200 is not a
        // transport problem: empty text falls through to the rule-based
        // batch downstream.
        let envelope: GeminiResponse = response.json().await.unwrap_or_default();
        let text = envelope.first_candidate_text();
        if text.is_empty() {
            warn!("generation response carried no candidate text");
        }

        Ok(text)
    }
}

// ════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate, or empty.
    fn first_candidate_text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_url_includes_model() {
        let provider = GeminiProvider::new(
            GeminiConfig::new(Some("key".to_string())).with_model("gemini-1.5-flash"),
        );
        assert_eq!(
            provider.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let provider = GeminiProvider::new(GeminiConfig::new(None));
        let result = provider.generate("prompt").await;
        assert!(matches!(result, Err(GenerationError::MissingCredentials)));
    }

    #[tokio::test]
    async fn empty_key_fails_before_any_request() {
        let provider = GeminiProvider::new(GeminiConfig::new(Some(String::new())));
        let result = provider.generate("prompt").await;
        assert!(matches!(result, Err(GenerationError::MissingCredentials)));
    }

    #[test]
    fn request_serializes_with_camel_case_wire_names() {
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn envelope_extracts_first_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\""}, {"text": ": 1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        let envelope: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.first_candidate_text(), "{\"a\": 1}");
    }

    #[test]
    fn empty_envelope_yields_empty_text() {
        let envelope: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(envelope.first_candidate_text(), "");
    }
}
