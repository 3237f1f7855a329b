//! Gemini `generateContent` backend.

use crate::config::{ApiConfig, Credential};
use crate::error::{ConfigError, GenerationError};
use crate::llm_client::{GenerationRequest, TextGenerator};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Real generator talking to the Gemini REST API
pub struct GeminiClient {
    config: ApiConfig,
    credential: Credential,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: ApiConfig, credential: Credential) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            config,
            credential,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let url = self.url();
        debug!("POST {} ({} prompt bytes)", url, request.prompt.len());

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.credential.expose())
            .json(&request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.config.timeout_secs)
                } else {
                    GenerationError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            if status.is_success() {
                GenerationError::Http(format!("Failed to read response: {}", e))
            } else {
                GenerationError::Status {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("error").to_string(),
                }
            }
        })?;

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message: api_error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string()),
            });
        }

        extract_text(&body).ok_or(GenerationError::EmptyResponse)
    }
}

/// JSON body for `generateContent`
pub fn request_body(request: &GenerationRequest) -> Value {
    json!({
        "contents": [
            {"role": "user", "parts": [{"text": request.prompt}]}
        ],
        "generationConfig": {
            "responseMimeType": request.response_mime_type,
            "temperature": request.temperature,
        },
    })
}

/// Concatenated text parts of the first candidate
pub fn extract_text(body: &Value) -> Option<String> {
    let parts = body
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn api_error_message(body: &Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
