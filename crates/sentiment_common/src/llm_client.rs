//! Generative client abstraction
//!
//! Provides a generic interface for calling a text-generation backend with a
//! JSON response format. Supports the real Gemini backend and a fake client
//! for testing.

use crate::error::GenerationError;
use async_trait::async_trait;
use std::sync::Mutex;

/// MIME type asking the model for JSON-only output
pub const JSON_MIME_TYPE: &str = "application/json";

/// One generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub response_mime_type: String,
    pub temperature: f64,
}

impl GenerationRequest {
    pub fn json(prompt: impl Into<String>, temperature: f64) -> Self {
        Self {
            prompt: prompt.into(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            temperature,
        }
    }
}

/// Generic text-generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one request and return the raw generated text
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// Fake generator for testing
pub struct FakeGenerator {
    responses: Mutex<Vec<Result<String, GenerationError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    /// Create a fake generator with pre-defined responses
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text
    pub fn always(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    /// Always fail with the same error
    pub fn always_error(error: GenerationError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Requests seen so far, oldest first
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn next_response(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }

        let mut responses = match self.responses.lock() {
            Ok(r) => r,
            Err(_) => return Err(GenerationError::EmptyResponse),
        };
        match responses.len() {
            0 => Err(GenerationError::EmptyResponse),
            // Keep returning the last response
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.next_response(request)
    }
}
