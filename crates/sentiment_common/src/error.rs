//! Error types for the sentiment dashboard.

use thiserror::Error;

/// Generic message when a failure carries no cause
pub const UNKNOWN_ANALYSIS_ERROR: &str = "An unknown error occurred during sentiment analysis.";

/// Startup configuration failures. Fatal: no analysis capability is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(String),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// Failures of the outbound generation call itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Model returned empty response")]
    EmptyResponse,
}

/// Failures of one batch analysis call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{0}")]
    Transport(#[from] GenerationError),

    #[error("{0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Single user-facing message for the error banner
    pub fn user_message(&self) -> String {
        let cause = self.to_string();
        if cause.trim().is_empty() {
            UNKNOWN_ANALYSIS_ERROR.to_string()
        } else {
            format!("Failed to analyze sentiment. Details: {}", cause)
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, AnalysisError::MalformedResponse(_))
    }
}

/// Input file rejections
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unsupported file type '{0}': expected .txt or .csv")]
    UnsupportedFile(String),

    #[error("File '{0}' is not valid UTF-8 text")]
    NotUtf8(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Export formatter failures
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unknown export format '{0}': expected csv, json or pdf")]
    UnknownFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
