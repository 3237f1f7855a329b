//! Sentiment Common - shared types and analysis core for the dashboard
//!
//! The daemon and the CLI both drive one batched call to an external
//! generative model through [`analysis::SentimentAnalyzer`], then render or
//! export the validated result list.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod gemini;
pub mod input;
pub mod llm_client;
pub mod prompts;
pub mod types;

pub use analysis::SentimentAnalyzer;
pub use config::{AppConfig, Credential};
pub use dashboard::{Dashboard, DashboardPhase, RequestTicket};
pub use error::{AnalysisError, ConfigError, ExportError, GenerationError, InputError};
pub use export::ExportFormat;
pub use input::InputArea;
pub use types::*;

/// Crate version, shared by both binaries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
