//! Sentiment Dashboard Daemon
//!
//! Serves the browser dashboard and forwards each submitted batch to the
//! generative model in a single call.

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_common::gemini::GeminiClient;
use sentiment_common::{AppConfig, Credential, SentimentAnalyzer};
use sentimentd::server;
use sentimentd::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sentimentd")]
#[command(about = "Sentiment analysis dashboard server", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/sentiment/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address, overrides [server].bind
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!("Sentiment daemon v{} starting", sentiment_common::VERSION);

    let config = AppConfig::load(cli.config.as_deref())?;
    // Fail fast: no credential, no analysis capability at all
    let credential = Credential::from_env(&config.api.api_key_env)?;
    info!("Using model {} at {}", config.api.model, config.api.endpoint);

    let client = GeminiClient::new(config.api.clone(), credential)
        .context("Failed to initialize generative client")?;
    let analyzer = SentimentAnalyzer::new(Arc::new(client));
    let state = Arc::new(AppState::new(analyzer, config.server.max_upload_bytes));

    let bind = cli.bind.unwrap_or(config.server.bind);
    server::run(state, &bind).await
}
