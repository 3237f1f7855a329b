//! Sentiment CLI
//!
//! Analyzes texts from arguments or a file in one model call, prints the
//! summary and cards, and optionally writes export files.

use anyhow::{Context, Result};
use clap::Parser;
use sentiment_common::gemini::GeminiClient;
use sentiment_common::{AppConfig, Credential, SentimentAnalyzer};
use sentimentctl::cli::{Cli, Commands};
use sentimentctl::commands;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let credential = Credential::from_env(&config.api.api_key_env)?;
            let client = GeminiClient::new(config.api, credential)
                .context("Failed to initialize generative client")?;
            let analyzer = SentimentAnalyzer::new(Arc::new(client));
            commands::execute_analyze(&analyzer, &args).await
        }
        Commands::Config => commands::execute_config(cli.config.as_deref()),
    }
}
