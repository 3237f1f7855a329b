//! Command implementations

use crate::cli::AnalyzeArgs;
use crate::output;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use sentiment_common::export::{export, to_json};
use sentiment_common::input::read_input_file;
use sentiment_common::{AnalysisResult, AppConfig, Credential, ExportFormat, SentimentAnalyzer};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Positional texts first, then lines from `--file`. Blank entries are
/// dropped.
pub fn collect_texts(args: &AnalyzeArgs) -> Result<Vec<String>> {
    let mut texts: Vec<String> = args
        .texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(path) = &args.file {
        let lines = read_input_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        info!("Read {} lines from {}", lines.len(), path.display());
        texts.extend(lines);
    }
    Ok(texts)
}

/// Write one file per format into `out_dir`
pub fn write_exports(
    results: &[AnalysisResult],
    formats: &[ExportFormat],
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    if formats.is_empty() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        let bytes = export(*format, results)?;
        let path = out_dir.join(format.file_name());
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} export to {}", format, path.display());
        written.push(path);
    }
    Ok(written)
}

fn spinner(enabled: bool, count: usize) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {} texts...", count));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Execute `sentimentctl analyze`
pub async fn execute_analyze(analyzer: &SentimentAnalyzer, args: &AnalyzeArgs) -> Result<()> {
    let texts = collect_texts(args)?;
    if texts.is_empty() {
        println!("Nothing to analyze.");
        return Ok(());
    }

    let interactive = io::stdout().is_terminal();
    let progress = spinner(interactive && !args.json, texts.len());
    let outcome = analyzer.analyze_batch(&texts).await;
    progress.finish_and_clear();

    let results = outcome.map_err(|e| anyhow::anyhow!(e.user_message()))?;

    if args.json {
        println!("{}", to_json(&results)?);
    } else {
        print!("{}", output::report(&results, interactive));
    }

    for path in write_exports(&results, &args.exports, &args.out_dir)? {
        if interactive {
            eprintln!("{} {}", "Exported".green(), path.display());
        } else {
            eprintln!("Exported {}", path.display());
        }
    }
    Ok(())
}

/// Effective configuration with the credential redacted
pub fn config_report(
    config: &AppConfig,
    path: Option<&Path>,
    credential: Option<&Credential>,
) -> String {
    let mut lines = vec![
        "Sentiment Configuration".to_string(),
        "=======================".to_string(),
        String::new(),
        "[api]".to_string(),
        format!("  endpoint     = {}", config.api.endpoint),
        format!("  model        = {}", config.api.model),
        format!("  timeout_secs = {}", config.api.timeout_secs),
        format!("  api_key_env  = {}", config.api.api_key_env),
        format!(
            "  api_key      = {}",
            credential.map(Credential::redacted).unwrap_or_else(|| "(not set)".to_string())
        ),
        String::new(),
        "[server]".to_string(),
        format!("  bind             = {}", config.server.bind),
        format!("  max_upload_bytes = {}", config.server.max_upload_bytes),
        String::new(),
    ];

    match path {
        Some(p) if p.exists() => lines.push(format!("Config file: {}", p.display())),
        Some(p) => lines.push(format!("Config file: {} (not found, using defaults)", p.display())),
        None => lines.push("Config file: none (using defaults)".to_string()),
    }
    lines.join("\n")
}

/// Execute `sentimentctl config`
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    let credential = Credential::from_env(&config.api.api_key_env).ok();
    let path = config_path.map(Path::to_path_buf).or_else(AppConfig::default_path);
    println!("{}", config_report(&config, path.as_deref(), credential.as_ref()));
    Ok(())
}
