//! Command-line interface definitions

use clap::{Args, Parser, Subcommand};
use sentiment_common::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentimentctl")]
#[command(about = "Batch sentiment analysis from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/sentiment/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze texts in a single model call
    Analyze(AnalyzeArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Texts to analyze, one per argument
    pub texts: Vec<String>,

    /// Read one text per line from a .txt or .csv file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Write results as csv, json or pdf (repeatable)
    #[arg(short, long = "export", value_name = "FORMAT", value_parser = parse_format)]
    pub exports: Vec<ExportFormat>,

    /// Directory for export files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the result list as JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse().map_err(|e: sentiment_common::ExportError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from([
            "sentimentctl",
            "analyze",
            "Great service!",
            "Terrible wait times.",
            "--export",
            "csv",
            "-e",
            "PDF",
            "--out-dir",
            "/tmp/out",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.texts.len(), 2);
        assert_eq!(args.exports, vec![ExportFormat::Csv, ExportFormat::Pdf]);
        assert_eq!(args.out_dir, PathBuf::from("/tmp/out"));
        assert!(!args.json);
    }

    #[test]
    fn test_unknown_export_format_rejected() {
        let result = Cli::try_parse_from(["sentimentctl", "analyze", "x", "--export", "xlsx"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["sentimentctl", "config", "--config", "/etc/s.toml"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/s.toml")));
    }
}
