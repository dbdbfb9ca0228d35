//! CLI argument parsing for seqmine

use crate::config::MiningConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for mined patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "seqmine")]
#[command(version)]
#[command(about = "Mine frequent sequential patterns with PrefixSpan", long_about = None)]
pub struct Cli {
    /// JSON file with an array of {"id": ..., "items": [...]} sequences ("-" for stdin)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Minimum support fraction in (0, 1]
    #[arg(short = 's', long = "min-support", value_name = "FRACTION")]
    pub min_support: Option<f64>,

    /// Maximum pattern length
    #[arg(short = 'l', long = "max-length", value_name = "N")]
    pub max_length: Option<usize>,

    /// Worker threads for parallel branch mining
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Abort the run after this many milliseconds
    #[arg(long = "timeout-ms", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// TOML mining configuration; flags override its values
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print the N highest-support patterns
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a base configuration
    pub fn apply_overrides(&self, mut config: MiningConfig) -> MiningConfig {
        if let Some(min_support) = self.min_support {
            config.min_support = min_support;
        }
        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_input() {
        let cli = Cli::parse_from(["seqmine", "sequences.json"]);
        assert_eq!(cli.input, PathBuf::from("sequences.json"));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.debug);
        assert!(cli.top.is_none());
    }

    #[test]
    fn test_cli_mining_flags() {
        let cli = Cli::parse_from([
            "seqmine",
            "-s",
            "0.25",
            "--max-length",
            "4",
            "-j",
            "8",
            "--timeout-ms",
            "500",
            "--format",
            "json",
            "in.json",
        ]);
        assert_eq!(cli.min_support, Some(0.25));
        assert_eq!(cli.max_length, Some(4));
        assert_eq!(cli.threads, Some(8));
        assert_eq!(cli.timeout_ms, Some(500));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["seqmine"]).is_err());
    }

    #[test]
    fn test_overrides_keep_unset_values() {
        let cli = Cli::parse_from(["seqmine", "--max-length", "2", "in.json"]);
        let base = MiningConfig::new(0.3, 6).with_threads(4);
        let config = cli.apply_overrides(base);
        assert_eq!(config.min_support, 0.3);
        assert_eq!(config.max_length, 2);
        assert_eq!(config.threads, 4);
        assert!(config.timeout_ms.is_none());
    }
}
