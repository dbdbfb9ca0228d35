use anyhow::{Context, Result};
use clap::Parser;
use seqmine::cli::{Cli, OutputFormat};
use seqmine::config::MiningConfig;
use seqmine::csv_output::CsvOutput;
use seqmine::database::{SequenceDatabase, SequenceInput};
use seqmine::json_output::JsonReport;
use seqmine::mining::{MiningReport, PatternMiner};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_sequences(path: &Path) -> Result<Vec<SequenceInput>> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read sequences from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&text)
        .with_context(|| format!("Invalid sequence JSON in {}", path.display()))
}

/// Print ranked patterns as a text table
fn print_text_report(report: &MiningReport, top: Option<usize>) {
    let ranked = match top {
        Some(n) => report.top(n),
        None => report.ranked(),
    };

    println!("=== Sequential Patterns ===");
    println!(
        "Sequences: {}  Min support: {} ({} sequences)  Max length: {}",
        report.total_sequences, report.min_support, report.min_support_count, report.max_length
    );
    println!(
        "Patterns: {}  Time: {:.2}ms",
        report.len(),
        report.elapsed.as_secs_f64() * 1000.0
    );
    println!("─────────────────────────────────────────");
    for pattern in ranked {
        println!(
            "{:>8} {:>7.2}%  {}",
            pattern.support,
            pattern.support_percent(),
            pattern.display()
        );
    }

    if !report.is_empty() {
        println!("─────────────────────────────────────────");
        println!("By length:");
        for summary in report.length_summary() {
            println!(
                "  {:>2}: {} patterns, support {}..{} (mean {:.1})",
                summary.length,
                summary.pattern_count,
                summary.min_count,
                summary.max_count,
                summary.mean_count
            );
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let base = match &args.config {
        Some(path) => MiningConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MiningConfig::default(),
    };
    let config = args.apply_overrides(base);
    config.validate().context("Invalid mining parameters")?;

    let sequences = read_sequences(&args.input)?;
    let db = SequenceDatabase::build(sequences).context("Invalid sequence input")?;

    let report = match PatternMiner::new(&db, config)?.mine() {
        Ok(report) => report,
        Err(e) if e.is_cancellation() => {
            anyhow::bail!(
                "Mining aborted: {}. Try a higher --min-support or a lower --max-length",
                e
            );
        }
        Err(e) => return Err(e.into()),
    };

    match args.format {
        OutputFormat::Text => print_text_report(&report, args.top),
        OutputFormat::Json => {
            let json = JsonReport::from_report(&report, args.top).to_json_pretty()?;
            println!("{}", json);
        }
        OutputFormat::Csv => {
            let ranked = match args.top {
                Some(n) => report.top(n),
                None => report.ranked(),
            };
            let mut csv = CsvOutput::new();
            for pattern in ranked {
                csv.add_pattern(pattern);
            }
            print!("{}", csv.to_csv());
        }
    }

    Ok(())
}
