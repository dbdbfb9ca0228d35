//! JSON output format for mining reports

use crate::mining::{LengthSummary, MiningReport, Pattern};
use serde::{Deserialize, Serialize};

/// A single mined pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPattern {
    /// Item labels in pattern order
    pub sequence: Vec<String>,
    /// Number of sequences containing the pattern
    pub support: usize,
    /// Support fraction (0 to 1)
    pub support_fraction: f64,
    /// Support percentage rounded to two decimals
    pub support_percent: f64,
    pub length: usize,
}

impl From<&Pattern> for JsonPattern {
    fn from(pattern: &Pattern) -> Self {
        Self {
            sequence: pattern.items.clone(),
            support: pattern.support,
            support_fraction: pattern.support_fraction,
            support_percent: pattern.support_percent(),
            length: pattern.len(),
        }
    }
}

/// Summary of the mining run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total_sequences: usize,
    /// Patterns found by the run (before any `--top` cut)
    pub total_patterns: usize,
    pub min_support: f64,
    /// Smallest support count that met `min_support`
    pub min_support_count: usize,
    pub max_length: usize,
    pub execution_time_ms: f64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub summary: JsonSummary,
    /// Patterns ranked by support, then length
    pub patterns: Vec<JsonPattern>,
    pub length_summary: Vec<LengthSummary>,
}

impl JsonReport {
    /// Build the JSON view of a report, optionally keeping only the top `limit` patterns
    pub fn from_report(report: &MiningReport, limit: Option<usize>) -> Self {
        let ranked = match limit {
            Some(n) => report.top(n),
            None => report.ranked(),
        };

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "seqmine-json-v1".to_string(),
            summary: JsonSummary {
                total_sequences: report.total_sequences,
                total_patterns: report.len(),
                min_support: report.min_support,
                min_support_count: report.min_support_count,
                max_length: report.max_length,
                execution_time_ms: report.elapsed.as_secs_f64() * 1000.0,
            },
            patterns: ranked.into_iter().map(JsonPattern::from).collect(),
            length_summary: report.length_summary(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
