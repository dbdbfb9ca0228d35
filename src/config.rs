// Configuration for a sequential pattern mining run
//
// The configuration is passed explicitly into every run. Nothing is cached
// between runs, so one database can be mined with many configurations.

use crate::error::{MiningError, Result};
use crate::mining::min_support_count;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a PrefixSpan mining run
///
/// # Example
/// ```
/// use seqmine::config::MiningConfig;
///
/// let config = MiningConfig::new(0.5, 3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.min_support_count(4), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum support fraction, must lie in (0, 1]
    ///
    /// A pattern is reported when the fraction of sequences containing it
    /// is at least this value.
    pub min_support: f64,

    /// Maximum pattern length (number of items), must be >= 1
    pub max_length: usize,

    /// Worker threads used to mine root branches
    ///
    /// 1 mines sequentially on the calling thread.
    pub threads: usize,

    /// Optional wall-clock budget in milliseconds
    ///
    /// Exceeding it aborts the run with `MiningError::TimedOut`.
    pub timeout_ms: Option<u64>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.01,
            max_length: 5,
            threads: 1,
            timeout_ms: None,
        }
    }
}

impl MiningConfig {
    /// Create a sequential configuration with the given threshold and length cap
    pub fn new(min_support: f64, max_length: usize) -> Self {
        Self {
            min_support,
            max_length,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().min(u64::MAX as u128) as u64);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration
    ///
    /// NaN thresholds fail the range check as well.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(MiningError::configuration(format!(
                "min_support must be in (0, 1], got {}",
                self.min_support
            )));
        }

        if self.max_length < 1 {
            return Err(MiningError::configuration(format!(
                "max_length must be >= 1, got {}",
                self.max_length
            )));
        }

        if self.threads < 1 {
            return Err(MiningError::configuration(format!(
                "threads must be >= 1, got {}",
                self.threads
            )));
        }

        Ok(())
    }

    /// Smallest support count whose fraction of `total_sequences` meets `min_support`
    pub fn min_support_count(&self, total_sequences: usize) -> usize {
        min_support_count(self.min_support, total_sequences)
    }

    /// Parse a configuration from TOML text
    ///
    /// Missing keys fall back to `MiningConfig::default()`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MiningError::ConfigParse(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
