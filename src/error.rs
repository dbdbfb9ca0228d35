//! Error types for sequential pattern mining
//!
//! Every failure is surfaced synchronously from the call that started the
//! mining run. A failed run never publishes partial patterns.

use thiserror::Error;

/// Errors that can occur while building a database or mining it
#[derive(Error, Debug)]
pub enum MiningError {
    #[error("Invalid mining configuration: {0}")]
    Configuration(String),

    #[error("Mining run cancelled by caller")]
    Cancelled,

    #[error("Mining run timed out after {elapsed_ms}ms")]
    TimedOut { elapsed_ms: u128 },

    #[error("Mining worker thread panicked")]
    WorkerPanicked,

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MiningError {
    /// True when the run was aborted cooperatively (caller signal or timeout)
    pub fn is_cancellation(&self) -> bool {
        matches!(self, MiningError::Cancelled | MiningError::TimedOut { .. })
    }

    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        MiningError::Configuration(msg.into())
    }
}

/// Result type for mining operations
pub type Result<T> = std::result::Result<T, MiningError>;
