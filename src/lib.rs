//! seqmine - Sequential pattern mining with PrefixSpan
//!
//! This library finds every ordered item sequence that occurs, as a
//! subsequence, in at least a configurable fraction of an input database of
//! sequences. Items are interned once, sequences live in a flat immutable
//! arena, and the search grows patterns over pseudo-projections.
//!
//! ```
//! use seqmine::config::MiningConfig;
//! use seqmine::database::{SequenceDatabase, SequenceInput};
//! use seqmine::mining::mine;
//!
//! let db = SequenceDatabase::build(vec![
//!     SequenceInput::new("C1", ["A", "B", "C"]),
//!     SequenceInput::new("C2", ["A", "C"]),
//!     SequenceInput::new("C3", ["B", "C", "D"]),
//!     SequenceInput::new("C4", ["A", "B", "C"]),
//! ]).unwrap();
//!
//! let report = mine(&db, MiningConfig::new(0.5, 3)).unwrap();
//! assert_eq!(report.len(), 7);
//! assert_eq!(report.get(&["A", "B", "C"]).unwrap().support, 2);
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod database;
pub mod error;
pub mod json_output;
pub mod mining;

pub use error::{MiningError, Result};
