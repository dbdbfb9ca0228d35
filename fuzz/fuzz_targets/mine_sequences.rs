#![no_main]

use libfuzzer_sys::fuzz_target;
use seqmine::config::MiningConfig;
use seqmine::database::{SequenceDatabase, SequenceInput};
use seqmine::mining::mine;

fuzz_target!(|input: (Vec<SequenceInput>, u8, u8)| {
    let (sequences, support, length) = input;
    let total = sequences.len();

    // Malformed input must be rejected, never panic
    let Ok(db) = SequenceDatabase::build(sequences) else {
        return;
    };

    let min_support = (support as f64 + 1.0) / 256.0;
    let max_length = 1 + (length % 4) as usize;
    let config = MiningConfig::new(min_support, max_length);

    if let Ok(report) = mine(&db, config) {
        for pattern in report.patterns() {
            assert!(pattern.len() <= max_length);
            assert!(pattern.support <= total);
            assert!(pattern.support_fraction >= min_support);
        }
    }
});
