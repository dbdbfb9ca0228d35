use crate::catalog::Item;
use crate::config::MiningConfig;
use crate::database::SequenceDatabase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// A frequent sequential pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Item labels in pattern order
    pub items: Vec<String>,
    /// Number of distinct sequences containing the pattern
    pub support: usize,
    /// `support / total_sequences`
    pub support_fraction: f64,
}

impl Pattern {
    /// Pattern length (number of items)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Support as a percentage rounded to two decimals
    pub fn support_percent(&self) -> f64 {
        (self.support_fraction * 10_000.0).round() / 100.0
    }

    /// Human-readable form, e.g. `A → B → C`
    pub fn display(&self) -> String {
        self.items.join(" → ")
    }
}

/// Pattern statistics for one pattern length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthSummary {
    pub length: usize,
    pub pattern_count: usize,
    pub min_count: usize,
    pub max_count: usize,
    pub mean_count: f64,
}

/// Accumulates emitted patterns in emission order
///
/// No deduplication: every pattern has exactly one generating path of
/// prefix extensions, so it is emitted at most once.
#[derive(Debug)]
pub struct ResultCollector<'a> {
    db: &'a SequenceDatabase,
    patterns: Vec<Pattern>,
}

impl<'a> ResultCollector<'a> {
    pub fn new(db: &'a SequenceDatabase) -> Self {
        Self {
            db,
            patterns: Vec::new(),
        }
    }

    /// Record a pattern given as interned items
    pub fn emit(&mut self, items: &[Item], support: usize) {
        let total = self.db.len();
        let support_fraction = if total == 0 {
            0.0
        } else {
            support as f64 / total as f64
        };

        self.patterns.push(Pattern {
            items: self.db.resolve_all(items),
            support,
            support_fraction,
        });
    }

    /// Append patterns collected elsewhere (e.g. by a worker), keeping their order
    pub fn absorb(&mut self, patterns: Vec<Pattern>) {
        self.patterns.extend(patterns);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    /// Seal the collection into the final report
    pub fn into_report(self, config: &MiningConfig, elapsed: Duration) -> MiningReport {
        let total_sequences = self.db.len();
        MiningReport {
            patterns: self.patterns,
            total_sequences,
            min_support: config.min_support,
            min_support_count: config.min_support_count(total_sequences),
            max_length: config.max_length,
            elapsed,
        }
    }
}

/// Complete result of one mining run
///
/// `patterns()` is in discovery order: depth-first, so every extension of a
/// prefix follows that prefix before the next sibling branch starts.
#[derive(Debug, Clone)]
pub struct MiningReport {
    patterns: Vec<Pattern>,
    pub total_sequences: usize,
    pub min_support: f64,
    pub min_support_count: usize,
    pub max_length: usize,
    pub elapsed: Duration,
}

impl MiningReport {
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn into_patterns(self) -> Vec<Pattern> {
        self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Find a pattern by its labels
    pub fn get(&self, items: &[&str]) -> Option<&Pattern> {
        self.patterns
            .iter()
            .find(|p| p.items.iter().map(String::as_str).eq(items.iter().copied()))
    }

    /// Patterns by support descending, then length descending, then labels
    pub fn ranked(&self) -> Vec<&Pattern> {
        let mut ranked: Vec<&Pattern> = self.patterns.iter().collect();
        ranked.sort_by(|a, b| {
            b.support
                .cmp(&a.support)
                .then_with(|| b.len().cmp(&a.len()))
                .then_with(|| a.items.cmp(&b.items))
        });
        ranked
    }

    /// First `n` patterns of `ranked()`
    pub fn top(&self, n: usize) -> Vec<&Pattern> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    pub fn by_length(&self, length: usize) -> Vec<&Pattern> {
        self.patterns.iter().filter(|p| p.len() == length).collect()
    }

    pub fn counts_by_length(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for pattern in &self.patterns {
            *counts.entry(pattern.len()).or_insert(0) += 1;
        }
        counts
    }

    /// Per-length support statistics, shortest length first
    pub fn length_summary(&self) -> Vec<LengthSummary> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for pattern in &self.patterns {
            groups.entry(pattern.len()).or_default().push(pattern.support);
        }

        groups
            .into_iter()
            .map(|(length, supports)| {
                let total: usize = supports.iter().sum();
                LengthSummary {
                    length,
                    pattern_count: supports.len(),
                    min_count: supports.iter().copied().min().unwrap_or(0),
                    max_count: supports.iter().copied().max().unwrap_or(0),
                    mean_count: total as f64 / supports.len() as f64,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SequenceInput;

    fn pattern(items: &[&str], support: usize, total: usize) -> Pattern {
        Pattern {
            items: items.iter().map(|s| s.to_string()).collect(),
            support,
            support_fraction: support as f64 / total as f64,
        }
    }

    fn report(patterns: Vec<Pattern>) -> MiningReport {
        let db = SequenceDatabase::build(vec![
            SequenceInput::new("1", ["A"]),
            SequenceInput::new("2", ["A"]),
            SequenceInput::new("3", ["A"]),
            SequenceInput::new("4", ["A"]),
        ])
        .unwrap();
        let mut collector = ResultCollector::new(&db);
        collector.absorb(patterns);
        collector.into_report(&MiningConfig::new(0.25, 3), Duration::from_millis(3))
    }

    #[test]
    fn test_emit_resolves_labels_and_fraction() {
        let db = SequenceDatabase::build(vec![
            SequenceInput::new("1", ["x", "y"]),
            SequenceInput::new("2", ["y"]),
        ])
        .unwrap();
        let x = db.catalog().get("x").unwrap();
        let y = db.catalog().get("y").unwrap();

        let mut collector = ResultCollector::new(&db);
        collector.emit(&[x, y], 1);
        assert_eq!(collector.len(), 1);

        let patterns = collector.into_patterns();
        assert_eq!(patterns[0].items, vec!["x", "y"]);
        assert_eq!(patterns[0].support, 1);
        assert_eq!(patterns[0].support_fraction, 0.5);
        assert_eq!(patterns[0].len(), 2);
    }

    #[test]
    fn test_pattern_display_and_percent() {
        let p = pattern(&["A", "B", "C"], 1, 3);
        assert_eq!(p.display(), "A → B → C");
        assert_eq!(p.support_percent(), 33.33);
    }

    #[test]
    fn test_report_metadata() {
        let report = report(vec![pattern(&["A"], 4, 4)]);
        assert_eq!(report.total_sequences, 4);
        assert_eq!(report.min_support, 0.25);
        assert_eq!(report.min_support_count, 1);
        assert_eq!(report.max_length, 3);
        assert_eq!(report.elapsed, Duration::from_millis(3));
    }

    #[test]
    fn test_ranked_order() {
        let report = report(vec![
            pattern(&["B"], 2, 4),
            pattern(&["A", "B"], 2, 4),
            pattern(&["C"], 4, 4),
            pattern(&["A"], 2, 4),
        ]);
        let ranked: Vec<String> = report.ranked().iter().map(|p| p.display()).collect();
        assert_eq!(ranked, vec!["C", "A → B", "A", "B"]);

        let top: Vec<String> = report.top(2).iter().map(|p| p.display()).collect();
        assert_eq!(top, vec!["C", "A → B"]);
        assert_eq!(report.top(10).len(), 4);
    }

    #[test]
    fn test_length_queries() {
        let report = report(vec![
            pattern(&["A"], 3, 4),
            pattern(&["A", "B"], 2, 4),
            pattern(&["B"], 1, 4),
            pattern(&["A", "C"], 3, 4),
        ]);

        assert_eq!(report.by_length(2).len(), 2);
        assert!(report.by_length(3).is_empty());

        let counts = report.counts_by_length();
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&2));

        let summary = report.length_summary();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].length, 1);
        assert_eq!(summary[0].min_count, 1);
        assert_eq!(summary[0].max_count, 3);
        assert_eq!(summary[0].mean_count, 2.0);
        assert_eq!(summary[1].pattern_count, 2);
        assert_eq!(summary[1].mean_count, 2.5);
    }

    #[test]
    fn test_get_by_labels() {
        let report = report(vec![pattern(&["A", "B"], 2, 4)]);
        assert_eq!(report.get(&["A", "B"]).map(|p| p.support), Some(2));
        assert!(report.get(&["A"]).is_none());
        assert!(report.get(&["A", "B", "C"]).is_none());
    }
}
