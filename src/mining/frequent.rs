use crate::catalog::Item;
use crate::database::SequenceDatabase;
use crate::mining::projection::ProjectedDatabase;

/// Smallest support count whose fraction of `total_sequences` meets `min_support`
///
/// Compared against the fraction itself so float rounding in
/// `min_support * total` (0.3 * 10 is 3.0000000000000004) never moves the
/// cutoff. Always at least 1.
pub fn min_support_count(min_support: f64, total_sequences: usize) -> usize {
    if total_sequences == 0 {
        return 1;
    }

    let n = total_sequences as f64;
    let mut count = (min_support * n).ceil().max(1.0) as usize;
    while count > 1 && (count - 1) as f64 / n >= min_support {
        count -= 1;
    }
    while count <= total_sequences && (count as f64 / n) < min_support {
        count += 1;
    }
    count.max(1)
}

/// Frequent single items of the whole database
///
/// Support is the number of sequences containing the item at least once.
/// Ordered by support descending, ties by label ascending.
///
/// # Example
/// ```
/// use seqmine::database::{SequenceDatabase, SequenceInput};
/// use seqmine::mining::find_frequent_items;
///
/// let db = SequenceDatabase::build(vec![
///     SequenceInput::new("a", ["x", "y", "x"]),
///     SequenceInput::new("b", ["y"]),
/// ]).unwrap();
///
/// let frequent = find_frequent_items(&db, 0.5);
/// let labels: Vec<&str> = frequent.iter().map(|(item, _)| db.resolve(*item)).collect();
/// assert_eq!(labels, vec!["y", "x"]);
/// assert_eq!(frequent[0].1, 2);
/// ```
pub fn find_frequent_items(db: &SequenceDatabase, min_support: f64) -> Vec<(Item, usize)> {
    let min_count = min_support_count(min_support, db.len());
    let root = ProjectedDatabase::root(db);
    SupportCounter::new(db.distinct_items()).frequent(db, &root, min_count)
}

/// Reusable per-item support counter scoped to a projection
///
/// Counts each item once per projected suffix using a stamp array, so the
/// inner loop touches no hash maps. Buffers are reused across calls; one
/// counter per worker.
#[derive(Debug)]
pub struct SupportCounter {
    seen: Vec<u32>,
    counts: Vec<u32>,
    touched: Vec<Item>,
    stamp: u32,
}

impl SupportCounter {
    pub fn new(distinct_items: usize) -> Self {
        Self {
            seen: vec![0; distinct_items],
            counts: vec![0; distinct_items],
            touched: Vec::new(),
            stamp: 0,
        }
    }

    /// Support of every item occurring in the projection, unordered
    pub fn count(&mut self, db: &SequenceDatabase, projection: &ProjectedDatabase) -> Vec<(Item, usize)> {
        self.accumulate(db, projection);
        let result = self
            .touched
            .iter()
            .map(|item| (*item, self.counts[item.index()] as usize))
            .collect();
        self.reset();
        result
    }

    /// Items with support >= `min_count`, support descending then label ascending
    pub fn frequent(
        &mut self,
        db: &SequenceDatabase,
        projection: &ProjectedDatabase,
        min_count: usize,
    ) -> Vec<(Item, usize)> {
        self.accumulate(db, projection);
        let mut result: Vec<(Item, usize)> = self
            .touched
            .iter()
            .map(|item| (*item, self.counts[item.index()] as usize))
            .filter(|(_, count)| *count >= min_count)
            .collect();
        self.reset();

        order_by_support(db, &mut result);
        result
    }

    fn accumulate(&mut self, db: &SequenceDatabase, projection: &ProjectedDatabase) {
        for suffix in projection.suffixes(db) {
            self.next_stamp();
            for item in suffix {
                let idx = item.index();
                if self.seen[idx] != self.stamp {
                    self.seen[idx] = self.stamp;
                    if self.counts[idx] == 0 {
                        self.touched.push(*item);
                    }
                    self.counts[idx] += 1;
                }
            }
        }
    }

    fn next_stamp(&mut self) {
        if self.stamp == u32::MAX {
            self.seen.fill(0);
            self.stamp = 0;
        }
        self.stamp += 1;
    }

    fn reset(&mut self) {
        for item in self.touched.drain(..) {
            self.counts[item.index()] = 0;
        }
    }
}

/// Deterministic candidate order: support descending, label ascending
pub fn order_by_support(db: &SequenceDatabase, items: &mut [(Item, usize)]) {
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| db.compare_labels(a.0, b.0)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SequenceInput;

    fn scenario() -> SequenceDatabase {
        SequenceDatabase::build(vec![
            SequenceInput::new("C1", ["A", "B", "C"]),
            SequenceInput::new("C2", ["A", "C"]),
            SequenceInput::new("C3", ["B", "C", "D"]),
            SequenceInput::new("C4", ["A", "B", "C"]),
        ])
        .unwrap()
    }

    fn labelled(db: &SequenceDatabase, items: &[(Item, usize)]) -> Vec<(String, usize)> {
        items
            .iter()
            .map(|(item, count)| (db.resolve(*item).to_string(), *count))
            .collect()
    }

    #[test]
    fn test_find_frequent_items_scenario() {
        let db = scenario();
        let frequent = find_frequent_items(&db, 0.5);
        assert_eq!(
            labelled(&db, &frequent),
            vec![
                ("C".to_string(), 4),
                ("A".to_string(), 3),
                ("B".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_repeated_items_count_once_per_sequence() {
        let db = SequenceDatabase::build(vec![
            SequenceInput::new("s1", ["A", "A", "A"]),
            SequenceInput::new("s2", ["B"]),
        ])
        .unwrap();
        let frequent = find_frequent_items(&db, 0.1);
        assert_eq!(
            labelled(&db, &frequent),
            vec![("A".to_string(), 1), ("B".to_string(), 1)]
        );
    }

    #[test]
    fn test_ties_broken_by_label_not_intern_order() {
        let db = SequenceDatabase::build(vec![SequenceInput::new("s", ["q", "b", "m"])]).unwrap();
        let frequent = find_frequent_items(&db, 1.0);
        let labels: Vec<&str> = frequent.iter().map(|(i, _)| db.resolve(*i)).collect();
        assert_eq!(labels, vec!["b", "m", "q"]);
    }

    #[test]
    fn test_empty_database_has_no_frequent_items() {
        let db = SequenceDatabase::build(Vec::new()).unwrap();
        assert!(find_frequent_items(&db, 0.5).is_empty());
    }

    #[test]
    fn test_counter_reuse_is_clean() {
        let db = scenario();
        let root = ProjectedDatabase::root(&db);
        let mut counter = SupportCounter::new(db.distinct_items());

        let first = counter.frequent(&db, &root, 1);
        let second = counter.frequent(&db, &root, 1);
        assert_eq!(first, second);

        let mut all = counter.count(&db, &root);
        order_by_support(&db, &mut all);
        assert_eq!(all, first);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_counter_scoped_to_projection() {
        let db = scenario();
        let root = ProjectedDatabase::root(&db);
        let a = db.catalog().get("A").unwrap();
        let (after_a, _) = root.project(&db, a);

        let mut counter = SupportCounter::new(db.distinct_items());
        let frequent = counter.frequent(&db, &after_a, 2);
        assert_eq!(
            labelled(&db, &frequent),
            vec![("C".to_string(), 3), ("B".to_string(), 2)]
        );
    }

    #[test]
    fn test_min_support_count_rounding() {
        assert_eq!(min_support_count(0.5, 4), 2);
        assert_eq!(min_support_count(0.3, 10), 3);
        assert_eq!(min_support_count(0.7, 10), 7);
        assert_eq!(min_support_count(0.25, 4), 1);
        assert_eq!(min_support_count(1.0, 3), 3);
        assert_eq!(min_support_count(0.0001, 5), 1);
    }
}
