//! Immutable in-memory sequence database.
//!
//! All sequences live in one flat arena of interned items. A sequence is a
//! `[start, end)` window into that arena, so projections can refer to any
//! suffix with a (sequence index, offset) pair and never copy item data.

use crate::catalog::{Catalog, Item};
use crate::error::{MiningError, Result};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One validated input sequence: identifier plus ordered item labels
///
/// Ordering of `items` (by timestamp, row order, ...) is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
pub struct SequenceInput {
    pub id: String,
    pub items: Vec<String>,
}

impl SequenceInput {
    pub fn new<I, S>(id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Borrowed view of one stored sequence
#[derive(Debug, Clone, Copy)]
pub struct SequenceRef<'a> {
    pub id: &'a str,
    pub items: &'a [Item],
}

/// Read-only database of interned sequences
///
/// Built once, never mutated, and safe to share across mining workers.
#[derive(Debug)]
pub struct SequenceDatabase {
    catalog: Catalog,
    ids: Vec<String>,
    /// Flat item arena, sequence `i` is `items[starts[i]..starts[i + 1]]`
    items: Vec<Item>,
    starts: Vec<usize>,
    /// Lexicographic rank of each item's label, indexed by `Item::index`
    label_rank: Vec<u32>,
}

impl SequenceDatabase {
    /// Build a database from validated input
    ///
    /// Empty input is a valid database with zero sequences. A sequence with
    /// no items, or a repeated sequence identifier, is a configuration error.
    pub fn build<I>(input: I) -> Result<Self>
    where
        I: IntoIterator<Item = SequenceInput>,
    {
        let catalog = Catalog::new();
        let mut ids = Vec::new();
        let mut items = Vec::new();
        let mut starts = vec![0];
        let mut distinct = Vec::new();

        for sequence in input {
            if sequence.items.is_empty() {
                return Err(MiningError::configuration(format!(
                    "sequence '{}' has no items",
                    sequence.id
                )));
            }

            check_indexable("items in one sequence", sequence.items.len())?;
            check_indexable("sequences", ids.len() + 1)?;

            for label in &sequence.items {
                let before = catalog.len();
                let item = catalog.intern(label);
                if catalog.len() > before {
                    distinct.push(item);
                }
                items.push(item);
            }
            starts.push(items.len());
            ids.push(sequence.id);
        }

        let mut seen = FnvHashSet::default();
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(MiningError::configuration(format!(
                    "duplicate sequence id '{}'",
                    id
                )));
            }
        }

        distinct.sort_by(|a, b| catalog.resolve(*a).cmp(catalog.resolve(*b)));
        let mut label_rank = vec![0u32; catalog.len()];
        for (rank, item) in distinct.iter().enumerate() {
            label_rank[item.index()] = rank as u32;
        }

        tracing::debug!(
            sequences = ids.len(),
            items = items.len(),
            distinct_items = catalog.len(),
            "built sequence database"
        );

        Ok(Self {
            catalog,
            ids,
            items,
            starts,
            label_rank,
        })
    }

    /// Total number of sequences (N)
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Items of the sequence at `index`
    #[inline]
    pub fn sequence(&self, index: usize) -> &[Item] {
        &self.items[self.starts[index]..self.starts[index + 1]]
    }

    pub fn sequence_id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = SequenceRef<'_>> + '_ {
        (0..self.len()).map(move |i| SequenceRef {
            id: &self.ids[i],
            items: self.sequence(i),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of distinct items across all sequences
    pub fn distinct_items(&self) -> usize {
        self.catalog.len()
    }

    /// Order two items by their labels
    #[inline]
    pub fn compare_labels(&self, a: Item, b: Item) -> Ordering {
        self.label_rank[a.index()].cmp(&self.label_rank[b.index()])
    }

    pub fn resolve(&self, item: Item) -> &str {
        self.catalog.resolve(item)
    }

    pub fn resolve_all(&self, items: &[Item]) -> Vec<String> {
        items.iter().map(|i| self.resolve(*i).to_string()).collect()
    }
}

/// Projection pointers and support counters are `u32`
fn check_indexable(what: &str, count: usize) -> Result<()> {
    if u32::try_from(count).is_err() {
        return Err(MiningError::configuration(format!(
            "too many {}: {} exceeds {}",
            what,
            count,
            u32::MAX
        )));
    }
    Ok(())
}
