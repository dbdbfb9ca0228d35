//! Item catalog: interning of raw item labels.
//!
//! Uses `lasso::ThreadedRodeo` so the catalog can be shared read-only by
//! every mining worker once the database is built. Keys are dense, which
//! lets the hot counting loop index plain vectors by `Item::index`.

use lasso::{Key, Spur, ThreadedRodeo};

/// Interned item identifier
///
/// Only meaningful together with the `Catalog` that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Item(Spur);

impl Item {
    /// Dense zero-based index of this item within its catalog
    #[inline]
    pub fn index(self) -> usize {
        self.0.into_usize()
    }
}

/// Bidirectional label <-> `Item` table for one mining run
///
/// Grows monotonically. There is no removal.
pub struct Catalog {
    inner: ThreadedRodeo,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            inner: ThreadedRodeo::default(),
        }
    }

    /// Intern a label. Repeated labels return the same `Item`.
    pub fn intern(&self, label: &str) -> Item {
        Item(self.inner.get_or_intern(label))
    }

    /// Look up a previously interned label without inserting.
    pub fn get(&self, label: &str) -> Option<Item> {
        self.inner.get(label).map(Item)
    }

    /// Resolve an `Item` back to its label.
    pub fn resolve(&self, item: Item) -> &str {
        self.inner.resolve(&item.0)
    }

    /// Number of distinct labels interned so far
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("len", &self.len()).finish()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
