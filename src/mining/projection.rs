use crate::catalog::Item;
use crate::database::SequenceDatabase;

/// "Sequence `sequence` still matches the prefix; keep searching at `offset`"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionPointer {
    pub sequence: u32,
    pub offset: u32,
}

/// Pseudo-projected database: one pointer per sequence still matching a prefix
///
/// Holds only offsets into the database arena, so a projection costs
/// O(N) pointers no matter how long the sequences are. Sequences that the
/// prefix consumed completely are dropped rather than kept as empty suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedDatabase {
    pointers: Vec<ProjectionPointer>,
}

impl ProjectedDatabase {
    /// Projection for the empty prefix: every sequence at offset 0
    pub fn root(db: &SequenceDatabase) -> Self {
        let pointers = (0..db.len())
            .filter(|&i| !db.sequence(i).is_empty())
            .map(|i| ProjectionPointer {
                sequence: i as u32,
                offset: 0,
            })
            .collect();
        Self { pointers }
    }

    /// Extend the prefix by `item`
    ///
    /// For each pointer, finds the first `item` at or after its offset. A hit
    /// at position `p` counts towards support and moves the pointer to
    /// `p + 1`; a miss drops the sequence.
    ///
    /// # Returns
    /// The child projection and the support count of the extended prefix
    pub fn project(&self, db: &SequenceDatabase, item: Item) -> (ProjectedDatabase, usize) {
        let mut pointers = Vec::with_capacity(self.pointers.len());
        let mut support = 0;

        for pointer in &self.pointers {
            let sequence = db.sequence(pointer.sequence as usize);
            let offset = pointer.offset as usize;

            if let Some(pos) = sequence[offset..].iter().position(|&x| x == item) {
                support += 1;
                let next = offset + pos + 1;
                if next < sequence.len() {
                    pointers.push(ProjectionPointer {
                        sequence: pointer.sequence,
                        offset: next as u32,
                    });
                }
            }
        }

        (ProjectedDatabase { pointers }, support)
    }

    pub fn pointers(&self) -> &[ProjectionPointer] {
        &self.pointers
    }

    /// Remaining suffix of every projected sequence
    pub fn suffixes<'a>(&'a self, db: &'a SequenceDatabase) -> impl Iterator<Item = &'a [Item]> + 'a {
        self.pointers
            .iter()
            .map(move |p| &db.sequence(p.sequence as usize)[p.offset as usize..])
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }
}
