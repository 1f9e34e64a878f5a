//! An immutable partition: a frozen snapshot answering every read query
//! in constant expected time.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::error::PartitionError;
use crate::parse;
use crate::parse::ParseError;
use crate::partition::{fmt_partition, Elements, Partition, Subset, Subsets};

/// An immutable [`Partition`]. Every subset is stored once and every
/// element maps to the position of its subset, so `connected` is a pair of
/// lookups and an index comparison. All mutators fail with
/// [`PartitionError::Unsupported`].
#[derive(Debug, Clone)]
pub struct ImmutablePartition<T> {
    blocks: Vec<HashSet<T>>,
    index: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> ImmutablePartition<T> {
    /// Creates a snapshot of `source`.
    pub fn from_partition<P>(source: &P) -> Self
    where
        P: Partition<T>,
    {
        let blocks = source
            .subsets()
            .map(|block| block.iter().cloned().collect())
            .collect();
        let out = Self::from_blocks(blocks);
        debug_assert!(out.eq_partition(source));
        out
    }

    /// Creates a partition from an explicit element-to-label map: two
    /// elements share a subset iff their labels are equal.
    pub fn from_map<L: Eq + Hash>(map: HashMap<T, L>) -> Self {
        let mut inverse: HashMap<L, HashSet<T>> = HashMap::new();
        for (t, label) in map {
            inverse.entry(label).or_default().insert(t);
        }
        Self::from_blocks(inverse.into_values().collect())
    }

    /// Creates a partition from an implicit map: `label` is applied to
    /// every element and two elements share a subset iff their labels are
    /// equal.
    pub fn from_label_fn<L, F>(elements: &IndexSet<T>, mut label: F) -> Self
    where
        L: Eq + Hash,
        F: FnMut(&T) -> L,
    {
        let mut inverse: HashMap<L, HashSet<T>> = HashMap::new();
        for t in elements {
            inverse.entry(label(t)).or_default().insert(t.clone());
        }
        Self::from_blocks(inverse.into_values().collect())
    }

    /// Parses a partition from its canonical string form, deserializing
    /// each element token with `de`.
    pub fn from_str_with<F, E>(input: &str, de: F) -> Result<Self, ParseError>
    where
        F: FnMut(&str) -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Ok(Self::from_blocks(parse::parse_blocks(input, de)?))
    }

    fn from_blocks(blocks: Vec<HashSet<T>>) -> Self {
        let mut index = HashMap::new();
        for (position, block) in blocks.iter().enumerate() {
            debug_assert!(!block.is_empty());
            for t in block {
                let previous = index.insert(t.clone(), position);
                debug_assert!(previous.is_none());
            }
        }
        Self { blocks, index }
    }
}

impl<T: Clone + Eq + Hash> Partition<T> for ImmutablePartition<T> {
    fn len(&self) -> usize {
        self.index.len()
    }

    fn subset_count(&self) -> usize {
        self.blocks.len()
    }

    fn contains(&self, t: &T) -> bool {
        self.index.contains_key(t)
    }

    fn elements(&self) -> Elements<'_, T> {
        Elements::indexed(self.index.keys())
    }

    fn subsets(&self) -> Subsets<'_, T> {
        Subsets::stored(self.blocks.iter())
    }

    fn subset(&self, t: &T) -> Result<Subset<'_, T>, PartitionError> {
        let &position = self.index.get(t).ok_or(PartitionError::NotFound)?;
        Ok(Subset::stored(&self.blocks[position]))
    }

    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError> {
        let &px = self.index.get(x).ok_or(PartitionError::NotFound)?;
        let &py = self.index.get(y).ok_or(PartitionError::NotFound)?;
        Ok(px == py)
    }

    fn add(&mut self, _t: T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn add_subset(&mut self, _subset: HashSet<T>) -> Result<(), PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn merge(&mut self, _x: T, _y: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn remove(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn remove_subset(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn union(&mut self, _x: &T, _y: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn split(&mut self, _t: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn move_to(&mut self, _x: &T, _y: &T) -> Result<bool, PartitionError> {
        Err(PartitionError::Unsupported)
    }

    fn clear(&mut self) -> Result<(), PartitionError> {
        Err(PartitionError::Unsupported)
    }
}

impl<T: Clone + Eq + Hash + fmt::Display> fmt::Display for ImmutablePartition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_partition(f, self.subsets())
    }
}
