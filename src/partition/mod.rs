//! The partition contract and the read-only views shared by its
//! implementations.
//!
//! A [`Partition`] is a family of non-empty, pairwise-disjoint subsets
//! whose union is the partition's element set. Two implementations exist:
//! [`UnionFindPartition`], a mutable structure supporting the whole
//! contract, and [`ImmutablePartition`], a frozen snapshot on which every
//! mutator fails with [`PartitionError::Unsupported`].
//!
//! Equality of partitions is equality of their subset families as sets of
//! sets; which concrete type holds them is irrelevant. The hash of a
//! partition is consistent with that equality.

use std::collections::hash_map::DefaultHasher;
use std::collections::{hash_map, hash_set, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;

use itertools::Itertools;

use crate::error::PartitionError;
use crate::partition::immutable::ImmutablePartition;
use crate::partition::union_find::UnionFindPartition;

pub mod immutable;
pub mod union_find;

#[cfg(test)]
mod tests;

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for super::UnionFindPartition<T> {}
    impl<T> Sealed for super::ImmutablePartition<T> {}
}

/// A partition of a finite set of elements of type `T`.
///
/// The trait is object safe; all views are concrete types. Mutators return
/// [`PartitionError::Unsupported`] on implementations that cannot honour
/// them. The trait is sealed: [`UnionFindPartition`] and
/// [`ImmutablePartition`] are its only implementations.
pub trait Partition<T: Clone + Eq + Hash>: sealed::Sealed {
    /// The number of elements in the partition.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of subsets in the partition.
    fn subset_count(&self) -> usize;

    fn contains(&self, t: &T) -> bool;

    /// Iterates over all elements, in no particular order.
    fn elements(&self) -> Elements<'_, T>;

    /// Iterates over all subsets, in no particular order.
    fn subsets(&self) -> Subsets<'_, T>;

    /// The subset containing `t`.
    fn subset(&self, t: &T) -> Result<Subset<'_, T>, PartitionError>;

    /// Whether `x` and `y` are in the same subset.
    fn connected(&self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Inserts `t` into its own singleton subset. Returns `true` iff the
    /// partition did not already contain it.
    fn add(&mut self, t: T) -> Result<bool, PartitionError>;

    /// Inserts a whole new subset. Every element must be absent from the
    /// partition and the subset must be non-empty.
    fn add_subset(&mut self, subset: HashSet<T>) -> Result<(), PartitionError>;

    /// Inserts `x` into the subset of the existing element `y`. Returns
    /// `true` iff `x` was not already present, in which case this is
    /// equivalent to `add(x)` followed by `union(&x, y)`.
    fn merge(&mut self, x: T, y: &T) -> Result<bool, PartitionError>;

    /// Removes `t` from the partition and from its subset. Returns `true`
    /// iff `t` was present.
    fn remove(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Removes the entire subset containing `t`. Returns `true` iff `t`
    /// was present.
    fn remove_subset(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Merges the subsets of `x` and `y`. Returns `true` iff they were
    /// distinct.
    fn union(&mut self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Isolates `t` into its own singleton subset. Returns `false` iff it
    /// already was one.
    fn split(&mut self, t: &T) -> Result<bool, PartitionError>;

    /// Places `x` into the subset of `y`. Returns `false` iff they are
    /// already in the same subset; otherwise behaves like `split(x)`
    /// followed by `union(x, y)`.
    fn move_to(&mut self, x: &T, y: &T) -> Result<bool, PartitionError>;

    /// Removes all elements and subsets.
    fn clear(&mut self) -> Result<(), PartitionError>;

    /// Structural equality with any other partition: the subset families
    /// must be equal as sets of sets.
    fn eq_partition(&self, other: &dyn Partition<T>) -> bool {
        if self.len() != other.len() || self.subset_count() != other.subset_count() {
            return false;
        }
        for block in self.subsets() {
            let mut iter = block.iter();
            let Some(first) = iter.next() else {
                return false;
            };
            let Ok(other_block) = other.subset(first) else {
                return false;
            };
            if other_block.len() != block.len() {
                return false;
            }
            if !block.iter().all(|t| other_block.contains(t)) {
                return false;
            }
        }
        true
    }

    /// An order-independent fingerprint consistent with [`eq_partition`]:
    /// the wrapping sum over all elements of `h(e) ^ h(subset(e))`, where
    /// a subset's hash is the wrapping sum of its element hashes.
    ///
    /// [`eq_partition`]: Partition::eq_partition
    fn partition_hash(&self) -> u64 {
        let mut total = 0u64;
        for block in self.subsets() {
            let mut block_hash = 0u64;
            for t in block.iter() {
                block_hash = block_hash.wrapping_add(hash_element(t));
            }
            for t in block.iter() {
                total = total.wrapping_add(hash_element(t) ^ block_hash);
            }
        }
        total
    }
}

/// Hashes one element with the deterministic default hasher, so that equal
/// partitions fingerprint identically regardless of which map instance
/// holds them.
pub(crate) fn hash_element<T: Hash>(t: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    t.hash(&mut hasher);
    hasher.finish()
}

/// Writes a partition in the canonical `[[a,b],[c]]` form.
pub(crate) fn fmt_partition<T>(
    f: &mut fmt::Formatter<'_>,
    subsets: Subsets<'_, T>,
) -> fmt::Result
where
    T: Clone + Eq + Hash + fmt::Display,
{
    write!(f, "[{}]", subsets.format(","))
}

/// Iterator over the elements of a partition.
pub struct Elements<'a, T> {
    repr: ElementsRepr<'a, T>,
}

enum ElementsRepr<'a, T> {
    Lookup(hash_map::Keys<'a, T, u32>),
    Indexed(hash_map::Keys<'a, T, usize>),
}

impl<'a, T> Elements<'a, T> {
    pub(crate) fn lookup(keys: hash_map::Keys<'a, T, u32>) -> Self {
        Self {
            repr: ElementsRepr::Lookup(keys),
        }
    }

    pub(crate) fn indexed(keys: hash_map::Keys<'a, T, usize>) -> Self {
        Self {
            repr: ElementsRepr::Indexed(keys),
        }
    }
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.repr {
            ElementsRepr::Lookup(keys) => keys.next(),
            ElementsRepr::Indexed(keys) => keys.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.repr {
            ElementsRepr::Lookup(keys) => keys.size_hint(),
            ElementsRepr::Indexed(keys) => keys.size_hint(),
        }
    }
}

impl<'a, T> ExactSizeIterator for Elements<'a, T> {}
impl<'a, T> FusedIterator for Elements<'a, T> {}

/// A read-only view of one subset of a partition.
///
/// The view borrows the partition, so it can never observe a partition
/// that has mutated since it was obtained.
pub struct Subset<'a, T> {
    repr: SubsetRepr<'a, T>,
}

enum SubsetRepr<'a, T> {
    Linked {
        part: &'a UnionFindPartition<T>,
        start: u32,
        root: u32,
    },
    Stored(&'a HashSet<T>),
}

impl<'a, T: Clone + Eq + Hash> Subset<'a, T> {
    pub(crate) fn linked(part: &'a UnionFindPartition<T>, start: u32, root: u32) -> Self {
        Self {
            repr: SubsetRepr::Linked { part, start, root },
        }
    }

    pub(crate) fn stored(set: &'a HashSet<T>) -> Self {
        Self {
            repr: SubsetRepr::Stored(set),
        }
    }

    pub fn len(&self) -> usize {
        match &self.repr {
            SubsetRepr::Linked { part, root, .. } => part.block_size(*root),
            SubsetRepr::Stored(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, t: &T) -> bool {
        match &self.repr {
            SubsetRepr::Linked { part, root, .. } => part.root_of(t) == Some(*root),
            SubsetRepr::Stored(set) => set.contains(t),
        }
    }

    pub fn iter(&self) -> SubsetIter<'a, T> {
        match &self.repr {
            SubsetRepr::Linked { part, start, root } => {
                let part = *part;
                SubsetIter {
                    repr: SubsetIterRepr::Linked {
                        part,
                        current: *start,
                        remaining: part.block_size(*root),
                    },
                }
            }
            SubsetRepr::Stored(set) => SubsetIter {
                repr: SubsetIterRepr::Stored(set.iter()),
            },
        }
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &Subset<'a, T> {
    type Item = &'a T;
    type IntoIter = SubsetIter<'a, T>;

    fn into_iter(self) -> SubsetIter<'a, T> {
        self.iter()
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for Subset<'a, T> {
    type Item = &'a T;
    type IntoIter = SubsetIter<'a, T>;

    fn into_iter(self) -> SubsetIter<'a, T> {
        self.iter()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for Subset<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl<T: Clone + Eq + Hash> Eq for Subset<'_, T> {}

impl<T: Clone + Eq + Hash + fmt::Debug> fmt::Debug for Subset<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash + fmt::Display> fmt::Display for Subset<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.iter().format(","))
    }
}

/// Iterator over the elements of one [`Subset`].
pub struct SubsetIter<'a, T> {
    repr: SubsetIterRepr<'a, T>,
}

enum SubsetIterRepr<'a, T> {
    Linked {
        part: &'a UnionFindPartition<T>,
        current: u32,
        remaining: usize,
    },
    Stored(hash_set::Iter<'a, T>),
}

impl<'a, T: Clone + Eq + Hash> Iterator for SubsetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.repr {
            SubsetIterRepr::Linked {
                part,
                current,
                remaining,
            } => {
                let part: &'a UnionFindPartition<T> = *part;
                *remaining = remaining.checked_sub(1)?;
                let value = part.block_value(*current);
                *current = part.block_next(*current);
                Some(value)
            }
            SubsetIterRepr::Stored(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.repr {
            SubsetIterRepr::Linked { remaining, .. } => (*remaining, Some(*remaining)),
            SubsetIterRepr::Stored(iter) => iter.size_hint(),
        }
    }
}

impl<T: Clone + Eq + Hash> ExactSizeIterator for SubsetIter<'_, T> {}
impl<T: Clone + Eq + Hash> FusedIterator for SubsetIter<'_, T> {}

/// Iterator over the subsets of a partition, yielding [`Subset`] views.
pub struct Subsets<'a, T> {
    repr: SubsetsRepr<'a, T>,
}

enum SubsetsRepr<'a, T> {
    Linked {
        part: &'a UnionFindPartition<T>,
        current: u32,
        remaining: usize,
    },
    Stored(std::slice::Iter<'a, HashSet<T>>),
}

impl<'a, T> Subsets<'a, T> {
    pub(crate) fn linked(part: &'a UnionFindPartition<T>, current: u32, remaining: usize) -> Self {
        Self {
            repr: SubsetsRepr::Linked {
                part,
                current,
                remaining,
            },
        }
    }

    pub(crate) fn stored(blocks: std::slice::Iter<'a, HashSet<T>>) -> Self {
        Self {
            repr: SubsetsRepr::Stored(blocks),
        }
    }
}

impl<'a, T: Clone + Eq + Hash> Iterator for Subsets<'a, T> {
    type Item = Subset<'a, T>;

    fn next(&mut self) -> Option<Subset<'a, T>> {
        match &mut self.repr {
            SubsetsRepr::Linked {
                part,
                current,
                remaining,
            } => {
                let part: &'a UnionFindPartition<T> = *part;
                *remaining = remaining.checked_sub(1)?;
                let root = *current;
                *current = part.root_next(root);
                Some(Subset::linked(part, root, root))
            }
            SubsetsRepr::Stored(blocks) => blocks.next().map(Subset::stored),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.repr {
            SubsetsRepr::Linked { remaining, .. } => (*remaining, Some(*remaining)),
            SubsetsRepr::Stored(blocks) => blocks.size_hint(),
        }
    }
}

impl<T: Clone + Eq + Hash> ExactSizeIterator for Subsets<'_, T> {}
impl<T: Clone + Eq + Hash> FusedIterator for Subsets<'_, T> {}

impl<T: Clone + Eq + Hash> PartialEq for UnionFindPartition<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_partition(other)
    }
}

impl<T: Clone + Eq + Hash> Eq for UnionFindPartition<T> {}

impl<T: Clone + Eq + Hash> PartialEq<ImmutablePartition<T>> for UnionFindPartition<T> {
    fn eq(&self, other: &ImmutablePartition<T>) -> bool {
        self.eq_partition(other)
    }
}

impl<T: Clone + Eq + Hash> PartialEq for ImmutablePartition<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_partition(other)
    }
}

impl<T: Clone + Eq + Hash> Eq for ImmutablePartition<T> {}

impl<T: Clone + Eq + Hash> PartialEq<UnionFindPartition<T>> for ImmutablePartition<T> {
    fn eq(&self, other: &UnionFindPartition<T>) -> bool {
        self.eq_partition(other)
    }
}

impl<T: Clone + Eq + Hash> Hash for UnionFindPartition<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.partition_hash());
    }
}

impl<T: Clone + Eq + Hash> Hash for ImmutablePartition<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.partition_hash());
    }
}
