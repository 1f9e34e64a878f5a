//! Enumeration of every partition of an element set, subject to a block
//! count constraint, in lexicographic or reverse-lexicographic order of
//! the restricted-growth encoding.
//!
//! The element set is bound once to the indices `0..n` in insertion
//! order; each restricted-growth string produced by the underlying
//! [`rgs`] enumerator is then handed to a caller-supplied factory as an
//! implicit element-to-label map. The factory decides which [`Partition`]
//! implementation materialises the result:
//!
//! ```
//! use setpart::{lexicographic, BlockCount, UnionFindPartition};
//!
//! let parts = lexicographic(1..=4u32, BlockCount::Any, |els, label| {
//!     UnionFindPartition::from_label_fn(els, label)
//! })
//! .unwrap();
//! assert_eq!(parts.count(), 15); // Bell(4)
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use indexmap::IndexSet;
use rgs::{lex, revlex, BoundsError};
use thiserror::Error;

use crate::partition::Partition;

#[cfg(test)]
mod tests;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumerateError {
    #[error("the element set is empty")]
    EmptyElements,

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Constraint on the number of blocks of the enumerated partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockCount {
    /// No constraint; all partitions of the set.
    Any,
    /// Exactly this many blocks.
    Exactly(usize),
    /// At most this many blocks.
    AtMost(usize),
    /// Between the two bounds, inclusive.
    Between(usize, usize),
    /// Block count contained in this set. Duplicates and ordering are
    /// irrelevant; the set must be non-empty and every entry within
    /// `1..=n`.
    In(Vec<usize>),
}

#[derive(Debug)]
enum Source {
    Full(lex::Full),
    AtMost(lex::AtMost),
    Exact(lex::Exact),
    Between(lex::Between),
    Discrete(lex::Discrete),
    RevBetween(revlex::Between),
    RevDiscrete(revlex::Discrete),
}

impl Source {
    fn advance(&mut self) -> Option<&[usize]> {
        match self {
            Source::Full(it) => it.advance(),
            Source::AtMost(it) => it.advance(),
            Source::Exact(it) => it.advance(),
            Source::Between(it) => it.advance(),
            Source::Discrete(it) => it.advance(),
            Source::RevBetween(it) => it.advance(),
            Source::RevDiscrete(it) => it.advance(),
        }
    }
}

/// Returns an iterator over every partition of `elements` whose block
/// count satisfies `counts`, in lexicographic order of the
/// restricted-growth encoding. The `factory` is invoked once per
/// partition with the element set and the label of each element; each
/// yielded partition is an independent copy.
pub fn lexicographic<T, P, F>(
    elements: impl IntoIterator<Item = T>,
    counts: BlockCount,
    factory: F,
) -> Result<PartitionIter<T, P, F>, EnumerateError>
where
    T: Clone + Eq + Hash,
    P: Partition<T>,
    F: FnMut(&IndexSet<T>, &dyn Fn(&T) -> usize) -> P,
{
    let elements: IndexSet<T> = elements.into_iter().collect();
    if elements.is_empty() {
        return Err(EnumerateError::EmptyElements);
    }
    let n = elements.len();
    let source = match counts {
        BlockCount::Any => Source::Full(lex::Full::new(n)?),
        BlockCount::Exactly(k) => Source::Exact(lex::Exact::new(n, k)?),
        BlockCount::AtMost(k) => Source::AtMost(lex::AtMost::new(n, k)?),
        BlockCount::Between(kmin, kmax) => Source::Between(lex::Between::new(n, kmin, kmax)?),
        BlockCount::In(ks) => Source::Discrete(lex::Discrete::new(n, ks)?),
    };
    Ok(PartitionIter {
        elements,
        source,
        factory,
        _partition: PhantomData,
    })
}

/// The reverse-lexicographic counterpart of [`lexicographic`]: produces
/// the exact reversal of the forward sequence for the same arguments.
pub fn reverse_lexicographic<T, P, F>(
    elements: impl IntoIterator<Item = T>,
    counts: BlockCount,
    factory: F,
) -> Result<PartitionIter<T, P, F>, EnumerateError>
where
    T: Clone + Eq + Hash,
    P: Partition<T>,
    F: FnMut(&IndexSet<T>, &dyn Fn(&T) -> usize) -> P,
{
    let elements: IndexSet<T> = elements.into_iter().collect();
    if elements.is_empty() {
        return Err(EnumerateError::EmptyElements);
    }
    let n = elements.len();
    let source = match counts {
        BlockCount::Any => Source::RevBetween(revlex::Between::new(n, 1, n)?),
        BlockCount::Exactly(k) => Source::RevBetween(revlex::Between::new(n, k, k)?),
        BlockCount::AtMost(k) => Source::RevBetween(revlex::Between::new(n, 1, k)?),
        BlockCount::Between(kmin, kmax) => {
            Source::RevBetween(revlex::Between::new(n, kmin, kmax)?)
        }
        BlockCount::In(ks) => Source::RevDiscrete(revlex::Discrete::new(n, ks)?),
    };
    Ok(PartitionIter {
        elements,
        source,
        factory,
        _partition: PhantomData,
    })
}

/// A finite, forward-only sequence of partitions. Once exhausted it stays
/// exhausted.
pub struct PartitionIter<T, P, F> {
    elements: IndexSet<T>,
    source: Source,
    factory: F,
    _partition: PhantomData<fn() -> P>,
}

impl<T: fmt::Debug, P, F> fmt::Debug for PartitionIter<T, P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionIter")
            .field("elements", &self.elements)
            .field("source", &self.source)
            .finish()
    }
}

impl<T, P, F> Iterator for PartitionIter<T, P, F>
where
    T: Clone + Eq + Hash,
    P: Partition<T>,
    F: FnMut(&IndexSet<T>, &dyn Fn(&T) -> usize) -> P,
{
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let Self {
            elements,
            source,
            factory,
            ..
        } = self;
        let elements: &IndexSet<T> = elements;
        let a: &[usize] = source.advance()?;
        let label = move |t: &T| {
            let index = elements
                .get_index_of(t)
                .expect("the factory label function was queried for an element outside the enumerated set");
            a[index]
        };
        Some((factory)(elements, &label))
    }
}

impl<T, P, F> FusedIterator for PartitionIter<T, P, F>
where
    T: Clone + Eq + Hash,
    P: Partition<T>,
    F: FnMut(&IndexSet<T>, &dyn Fn(&T) -> usize) -> P,
{
}
