//! Representation and enumeration of set partitions.
//!
//! A partition of a finite set is a family of non-empty, pairwise-disjoint
//! subsets whose union is the whole set. This crate provides:
//!
//! - [`UnionFindPartition`], a mutable partition backed by union-find with
//!   union by size and path splitting, extended with constant-time
//!   deletion, element move, subset split, whole-subset removal and
//!   constant-time iteration entry points for both the elements of a
//!   subset and the subsets themselves;
//! - [`ImmutablePartition`], a frozen snapshot answering every read query
//!   in constant expected time;
//! - the [`Partition`] trait both implement, with structural equality and
//!   hashing over subset families;
//! - [`lexicographic`] and [`reverse_lexicographic`] enumeration of all
//!   partitions of an element set whose block count satisfies a
//!   [`BlockCount`] constraint, driven by the restricted-growth-string
//!   enumerators of the [`rgs`] crate;
//! - a canonical textual form, produced by `Display` and read back by the
//!   `from_str_with` constructors.
//!
//! ```
//! use setpart::{Partition, UnionFindPartition};
//!
//! let mut p = UnionFindPartition::new();
//! for i in 0..5u32 {
//!     p.add(i).unwrap();
//! }
//! p.union(&2, &3).unwrap();
//! assert_eq!(p.subset_count(), 4);
//! assert!(p.connected(&2, &3).unwrap());
//! ```

pub mod enumerate;
pub mod error;
pub mod parse;
pub mod partition;


pub use enumerate::{
    lexicographic, reverse_lexicographic, BlockCount, EnumerateError, PartitionIter,
};
pub use error::{Error, PartitionError};
pub use parse::ParseError;
pub use partition::immutable::ImmutablePartition;
pub use partition::union_find::UnionFindPartition;
pub use partition::{Elements, Partition, Subset, SubsetIter, Subsets};

pub use rgs;
