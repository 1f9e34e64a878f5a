#![doc = include_str!("../README.md")]
//! # Usage
//! Every enumerator is constructed from the sequence length and its bound
//! parameters, and is driven with `advance`, which returns a borrow of the
//! internal vector or `None` once the sequence is exhausted:
//!
//! ```
//! use rgs::lex;
//!
//! let mut it = lex::Between::new(4, 2, 3).unwrap();
//! let mut count = 0;
//! while let Some(a) = it.advance() {
//!     assert_eq!(a[0], 0);
//!     count += 1;
//! }
//! assert_eq!(count, 7 + 6); // S(4,2) + S(4,3)
//! ```
//!
//! The reverse-lexicographic enumerators produce the exact reversal of the
//! corresponding forward sequence. All enumerators are fused: once `advance`
//! has returned `None`, it returns `None` forever.

use thiserror::Error;

pub mod lex;
pub mod revlex;


/// Rejected bound parameters, reported by every enumerator constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("the sequence length must be positive")]
    ZeroLength,

    #[error("a block count bound must be positive")]
    ZeroBound,

    #[error("block count bound {bound} exceeds the sequence length {len}")]
    BoundTooLarge { bound: usize, len: usize },

    #[error("lower bound {lo} exceeds upper bound {hi}")]
    InvertedBounds { lo: usize, hi: usize },

    #[error("the set of allowed block counts is empty")]
    EmptyCountSet,
}

/// Checks `1 <= bound <= len`, the precondition shared by every bounded
/// enumerator.
fn check_bound(bound: usize, len: usize) -> Result<(), BoundsError> {
    if bound == 0 {
        return Err(BoundsError::ZeroBound);
    }
    if bound > len {
        return Err(BoundsError::BoundTooLarge { bound, len });
    }
    Ok(())
}

fn check_len(len: usize) -> Result<(), BoundsError> {
    if len == 0 {
        return Err(BoundsError::ZeroLength);
    }
    Ok(())
}

/// Sorts, deduplicates and validates a set of allowed block counts. The
/// caller may pass duplicates and any order; both are normalised here.
fn normalize_counts(mut counts: Vec<usize>, len: usize) -> Result<Vec<usize>, BoundsError> {
    if counts.is_empty() {
        return Err(BoundsError::EmptyCountSet);
    }
    for &k in &counts {
        check_bound(k, len)?;
    }
    counts.sort_unstable();
    counts.dedup();
    Ok(counts)
}

/// Asserts the restricted-growth property of `a` and, when `counts` is
/// given, membership of the distinct-value count. Debug builds only.
#[cfg(debug_assertions)]
fn assert_rgs(a: &[usize], kmax: usize, counts: Option<&[usize]>) {
    debug_assert_eq!(a[0], 0);
    let mut max = 0;
    for &ai in a {
        debug_assert!(ai <= kmax - 1);
        debug_assert!(ai <= max + 1);
        max = max.max(ai);
    }
    if let Some(counts) = counts {
        debug_assert!(counts.binary_search(&(max + 1)).is_ok());
    }
}

#[cfg(not(debug_assertions))]
fn assert_rgs(_a: &[usize], _kmax: usize, _counts: Option<&[usize]>) {}
