//! The toplevel error enum and the failures shared by the partition
//! implementations. Everything fallible in this crate turns into
//! [`Error`], usually through a transparent wrapper around the actual
//! error.

use miette::Diagnostic;
use thiserror::Error;

use crate::enumerate::EnumerateError;
use crate::parse::ParseError;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Partition(#[from] PartitionError),

    #[error(transparent)]
    Enumerate(#[from] EnumerateError),
}

/// Failure of a partition operation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    /// An operation that requires its element argument to be present
    /// looked up one that is not.
    #[error("the element is not in the partition")]
    NotFound,

    /// A mutator was invoked on an immutable partition.
    #[error("the operation is not supported by an immutable partition")]
    Unsupported,

    /// `add_subset` was handed an empty set.
    #[error("a subset cannot be empty")]
    EmptySubset,

    /// `add_subset` was handed an element the partition already contains.
    #[error("an element of the subset is already in the partition")]
    AlreadyPresent,
}
