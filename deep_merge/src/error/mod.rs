//! Error types produced by the merge traversal.

mod constructors;
mod types;

pub use types::{ListSide, MergeError};

/// Result alias used throughout the merge traversal.
pub type MergeResult<T> = Result<T, MergeError>;
