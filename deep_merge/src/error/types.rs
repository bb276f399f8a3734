//! Primary error enum for merge operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while merging two values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
    /// Destination and source are values of different concrete types.
    #[error("cannot merge '{src}' into '{dst}': argument types differ")]
    TypeMismatch {
        /// Type name of the destination value.
        dst: &'static str,
        /// Type name of the source value.
        src: &'static str,
    },

    /// The destination cannot be mutated in place.
    #[error("destination '{type_name}' cannot be borrowed mutably")]
    InvalidDestination {
        /// Type name of the destination value.
        type_name: &'static str,
    },

    /// A keyed list element does not expose the configured key.
    ///
    /// Sequence merges recover from this locally by replacing the whole
    /// sequence; it only reaches callers in strict mode.
    #[error("{side} element {index} has no usable '{key}' entry: performing full list replacement")]
    KeyedListDiff {
        /// Configured list key.
        key: String,
        /// Which sequence held the offending element.
        side: ListSide,
        /// Position of the offending element.
        index: usize,
    },

    /// Recursion went deeper than the configured limit.
    #[error("merge exceeded the maximum depth of {limit}")]
    DepthLimitExceeded {
        /// Configured depth limit.
        limit: usize,
    },
}

/// Identifies one of the two sequences taking part in a keyed list merge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ListSide {
    /// The sequence being merged into.
    Destination,
    /// The sequence values are read from.
    Source,
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Destination => f.write_str("destination"),
            Self::Source => f.write_str("source"),
        }
    }
}
