//! Constructors and classification helpers for `MergeError`.

use std::any::type_name;

use super::{ListSide, MergeError};

impl MergeError {
    /// Builds a [`MergeError::TypeMismatch`] for the given type names.
    #[must_use]
    pub const fn type_mismatch(dst: &'static str, src: &'static str) -> Self {
        Self::TypeMismatch { dst, src }
    }

    /// Builds a [`MergeError::InvalidDestination`] naming `T`.
    #[must_use]
    pub fn invalid_destination<T: ?Sized>() -> Self {
        Self::InvalidDestination {
            type_name: type_name::<T>(),
        }
    }

    /// Builds a [`MergeError::KeyedListDiff`] for the element at `index`.
    #[must_use]
    pub fn keyed_list_diff(key: &str, side: ListSide, index: usize) -> Self {
        Self::KeyedListDiff {
            key: key.to_owned(),
            side,
            index,
        }
    }

    /// Returns `true` when the error only signals that keyed list
    /// reconciliation was impossible.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deep_merge::{ListSide, MergeError};
    ///
    /// assert!(MergeError::keyed_list_diff("id", ListSide::Source, 0).is_keyed_list_diff());
    /// assert!(!MergeError::DepthLimitExceeded { limit: 4 }.is_keyed_list_diff());
    /// ```
    #[must_use]
    pub const fn is_keyed_list_diff(&self) -> bool {
        matches!(self, Self::KeyedListDiff { .. })
    }
}
