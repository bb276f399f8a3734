//! Options controlling a single merge call.
//!
//! [`MergeOptions`] is plain data and derives `serde` traits so applications
//! can keep their merge policy next to the rest of their configuration.

use serde::{Deserialize, Serialize};

/// Policy applied to one merge call.
///
/// # Examples
///
/// ```rust
/// use deep_merge::MergeOptions;
///
/// let options = MergeOptions::new()
///     .overwrite(true)
///     .with_list_key("name")
///     .with_max_depth(32);
///
/// assert!(options.overwrites());
/// assert_eq!(options.list_key(), Some("name"));
/// assert_eq!(options.max_depth(), Some(32));
/// assert!(!options.is_strict());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeOptions {
    overwrite: bool,
    list_key: Option<String>,
    max_depth: Option<usize>,
    strict_keyed_lists: bool,
}

impl MergeOptions {
    /// Creates fill-only options with keyed lists disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            overwrite: false,
            list_key: None,
            max_depth: None,
            strict_keyed_lists: false,
        }
    }

    /// Selects whether non-empty source values replace non-empty destination
    /// values.
    #[must_use]
    pub const fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the field or entry name used to match elements of keyed lists.
    ///
    /// An empty key disables keyed-list reconciliation.
    #[must_use]
    pub fn with_list_key(mut self, key: impl Into<String>) -> Self {
        let owned = key.into();
        self.list_key = (!owned.is_empty()).then_some(owned);
        self
    }

    /// Limits how deep the traversal may descend below the root value.
    #[must_use]
    pub const fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// Makes keyed-list failures propagate instead of falling back to whole
    /// sequence replacement.
    #[must_use]
    pub const fn strict_keyed_lists(mut self, strict: bool) -> Self {
        self.strict_keyed_lists = strict;
        self
    }

    /// Returns `true` when source values win over non-empty destination values.
    #[must_use]
    pub const fn overwrites(&self) -> bool {
        self.overwrite
    }

    /// Returns the configured list key, if keyed lists are enabled.
    #[must_use]
    pub fn list_key(&self) -> Option<&str> {
        self.list_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Returns the configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns `true` when keyed-list failures propagate to the caller.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.strict_keyed_lists
    }
}
