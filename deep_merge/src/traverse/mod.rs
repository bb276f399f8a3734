//! The recursive merge walker.
//!
//! Every mergeable type implements [`DeepMerge`], reporting one of a small
//! set of [`Shape`]s and applying the rule for that shape. Composite values
//! recurse into their children through [`MergeContext::merge_child`], which
//! tracks depth and owns the cycle guard for the current call.

mod mapping;
mod pointers;
mod reconcile;
mod scalars;
mod sequence;
mod visited;

use std::cell::RefCell;
use std::rc::Rc;

use crate::{MergeError, MergeOptions, MergeResult};

pub(crate) use mapping::{MapEntries, merge_map};
pub(crate) use sequence::merge_sequence;

use visited::VisitedSet;

/// Structural category of a value, deciding which merge rule applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A struct whose fields merge one by one.
    Record,
    /// An ordered sequence, replaced wholesale or reconciled by key.
    Sequence,
    /// A key-value mapping merged entry by entry.
    Mapping,
    /// A value that may be unset or that refers to another value.
    Optional,
    /// Any other leaf value.
    Scalar,
}

impl Shape {
    /// Returns `true` for shapes whose sequences can be reconciled by key.
    #[must_use]
    pub const fn is_keyable(self) -> bool {
        matches!(self, Self::Record | Self::Mapping)
    }

    /// Returns `true` for shapes merged in place when found inside a mapping.
    #[must_use]
    pub const fn merges_in_place(self) -> bool {
        matches!(self, Self::Record | Self::Optional | Self::Mapping)
    }
}

/// A value that can absorb another value of the same type.
///
/// Implementations exist for scalars, `String`, `Option`, `Box`, `Vec`,
/// `HashMap`, `BTreeMap`, shared `Rc<RefCell<T>>` nodes and `Arc`. Structs
/// normally use `#[derive(DeepMerge)]`.
///
/// # Examples
///
/// A newtype leaf implemented by hand:
///
/// ```rust
/// use deep_merge::{DeepMerge, MergeContext, MergeResult, Shape, merge, merge_leaf};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Port(u16);
///
/// impl DeepMerge for Port {
///     fn shape(&self) -> Shape {
///         Shape::Scalar
///     }
///
///     fn is_empty_value(&self) -> bool {
///         self.0 == 0
///     }
///
///     fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
///         merge_leaf(self, src, ctx);
///         Ok(())
///     }
/// }
///
/// let mut port = Port(0);
/// merge(&mut port, &Port(8080), "")?;
/// assert_eq!(port, Port(8080));
/// # Ok::<_, deep_merge::MergeError>(())
/// ```
pub trait DeepMerge: Clone {
    /// Reports the structural category of this value.
    fn shape(&self) -> Shape;

    /// Returns `true` when the value is in its natural zero state.
    fn is_empty_value(&self) -> bool;

    /// Merges `src` into `self` according to the rule for this shape.
    ///
    /// # Errors
    ///
    /// Returns a [`MergeError`] when a child merge fails; `self` may be
    /// partially updated.
    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()>;

    /// Text form of this value when it identifies a keyed list element.
    ///
    /// Values that cannot serve as list keys return `None`.
    fn key_text(&self) -> Option<String> {
        None
    }

    /// Looks up the key text of the field or entry named `key`.
    ///
    /// Records and mappings override this; other shapes return `None`.
    fn list_key(&self, key: &str) -> Option<String> {
        let _ = key;
        None
    }
}

/// Applies the leaf rule: copy `src` when it is non-empty and either the
/// call overwrites or `dst` is empty.
pub fn merge_leaf<T: DeepMerge>(dst: &mut T, src: &T, ctx: &MergeContext<'_>) {
    if !src.is_empty_value() && (ctx.overwrites() || dst.is_empty_value()) {
        dst.clone_from(src);
    }
}

/// Traversal state for one top-level merge call.
pub struct MergeContext<'a> {
    options: &'a MergeOptions,
    visited: VisitedSet,
    depth: usize,
}

impl<'a> MergeContext<'a> {
    pub(crate) fn new(options: &'a MergeOptions) -> Self {
        Self {
            options,
            visited: VisitedSet::default(),
            depth: 0,
        }
    }

    /// Returns `true` when source values replace non-empty destination values.
    #[must_use]
    pub const fn overwrites(&self) -> bool {
        self.options.overwrites()
    }

    /// Returns the list key for keyed sequence reconciliation, if any.
    #[must_use]
    pub fn list_key(&self) -> Option<&'a str> {
        self.options.list_key()
    }

    /// Returns how many levels below the root the traversal currently is.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) const fn is_strict(&self) -> bool {
        self.options.is_strict()
    }

    /// Merges a child value one level below the current node.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::DepthLimitExceeded`] when the configured depth
    /// limit would be exceeded, or any error raised by the child merge.
    pub fn merge_child<T: DeepMerge>(&mut self, dst: &mut T, src: &T) -> MergeResult<()> {
        let parent = self.depth;
        let depth = parent.saturating_add(1);
        if let Some(limit) = self.options.max_depth() {
            if depth > limit {
                return Err(MergeError::DepthLimitExceeded { limit });
            }
        }
        self.depth = depth;
        let result = dst.deep_merge(src, self);
        self.depth = parent;
        result
    }

    /// Marks a shared node as entered, returning `false` on a repeat visit.
    pub(crate) fn first_visit<T: 'static>(&mut self, node: &Rc<RefCell<T>>) -> bool {
        self.visited.insert(node)
    }

    /// Marks a shared source node as being read, returning `false` when an
    /// outer frame already holds it.
    pub(crate) fn begin_read<T: 'static>(&mut self, node: &Rc<RefCell<T>>) -> bool {
        self.visited.begin_read(node)
    }

    pub(crate) fn end_read<T: 'static>(&mut self, node: &Rc<RefCell<T>>) {
        self.visited.end_read(node);
    }

    pub(crate) fn is_reading<T: 'static>(&self, node: &Rc<RefCell<T>>) -> bool {
        self.visited.is_reading(node)
    }
}
