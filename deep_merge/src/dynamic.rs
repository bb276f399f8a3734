//! Type-erased merging.
//!
//! Applications that keep heterogeneous sections behind `Box<dyn DynMerge>`
//! cannot rely on the compiler to pair destination and source types. These
//! helpers check the pairing at runtime before any traversal starts.

use std::any::{Any, type_name};

use crate::{DeepMerge, MergeError, MergeOptions, MergeResult, merge_with_options};

/// Object-safe view of a [`DeepMerge`] value.
///
/// Implemented for every `'static` type implementing [`DeepMerge`].
pub trait DynMerge: Any {
    /// Name of the concrete type behind the trait object.
    fn type_name(&self) -> &'static str;

    /// Upcasts to [`Any`] for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Merges `src` into `self` when both hold the same concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::TypeMismatch`] before touching `self` when the
    /// concrete types differ, or any error raised by the traversal.
    fn merge_dyn(&mut self, src: &dyn DynMerge, options: &MergeOptions) -> MergeResult<()>;
}

impl<T: DeepMerge + 'static> DynMerge for T {
    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn merge_dyn(&mut self, src: &dyn DynMerge, options: &MergeOptions) -> MergeResult<()> {
        let Some(source) = src.as_any().downcast_ref::<T>() else {
            return Err(MergeError::type_mismatch(type_name::<T>(), src.type_name()));
        };
        merge_with_options(self, source, options)
    }
}

/// Merges two type-erased values.
///
/// # Examples
///
/// ```rust
/// use deep_merge::{DynMerge, MergeError, MergeOptions, merge_dyn};
///
/// let mut dst: Box<dyn DynMerge> = Box::new(0_u32);
/// let src: Box<dyn DynMerge> = Box::new(String::from("eight"));
///
/// let err = merge_dyn(dst.as_mut(), src.as_ref(), &MergeOptions::new());
/// assert!(matches!(err, Err(MergeError::TypeMismatch { .. })));
/// ```
///
/// # Errors
///
/// Returns [`MergeError::TypeMismatch`] when the concrete types differ, or
/// any error raised by the traversal.
pub fn merge_dyn(
    dst: &mut dyn DynMerge,
    src: &dyn DynMerge,
    options: &MergeOptions,
) -> MergeResult<()> {
    dst.merge_dyn(src, options)
}
