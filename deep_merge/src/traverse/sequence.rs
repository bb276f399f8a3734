//! Ordered sequences.

use tracing::debug;

use super::reconcile::KeyedList;
use super::{DeepMerge, MergeContext, Shape};
use crate::MergeResult;

/// Merges `src` into `dst`, reconciling by key when possible.
///
/// Keyed reconciliation applies when a list key is configured and the
/// elements are records or mappings. Otherwise, or when an element lacks the
/// key, `dst` is replaced by `src` if `src` is non-empty and the call
/// overwrites or `dst` is empty.
pub(crate) fn merge_sequence<T: DeepMerge>(
    dst: &mut Vec<T>,
    src: &[T],
    ctx: &mut MergeContext<'_>,
) -> MergeResult<()> {
    if let Some(key) = ctx.list_key() {
        let element_shape = dst.first().or_else(|| src.first()).map(DeepMerge::shape);
        if element_shape.is_some_and(Shape::is_keyable) {
            match KeyedList::index(dst, src, key) {
                Ok(Some(list)) => return list.reconcile(dst, src, ctx),
                Ok(None) => {}
                Err(err) if ctx.is_strict() => return Err(err),
                Err(err) => debug!(error = %err, "keyed list unavailable, replacing sequence"),
            }
        }
    }
    if !src.is_empty() && (ctx.overwrites() || dst.is_empty()) {
        dst.clear();
        dst.extend_from_slice(src);
    }
    Ok(())
}

impl<T: DeepMerge> DeepMerge for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::Sequence
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        merge_sequence(self, src, ctx)
    }
}
