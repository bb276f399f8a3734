//! Optional and reference-like values.
//!
//! `Option<T>` follows the optional rule: an unset source is ignored, an
//! unset destination (or an overwriting call) takes the source, and otherwise
//! the merge continues into the inner values. `Arc<T>` is always set, so an
//! overwriting call shares the source and any other call continues into the
//! pointee. `Box<T>` owns its pointee outright and is transparent.
//!
//! A handle always refers to a value, so `Arc<T>` and `Rc<RefCell<T>>` are
//! never empty, even when their pointee is.
//!
//! `Rc<RefCell<T>>` is the one handle that can alias or form cycles inside a
//! destination graph, so it is the one guarded by the visited set.

use std::any::type_name;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::trace;

use super::{DeepMerge, MergeContext, Shape};
use crate::{MergeError, MergeResult};

impl<T: DeepMerge> DeepMerge for Option<T> {
    fn shape(&self) -> Shape {
        Shape::Optional
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        let Some(incoming) = src else {
            return Ok(());
        };
        match self {
            Some(existing) if !ctx.overwrites() => ctx.merge_child(existing, incoming),
            _ => {
                *self = Some(incoming.clone());
                Ok(())
            }
        }
    }

    fn key_text(&self) -> Option<String> {
        self.as_ref().and_then(DeepMerge::key_text)
    }

    fn list_key(&self, key: &str) -> Option<String> {
        self.as_ref().and_then(|inner| inner.list_key(key))
    }
}

impl<T: DeepMerge> DeepMerge for Box<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        (**self).deep_merge(src, ctx)
    }

    fn key_text(&self) -> Option<String> {
        (**self).key_text()
    }

    fn list_key(&self, key: &str) -> Option<String> {
        (**self).list_key(key)
    }
}

impl<T: DeepMerge> DeepMerge for Arc<T> {
    fn shape(&self) -> Shape {
        Shape::Optional
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        if ctx.overwrites() {
            *self = Self::clone(src);
            return Ok(());
        }
        if Self::ptr_eq(self, src) {
            return Ok(());
        }
        ctx.merge_child(Self::make_mut(self), &**src)
    }

    fn key_text(&self) -> Option<String> {
        (**self).key_text()
    }

    fn list_key(&self, key: &str) -> Option<String> {
        (**self).list_key(key)
    }
}

impl<T: DeepMerge + 'static> DeepMerge for Rc<RefCell<T>> {
    fn shape(&self) -> Shape {
        Shape::Optional
    }

    fn is_empty_value(&self) -> bool {
        false
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        if ctx.overwrites() {
            *self = Rc::clone(src);
            return Ok(());
        }
        if !ctx.first_visit(self) {
            trace!(node = type_name::<T>(), "shared node already visited");
            return Ok(());
        }
        // A first visit cannot collide with a destination borrow taken by
        // this traversal, only with a source read further up or a caller.
        let Ok(mut target) = self.try_borrow_mut() else {
            if !ctx.is_reading(self) {
                return Err(MergeError::invalid_destination::<Self>());
            }
            trace!(node = type_name::<T>(), "shared node is being read as a source");
            return Ok(());
        };
        let Ok(source) = src.try_borrow() else {
            trace!(node = type_name::<T>(), "source node aliases the destination");
            return Ok(());
        };
        let started = ctx.begin_read(src);
        let result = ctx.merge_child(&mut *target, &*source);
        if started {
            ctx.end_read(src);
        }
        result
    }

    fn key_text(&self) -> Option<String> {
        self.try_borrow().ok().and_then(|node| node.key_text())
    }

    fn list_key(&self, key: &str) -> Option<String> {
        self.try_borrow().ok().and_then(|node| node.list_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MergeOptions, merge, merge_with_options, merge_with_overwrite};
    use rstest::rstest;

    #[rstest]
    #[case::unset_source(Some(1), None, false, Some(1))]
    #[case::unset_destination(None, Some(2), false, Some(2))]
    #[case::recurse_keeps_value(Some(1), Some(2), false, Some(1))]
    #[case::recurse_fills_zero(Some(0), Some(2), false, Some(2))]
    #[case::overwrite(Some(1), Some(2), true, Some(2))]
    fn options_follow_the_optional_rule(
        #[case] dst: Option<u32>,
        #[case] src: Option<u32>,
        #[case] overwrite: bool,
        #[case] expected: Option<u32>,
    ) -> MergeResult<()> {
        let mut value = dst;
        merge_with_options(&mut value, &src, &MergeOptions::new().overwrite(overwrite))?;
        assert_eq!(value, expected);
        Ok(())
    }

    #[rstest]
    fn boxes_are_transparent() -> MergeResult<()> {
        let mut boxed = Box::new(String::new());
        merge(&mut boxed, &Box::new(String::from("inner")), "")?;
        assert_eq!(*boxed, "inner");
        assert_eq!(boxed.shape(), Shape::Scalar);
        Ok(())
    }

    #[rstest]
    fn arc_copies_on_write_when_shared() -> MergeResult<()> {
        let original = Arc::new(String::new());
        let mut dst = Arc::clone(&original);
        merge(&mut dst, &Arc::new(String::from("filled")), "")?;
        assert_eq!(*dst, "filled");
        assert_eq!(*original, "");
        Ok(())
    }

    #[rstest]
    fn arc_overwrite_shares_the_source() -> MergeResult<()> {
        let src = Arc::new(String::from("shared"));
        let mut dst = Arc::new(String::from("old"));
        merge_with_overwrite(&mut dst, &src, "")?;
        assert!(Arc::ptr_eq(&dst, &src));
        Ok(())
    }

    #[rstest]
    fn shared_nodes_merge_through_the_cell() -> MergeResult<()> {
        let node = Rc::new(RefCell::new(String::new()));
        let mut dst = Rc::clone(&node);
        merge(&mut dst, &Rc::new(RefCell::new(String::from("x"))), "")?;
        assert_eq!(*node.borrow(), "x");
        Ok(())
    }

    #[rstest]
    fn merging_a_shared_node_into_itself_is_a_no_op() -> MergeResult<()> {
        let node = Rc::new(RefCell::new(String::from("same")));
        let mut dst = Rc::clone(&node);
        merge(&mut dst, &node, "")?;
        assert_eq!(*node.borrow(), "same");
        Ok(())
    }

    #[rstest]
    fn borrowed_root_is_rejected() {
        let node = Rc::new(RefCell::new(String::new()));
        let mut dst = Rc::clone(&node);
        let guard = node.borrow();
        let result = merge(&mut dst, &Rc::new(RefCell::new(String::from("x"))), "");
        assert!(matches!(result, Err(MergeError::InvalidDestination { .. })));
        drop(guard);
        assert_eq!(*node.borrow(), "");
    }

    #[rstest]
    fn borrowed_node_below_the_root_is_rejected() {
        let node = Rc::new(RefCell::new(String::new()));
        let mut dst = Some(Rc::clone(&node));
        let guard = node.borrow();
        let result = merge(&mut dst, &Some(Rc::new(RefCell::new(String::from("x")))), "");
        assert!(matches!(result, Err(MergeError::InvalidDestination { .. })));
        drop(guard);
        assert_eq!(*node.borrow(), "");
    }

    #[rstest]
    fn handles_to_empty_values_are_not_empty() {
        assert!(!Arc::new(String::new()).is_empty_value());
        assert!(!Rc::new(RefCell::new(Vec::<u8>::new())).is_empty_value());
        assert!(Option::<Arc<String>>::None.is_empty_value());
    }
}
