//! Keyed list reconciliation.
//!
//! Elements of two sequences are matched by the text of a designated key
//! field or entry. A forward pass merges each destination element with the
//! first source element sharing its key. A backward pass then walks the
//! source elements the forward pass did not consume, merging each into the
//! first destination element with the same key or appending it when none
//! exists. The destination ends up holding the union of both lists.

use tracing::trace;

use super::{DeepMerge, MergeContext};
use crate::{ListSide, MergeError, MergeResult};

/// Key texts of both sequences, read before anything is mutated.
#[derive(Debug)]
pub(crate) struct KeyedList<'k> {
    key: &'k str,
    dst_keys: Vec<String>,
    src_keys: Vec<String>,
}

fn key_texts<T: DeepMerge>(items: &[T], key: &str, side: ListSide) -> MergeResult<Vec<String>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.list_key(key)
                .ok_or_else(|| MergeError::keyed_list_diff(key, side, index))
        })
        .collect()
}

impl<'k> KeyedList<'k> {
    /// Reads the key of every element on both sides.
    ///
    /// Returns `None` when the source is empty, or when the destination is
    /// empty and some source element lacks the key. Both leave the
    /// replacement rule in charge. An empty destination with keyed sources
    /// is still reconciled, so duplicate source keys collapse into one
    /// element.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::KeyedListDiff`] naming the first element that
    /// lacks the key.
    pub(crate) fn index<T: DeepMerge>(
        dst: &[T],
        src: &[T],
        key: &'k str,
    ) -> MergeResult<Option<Self>> {
        if src.is_empty() {
            return Ok(None);
        }
        let dst_keys = key_texts(dst, key, ListSide::Destination)?;
        let src_keys = match key_texts(src, key, ListSide::Source) {
            Ok(keys) => keys,
            Err(_) if dst.is_empty() => return Ok(None),
            Err(err) => return Err(err),
        };
        Ok(Some(Self {
            key,
            dst_keys,
            src_keys,
        }))
    }

    /// Runs the forward and backward passes.
    pub(crate) fn reconcile<T: DeepMerge>(
        self,
        dst: &mut Vec<T>,
        src: &[T],
        ctx: &mut MergeContext<'_>,
    ) -> MergeResult<()> {
        trace!(
            key = self.key,
            dst_len = dst.len(),
            src_len = src.len(),
            "reconciling keyed list"
        );
        let consumed = self.merge_matches(dst, src, ctx)?;
        self.union_remaining(dst, src, &consumed, ctx)
    }

    /// Merges each destination element with its first keyed match in `src`,
    /// returning the source positions consumed.
    fn merge_matches<T: DeepMerge>(
        &self,
        dst: &mut [T],
        src: &[T],
        ctx: &mut MergeContext<'_>,
    ) -> MergeResult<Vec<usize>> {
        let mut consumed = Vec::new();
        for (existing, key) in dst.iter_mut().zip(&self.dst_keys) {
            let matched = self
                .src_keys
                .iter()
                .zip(src)
                .enumerate()
                .find(|(_, (candidate, _))| *candidate == key);
            if let Some((index, (_, incoming))) = matched {
                consumed.push(index);
                ctx.merge_child(existing, incoming)?;
            }
        }
        Ok(consumed)
    }

    /// Merges or appends every source element not consumed by the forward
    /// pass.
    fn union_remaining<T: DeepMerge>(
        mut self,
        dst: &mut Vec<T>,
        src: &[T],
        consumed: &[usize],
        ctx: &mut MergeContext<'_>,
    ) -> MergeResult<()> {
        for (index, (incoming, key)) in src.iter().zip(&self.src_keys).enumerate() {
            if consumed.contains(&index) {
                continue;
            }
            let target = self.dst_keys.iter().position(|candidate| candidate == key);
            match target.and_then(|position| dst.get_mut(position)) {
                Some(existing) => ctx.merge_child(existing, incoming)?,
                None => {
                    trace!(key = self.key, value = %key, "appending unmatched element");
                    dst.push(incoming.clone());
                    self.dst_keys.push(key.clone());
                }
            }
        }
        Ok(())
    }
}
