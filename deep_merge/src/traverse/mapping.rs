//! Key-value mappings merged entry by entry.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::{DeepMerge, MergeContext, Shape};
use crate::MergeResult;

/// Minimal map surface the entry-wise merge needs.
pub(crate) trait MapEntries {
    type Key: Clone;
    type Value: DeepMerge;

    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
    fn entry_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Value>;
    fn put(&mut self, key: Self::Key, value: Self::Value);
}

/// Returns `true` for source values that carry nothing to merge: unset
/// optionals and empty containers.
fn is_unset<V: DeepMerge>(value: &V) -> bool {
    matches!(
        value.shape(),
        Shape::Optional | Shape::Sequence | Shape::Mapping
    ) && value.is_empty_value()
}

/// Merges every entry of `src` into `dst`.
///
/// Nested records, optionals and mappings already present in `dst` are merged
/// in place first. The source value is then copied when it is non-empty and
/// the call overwrites, the key is missing, or the existing value is empty.
pub(crate) fn merge_map<M: MapEntries>(
    dst: &mut M,
    src: &M,
    ctx: &mut MergeContext<'_>,
) -> MergeResult<()> {
    for (key, incoming) in src.entries() {
        if is_unset(incoming) {
            continue;
        }
        let should_assign = match dst.entry_mut(key) {
            Some(existing) => {
                if incoming.shape().merges_in_place() {
                    ctx.merge_child(existing, incoming)?;
                }
                !incoming.is_empty_value() && (ctx.overwrites() || existing.is_empty_value())
            }
            None => !incoming.is_empty_value(),
        };
        if should_assign {
            dst.put(key.clone(), incoming.clone());
        }
    }
    Ok(())
}

impl<K, V, S> MapEntries for HashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: DeepMerge,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn entry_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V> MapEntries for BTreeMap<K, V>
where
    K: Ord + Clone,
    V: DeepMerge,
{
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }

    fn entry_mut(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key)
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Finds the key text of the entry whose own key renders as `key`.
fn entry_key_text<'a, K, V>(
    mut entries: impl Iterator<Item = (&'a K, &'a V)>,
    key: &str,
) -> Option<String>
where
    K: DeepMerge + 'a,
    V: DeepMerge + 'a,
{
    entries
        .find(|(candidate, _)| candidate.key_text().as_deref() == Some(key))
        .and_then(|(_, value)| value.key_text())
}

impl<K, V, S> DeepMerge for HashMap<K, V, S>
where
    K: DeepMerge + Eq + Hash,
    V: DeepMerge,
    S: BuildHasher + Clone,
{
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        merge_map(self, src, ctx)
    }

    fn list_key(&self, key: &str) -> Option<String> {
        entry_key_text(self.iter(), key)
    }
}

impl<K, V> DeepMerge for BTreeMap<K, V>
where
    K: DeepMerge + Ord,
    V: DeepMerge,
{
    fn shape(&self) -> Shape {
        Shape::Mapping
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn deep_merge(&mut self, src: &Self, ctx: &mut MergeContext<'_>) -> MergeResult<()> {
        merge_map(self, src, ctx)
    }

    fn list_key(&self, key: &str) -> Option<String> {
        entry_key_text(self.iter(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{merge, merge_with_overwrite};
    use anyhow::{Result, ensure};
    use rstest::rstest;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    fn map<const N: usize>(entries: [(&str, &str); N]) -> BTreeMap<String, String> {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    #[rstest]
    fn fill_only_adds_missing_and_empty_entries() -> Result<()> {
        let mut dst = map([("a", "kept"), ("b", "")]);
        let src = map([("a", "lost"), ("b", "filled"), ("c", "added"), ("d", "")]);
        merge(&mut dst, &src, "")?;
        ensure!(
            dst == map([("a", "kept"), ("b", "filled"), ("c", "added")]),
            "unexpected map: {dst:?}"
        );
        Ok(())
    }

    #[rstest]
    fn overwrite_replaces_non_empty_entries() -> Result<()> {
        let mut dst = map([("a", "old"), ("b", "stay")]);
        let src = map([("a", "new"), ("b", "")]);
        merge_with_overwrite(&mut dst, &src, "")?;
        ensure!(dst == map([("a", "new"), ("b", "stay")]), "unexpected map: {dst:?}");
        Ok(())
    }

    #[rstest]
    fn nested_maps_merge_before_assignment() -> Result<()> {
        let mut dst: HashMap<String, HashMap<String, i32>> =
            HashMap::from([("a".to_owned(), HashMap::from([("y".to_owned(), 2)]))]);
        let src = HashMap::from([("a".to_owned(), HashMap::from([("x".to_owned(), 1)]))]);
        merge(&mut dst, &src, "")?;
        let inner = dst.get("a").cloned().unwrap_or_default();
        ensure!(
            inner == HashMap::from([("x".to_owned(), 1), ("y".to_owned(), 2)]),
            "unexpected nested map: {inner:?}"
        );
        Ok(())
    }

    #[rstest]
    fn unset_source_values_are_skipped() -> Result<()> {
        let mut dst = BTreeMap::from([("a".to_owned(), Some(1_u8))]);
        let src = BTreeMap::from([("a".to_owned(), None), ("b".to_owned(), None)]);
        merge_with_overwrite(&mut dst, &src, "")?;
        ensure!(
            dst == BTreeMap::from([("a".to_owned(), Some(1))]),
            "unexpected map: {dst:?}"
        );
        Ok(())
    }

    #[rstest]
    fn sequences_inside_maps_are_replaced_not_merged() -> Result<()> {
        let mut dst = BTreeMap::from([("a".to_owned(), vec![1_u8])]);
        let src = BTreeMap::from([("a".to_owned(), vec![2_u8, 3])]);
        merge(&mut dst, &src, "")?;
        ensure!(dst.get("a") == Some(&vec![1]), "fill-only must keep {dst:?}");
        merge_with_overwrite(&mut dst, &src, "")?;
        ensure!(dst.get("a") == Some(&vec![2, 3]), "overwrite must replace {dst:?}");
        Ok(())
    }

    #[rstest]
    fn list_key_reads_the_named_entry() {
        let entry = map([("id", "7"), ("name", "x")]);
        assert_eq!(entry.list_key("id").as_deref(), Some("7"));
        assert_eq!(entry.list_key("missing"), None);
    }

    #[rstest]
    fn arc_entries_are_inserted_even_when_the_pointee_is_empty() -> Result<()> {
        let mut dst: BTreeMap<String, Arc<String>> = BTreeMap::new();
        let src = BTreeMap::from([("a".to_owned(), Arc::new(String::new()))]);
        merge_with_overwrite(&mut dst, &src, "")?;
        ensure!(
            dst.get("a").is_some_and(|value| value.is_empty()),
            "handle must be inserted: {dst:?}"
        );
        Ok(())
    }

    #[rstest]
    fn shared_entries_are_inserted_by_fill_only_merges() -> Result<()> {
        let node = Rc::new(RefCell::new(String::new()));
        let mut dst: BTreeMap<String, Rc<RefCell<String>>> = BTreeMap::new();
        let src = BTreeMap::from([("a".to_owned(), Rc::clone(&node))]);
        merge(&mut dst, &src, "")?;
        ensure!(
            dst.get("a").is_some_and(|value| Rc::ptr_eq(value, &node)),
            "shared node must be inserted: {dst:?}"
        );
        Ok(())
    }
}
