//! Trybuild fixture for generic records with where clauses and skipped fields.

use std::collections::HashMap;
use std::fmt::Debug;

use deep_merge::{DeepMerge, merge_with_overwrite};

#[derive(Clone, Debug, DeepMerge)]
struct Layered<K, V>
where
    K: Clone + Eq + std::hash::Hash + Debug,
{
    entries: HashMap<K, V>,
    fallback: Option<V>,
    #[deep_merge(skip)]
    marker: std::marker::PhantomData<K>,
}

fn main() {
    let mut dst: Layered<String, u8> = Layered {
        entries: HashMap::new(),
        fallback: None,
        marker: std::marker::PhantomData,
    };
    let src = Layered {
        entries: HashMap::from([(String::from("a"), 1)]),
        fallback: Some(2),
        marker: std::marker::PhantomData,
    };
    assert!(merge_with_overwrite(&mut dst, &src, "").is_ok());
    assert_eq!(dst.entries.get("a"), Some(&1));
}
