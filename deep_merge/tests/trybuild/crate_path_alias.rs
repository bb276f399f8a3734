//! Trybuild fixture verifying `#[deep_merge(crate = "...")]` works with a
//! dependency reached through an alias.

use deep_merge as merge_alias;
use merge_alias::DeepMerge;

/// Generated code must reference the trait through `merge_alias`.
#[derive(Clone, Debug, DeepMerge)]
#[deep_merge(crate = "merge_alias")]
struct Aliased {
    value: String,
    count: u32,
}

fn main() {
    let mut dst = Aliased {
        value: String::new(),
        count: 1,
    };
    let src = Aliased {
        value: "hello".into(),
        count: 2,
    };
    let result: merge_alias::MergeResult<()> = merge_alias::merge(&mut dst, &src, "");
    assert!(result.is_ok());
    assert_eq!(dst.value, "hello");
    assert_eq!(dst.count, 1);
}
