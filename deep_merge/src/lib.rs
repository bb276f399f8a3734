//! Recursive structural merging of same-typed values.
//!
//! `deep_merge` copies data from a source value into a destination value of
//! the same type, field by field and container by container. By default only
//! empty destination values are filled; with overwriting enabled every
//! non-empty source value wins. Sequences of records or mappings can be
//! reconciled element by element through a designated list key.
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use deep_merge::{DeepMerge, merge};
//!
//! #[derive(Clone, Debug, Default, PartialEq, DeepMerge)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     labels: BTreeMap<String, String>,
//! }
//!
//! let mut dst = Server {
//!     host: "localhost".into(),
//!     ..Server::default()
//! };
//! let src = Server {
//!     host: "example.org".into(),
//!     port: 8080,
//!     labels: BTreeMap::from([("tier".into(), "web".into())]),
//! };
//!
//! merge(&mut dst, &src, "")?;
//! assert_eq!(dst.host, "localhost");
//! assert_eq!(dst.port, 8080);
//! assert_eq!(dst.labels.len(), 1);
//! # Ok::<_, deep_merge::MergeError>(())
//! ```
//!
//! The actual implementation of the derive macro lives in the companion
//! `deep_merge_macros` crate.

extern crate self as deep_merge;

pub use deep_merge_macros::DeepMerge;

mod dynamic;
mod error;
mod options;
mod traverse;
#[cfg(any(feature = "serde_json", feature = "toml"))]
mod value;

pub use dynamic::{DynMerge, merge_dyn};
pub use error::{ListSide, MergeError, MergeResult};
pub use options::MergeOptions;
pub use traverse::{DeepMerge, MergeContext, Shape, merge_leaf};

use std::any::type_name;

use tracing::debug;

/// Fills every empty value of `dst` from the matching value of `src`.
///
/// `key` names the field or entry used to reconcile sequences of records or
/// mappings element by element; an empty key replaces such sequences
/// wholesale instead.
///
/// # Errors
///
/// Returns a [`MergeError`] when the traversal fails; `dst` may be partially
/// updated.
pub fn merge<T: DeepMerge>(dst: &mut T, src: &T, key: &str) -> MergeResult<()> {
    merge_with_options(dst, src, &MergeOptions::new().with_list_key(key))
}

/// Like [`merge`], but non-empty source values replace non-empty
/// destination values.
///
/// # Examples
///
/// ```rust
/// use deep_merge::{DeepMerge, merge_with_overwrite};
///
/// #[derive(Clone, Debug, PartialEq, DeepMerge)]
/// struct Limits {
///     retries: u8,
///     timeout_secs: u32,
/// }
///
/// let mut dst = Limits { retries: 3, timeout_secs: 30 };
/// merge_with_overwrite(&mut dst, &Limits { retries: 5, timeout_secs: 0 }, "")?;
/// assert_eq!(dst, Limits { retries: 5, timeout_secs: 30 });
/// # Ok::<_, deep_merge::MergeError>(())
/// ```
///
/// # Errors
///
/// Returns a [`MergeError`] when the traversal fails; `dst` may be partially
/// updated.
pub fn merge_with_overwrite<T: DeepMerge>(dst: &mut T, src: &T, key: &str) -> MergeResult<()> {
    merge_with_options(
        dst,
        src,
        &MergeOptions::new().overwrite(true).with_list_key(key),
    )
}

/// Merges `src` into `dst` under an explicit policy.
///
/// # Errors
///
/// Returns a [`MergeError`] when the traversal fails; `dst` may be partially
/// updated. Use [`merge_transactional`] when that is unacceptable.
pub fn merge_with_options<T: DeepMerge>(
    dst: &mut T,
    src: &T,
    options: &MergeOptions,
) -> MergeResult<()> {
    debug!(
        ty = type_name::<T>(),
        overwrite = options.overwrites(),
        list_key = options.list_key().unwrap_or_default(),
        "merging values"
    );
    let mut ctx = MergeContext::new(options);
    dst.deep_merge(src, &mut ctx)
}

/// Merges into a copy of `dst` and commits the copy only on success.
///
/// Shared nodes (`Rc<RefCell<T>>`) inside `dst` are shared with the copy, so
/// changes made through them before a failure remain visible.
///
/// # Examples
///
/// ```rust
/// use deep_merge::{DeepMerge, MergeError, MergeOptions, merge_transactional};
///
/// #[derive(Clone, Debug, Default, PartialEq, DeepMerge)]
/// struct Profile {
///     name: String,
///     nickname: Option<Option<String>>,
/// }
///
/// let mut dst = Profile { name: String::new(), nickname: Some(None) };
/// let src = Profile { name: "ada".into(), nickname: Some(Some("countess".into())) };
/// let options = MergeOptions::new().with_max_depth(1);
///
/// let result = merge_transactional(&mut dst, &src, &options);
/// assert_eq!(result, Err(MergeError::DepthLimitExceeded { limit: 1 }));
/// assert_eq!(dst.name, "");
/// ```
///
/// # Errors
///
/// Returns a [`MergeError`] when the traversal fails; `dst` is left as it
/// was.
pub fn merge_transactional<T: DeepMerge>(
    dst: &mut T,
    src: &T,
    options: &MergeOptions,
) -> MergeResult<()> {
    let mut staged = dst.clone();
    merge_with_options(&mut staged, src, options)?;
    *dst = staged;
    Ok(())
}
