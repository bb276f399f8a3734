//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[deep_merge(crate = "...")]` attribute value into
//! the tokens that prefix every runtime path in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::deep_merge` when no override is present.
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), ":: deep_merge");
///
/// let path: syn::Path = syn::parse_str("merge_alias").unwrap();
/// let aliased = resolve(Some(&path));
/// assert_eq!(aliased.to_string(), "merge_alias");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::deep_merge }, |path| quote! { #path })
}
