//! Procedural macros for `deep_merge`.
//!
//! The [`DeepMerge`] derive implements `deep_merge::DeepMerge` for structs
//! with named or positional fields. Each field is merged in declaration
//! order; fields marked `#[deep_merge(skip)]` are left alone and take no
//! part in emptiness checks or list-key lookup.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `deep_merge::DeepMerge`.
///
/// Struct attribute:
///
/// - `#[deep_merge(crate = "path")]` reaches the runtime crate through a
///   renamed dependency.
///
/// Field attributes:
///
/// - `#[deep_merge(skip)]` keeps the destination value untouched.
/// - `#[deep_merge(rename = "name")]` sets the name matched against a list
///   key when the struct is an element of a keyed sequence.
///
/// The struct must also implement `Clone`.
#[proc_macro_derive(DeepMerge, attributes(deep_merge))]
pub fn derive_deep_merge(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
