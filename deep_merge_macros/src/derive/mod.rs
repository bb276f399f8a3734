//! Expansion pipeline for `#[derive(DeepMerge)]`.

mod crate_path;
mod generate;
mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Parses `input` and generates the trait implementation.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = parse::parse_input(input)?;
    let krate = crate_path::resolve(record.attrs.crate_path.as_ref());
    Ok(generate::deep_merge_impl(&record, &krate))
}
