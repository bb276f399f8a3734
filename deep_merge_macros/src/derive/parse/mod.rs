//! Attribute and input parsing for the `DeepMerge` derive macro.

mod input;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

pub(crate) use input::{Record, parse_input};

/// Struct-level `#[deep_merge(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    pub crate_path: Option<syn::Path>,
}

/// Field-level `#[deep_merge(...)]` settings.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub skip: bool,
    pub rename: Option<String>,
}

/// Iterate all `#[deep_merge(...)]` attributes once and apply a callback.
fn parse_deep_merge<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("deep_merge")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    meta.value()?
        .parse::<LitStr>()
        .map_err(|err| syn::Error::new(err.span(), format!("{key} must be a string")))
}

fn unknown_key(meta: &ParseNestedMeta, expected: &str) -> syn::Error {
    let name = meta
        .path
        .get_ident()
        .map_or_else(|| String::from("attribute"), ToString::to_string);
    meta.error(format!("unknown deep_merge key `{name}`; expected {expected}"))
}

/// Extracts `#[deep_merge(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; any other key is rejected.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_deep_merge(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path = s.parse()?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(unknown_key(meta, "`crate`"))
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[deep_merge(...)]` attributes.
///
/// Recognised keys are `skip` and `rename = "..."`; any other key is
/// rejected.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_deep_merge(attrs, |meta| {
        if meta.path.is_ident("skip") {
            out.skip = true;
            Ok(())
        } else if meta.path.is_ident("rename") {
            let s = lit_str(meta, "rename")?;
            if s.value().is_empty() {
                return Err(syn::Error::new(s.span(), "rename must not be empty"));
            }
            out.rename = Some(s.value());
            Ok(())
        } else {
            Err(unknown_key(meta, "`skip` or `rename`"))
        }
    })?;
    Ok(out)
}
