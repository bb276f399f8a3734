//! Input parsing for the `DeepMerge` derive macro.
//!
//! This module gathers the struct identifier, fields, and attribute metadata
//! in one pass so expansion can fail fast with useful errors.

use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields, Generics, Index, Member};

use super::{StructAttrs, parse_field_attrs, parse_struct_attrs};

/// A struct field as seen by the generator.
pub(crate) struct MergeField {
    /// Accessor used as `self.#member`.
    pub member: Member,
    /// Name matched against a list key.
    pub key: String,
    pub skip: bool,
}

/// Everything the generator needs to know about the deriving struct.
pub(crate) struct Record {
    pub ident: syn::Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<MergeField>,
}

impl Record {
    /// Fields that take part in merging.
    pub(crate) fn merged_fields(&self) -> impl Iterator<Item = &MergeField> {
        self.fields.iter().filter(|field| !field.skip)
    }
}

fn member_of(field: &syn::Field, position: usize) -> (Member, String) {
    field.ident.as_ref().map_or_else(
        || {
            let index = Index {
                index: u32::try_from(position).unwrap_or(u32::MAX),
                span: Span::call_site(),
            };
            (Member::Unnamed(index), position.to_string())
        },
        |ident| {
            let name = ident.to_string();
            let key = name.strip_prefix("r#").map_or_else(|| name.clone(), str::to_owned);
            (Member::Named(ident.clone()), key)
        },
    )
}

/// Gathers information from the user-provided struct.
///
/// Enums and unions are rejected because a record merges a fixed set of
/// fields.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<Record> {
    let attrs = parse_struct_attrs(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new_spanned(
                data.enum_token,
                "DeepMerge can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new_spanned(
                data.union_token,
                "DeepMerge can only be derived for structs",
            ));
        }
    };
    let fields = match fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unnamed(unnamed) => unnamed.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };

    let mut merge_fields = Vec::with_capacity(fields.len());
    for (position, field) in fields.into_iter().enumerate() {
        let field_attrs = parse_field_attrs(&field.attrs)?;
        let (member, name) = member_of(field, position);
        merge_fields.push(MergeField {
            member,
            key: field_attrs.rename.unwrap_or(name),
            skip: field_attrs.skip,
        });
    }

    Ok(Record {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs,
        fields: merge_fields,
    })
}
