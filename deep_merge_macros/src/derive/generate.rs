//! Code generation for the `DeepMerge` trait implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericParam, Generics, parse_quote};

use super::parse::Record;

/// Adds a `DeepMerge` bound to every type parameter.
fn bounded_generics(generics: &Generics, krate: &TokenStream) -> Generics {
    let mut bounded = generics.clone();
    for param in &mut bounded.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(#krate::DeepMerge));
        }
    }
    bounded
}

fn is_empty_body(record: &Record, krate: &TokenStream) -> TokenStream {
    let checks = record.merged_fields().map(|field| {
        let member = &field.member;
        quote! { #krate::DeepMerge::is_empty_value(&self.#member) }
    });
    let checks: Vec<_> = checks.collect();
    if checks.is_empty() {
        quote! { true }
    } else {
        quote! { #( #checks )&&* }
    }
}

fn deep_merge_body(record: &Record) -> TokenStream {
    let merges: Vec<_> = record
        .merged_fields()
        .map(|field| {
            let member = &field.member;
            quote! { ctx.merge_child(&mut self.#member, &src.#member)?; }
        })
        .collect();
    if merges.is_empty() {
        quote! {
            let _ = (src, ctx);
            ::core::result::Result::Ok(())
        }
    } else {
        quote! {
            #( #merges )*
            ::core::result::Result::Ok(())
        }
    }
}

fn list_key_body(record: &Record, krate: &TokenStream) -> TokenStream {
    let arms: Vec<_> = record
        .merged_fields()
        .map(|field| {
            let member = &field.member;
            let name = &field.key;
            quote! { #name => #krate::DeepMerge::key_text(&self.#member), }
        })
        .collect();
    if arms.is_empty() {
        quote! {
            let _ = key;
            ::core::option::Option::None
        }
    } else {
        quote! {
            match key {
                #( #arms )*
                _ => ::core::option::Option::None,
            }
        }
    }
}

/// Generates `impl DeepMerge` for a parsed record.
pub(crate) fn deep_merge_impl(record: &Record, krate: &TokenStream) -> TokenStream {
    let ident = &record.ident;
    let generics = bounded_generics(&record.generics, krate);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let is_empty = is_empty_body(record, krate);
    let merge = deep_merge_body(record);
    let list_key = list_key_body(record, krate);

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::DeepMerge for #ident #ty_generics #where_clause {
            fn shape(&self) -> #krate::Shape {
                #krate::Shape::Record
            }

            fn is_empty_value(&self) -> bool {
                #is_empty
            }

            fn deep_merge(
                &mut self,
                src: &Self,
                ctx: &mut #krate::MergeContext<'_>,
            ) -> #krate::MergeResult<()> {
                #merge
            }

            fn list_key(&self, key: &str) -> ::core::option::Option<::std::string::String> {
                #list_key
            }
        }
    }
}
