// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Implements `#[derive(Record)]` for the `cloudmgmt-wire` crate.
//!
//! The macro generates the static field descriptor table for a struct and
//! the accessors used by the selective encoder. Use it through the
//! `cloudmgmt_wire::Record` re-export, this crate is an implementation detail.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Data, DeriveInput, Fields, LitStr, Token, parse_macro_input};

#[proc_macro_derive(Record, attributes(wire))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// The options for one field, from `#[wire(...)]` and `#[serde(...)]`.
#[derive(Debug, Default)]
struct FieldOptions {
    rename: Option<String>,
    skip: bool,
    string: bool,
    flatten: bool,
    directives: bool,
}

impl FieldOptions {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut wire = FieldOptions::default();
        let mut serde = FieldOptions::default();
        for attr in &field.attrs {
            if attr.path().is_ident("wire") {
                attr.parse_nested_meta(|meta| wire.parse_wire(meta))?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| serde.parse_serde(meta))?;
            }
        }
        Ok(Self {
            rename: wire.rename.or(serde.rename),
            skip: wire.skip || serde.skip,
            string: wire.string,
            flatten: wire.flatten || serde.flatten,
            directives: wire.directives,
        })
    }

    fn parse_wire(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        match meta.path.get_ident().map(|i| i.to_string()).as_deref() {
            Some("rename") => {
                let value: LitStr = meta.value()?.parse()?;
                self.rename = Some(value.value());
            }
            Some("skip") => self.skip = true,
            Some("string") => self.string = true,
            Some("flatten") => self.flatten = true,
            Some("directives") => self.directives = true,
            _ => return Err(meta.error("unsupported wire attribute")),
        }
        Ok(())
    }

    // Only a few serde attributes affect the request body, the rest are
    // consumed and ignored.
    fn parse_serde(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        match meta.path.get_ident().map(|i| i.to_string()).as_deref() {
            Some("rename") if meta.input.peek(Token![=]) => {
                let value: LitStr = meta.value()?.parse()?;
                self.rename = Some(value.value());
            }
            Some("rename") => meta.parse_nested_meta(|inner| {
                if inner.path.is_ident("serialize") {
                    let value: LitStr = inner.value()?.parse()?;
                    self.rename = Some(value.value());
                    return Ok(());
                }
                skip_value(&inner)
            })?,
            Some("skip" | "skip_serializing") => self.skip = true,
            Some("flatten") => self.flatten = true,
            _ => skip_value(&meta)?,
        }
        Ok(())
    }
}

fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Lit = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _: proc_macro2::Group = meta.input.parse()?;
    }
    Ok(())
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Record requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let name = &input.ident;
    let type_name = name.to_string();
    let mut descriptors = Vec::new();
    let mut accessors = Vec::new();
    let mut bounds = Vec::new();
    let mut directives = None;
    for (index, field) in fields.iter().enumerate() {
        let options = FieldOptions::parse(field)?;
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let source_name = ident.unraw().to_string();
        if options.directives {
            if directives.is_some() {
                return Err(syn::Error::new_spanned(
                    ident,
                    "only one field can have #[wire(directives)]",
                ));
            }
            directives = Some(ident.clone());
            descriptors.push(quote! {
                ::cloudmgmt_wire::FieldDescriptor::ignored(#source_name)
            });
            continue;
        }
        if options.skip {
            descriptors.push(quote! {
                ::cloudmgmt_wire::FieldDescriptor::ignored(#source_name)
            });
            continue;
        }
        let descriptor = if options.flatten {
            quote! { ::cloudmgmt_wire::FieldDescriptor::embedded(#source_name) }
        } else {
            let key = options
                .rename
                .unwrap_or_else(|| lower_camel_case(&source_name));
            match options.string {
                true => quote! {
                    ::cloudmgmt_wire::FieldDescriptor::new(#source_name, #key).with_string_encoding()
                },
                false => quote! { ::cloudmgmt_wire::FieldDescriptor::new(#source_name, #key) },
            }
        };
        descriptors.push(descriptor);
        accessors.push(quote! {
            #index => ::core::option::Option::Some(&self.#ident),
        });
        let ty = &field.ty;
        bounds.push(quote! { #ty: ::cloudmgmt_wire::Field });
    }

    let directives = match directives {
        Some(ident) => quote! { &self.#ident },
        None => quote! { ::cloudmgmt_wire::Directives::empty() },
    };
    let count = descriptors.len();

    let mut generics = input.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for bound in &bounds {
            where_clause.predicates.push(syn::parse2(bound.clone())?);
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::cloudmgmt_wire::Record for #name #ty_generics #where_clause {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn descriptors(&self) -> &'static [::cloudmgmt_wire::FieldDescriptor] {
                static DESCRIPTORS: [::cloudmgmt_wire::FieldDescriptor; #count] = [
                    #(#descriptors),*
                ];
                &DESCRIPTORS
            }

            fn directives(&self) -> &::cloudmgmt_wire::Directives {
                #directives
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn ::cloudmgmt_wire::Field> {
                match index {
                    #(#accessors)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics ::cloudmgmt_wire::Field for #name #ty_generics #where_clause {
            fn probe(&self) -> ::cloudmgmt_wire::Probe {
                ::cloudmgmt_wire::internal::probe_record(self)
            }

            fn encode(
                &self,
                _string_encode: bool,
            ) -> ::cloudmgmt_wire::Result<::cloudmgmt_wire::internal::Value> {
                ::cloudmgmt_wire::internal::encode_record(self)
            }

            fn encode_zero(&self, _string_encode: bool) -> ::cloudmgmt_wire::internal::Value {
                ::cloudmgmt_wire::internal::empty_object()
            }

            fn as_record(&self) -> ::core::option::Option<&dyn ::cloudmgmt_wire::Record> {
                ::core::option::Option::Some(self)
            }

            fn kind_of() -> ::cloudmgmt_wire::Kind {
                ::cloudmgmt_wire::Kind::Record
            }

            fn zero_of(_string_encode: bool) -> ::cloudmgmt_wire::internal::Value {
                ::cloudmgmt_wire::internal::empty_object()
            }
        }
    })
}

/// Converts a `snake_case` field name to `lowerCamelCase`.
fn lower_camel_case(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.trim_start_matches('_').chars() {
        match c {
            '_' => upper = true,
            c if upper => {
                output.extend(c.to_uppercase());
                upper = false;
            }
            c => output.push(c),
        }
    }
    output
}
