// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! FromRow derive macro implementation.
//!
//! Generates `procedure_core::FromRow` for result-set row types. Each field
//! is decoded from the column of the same name, or the one given with
//! `#[column(name = "...")]`. `#[column(skip)]` fields take their default.
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(FromRow, Clone)]
//! pub struct OrderRow {
//!     pub id: i64,
//!     #[column(name = "order_total")]
//!     pub total: f64,
//!     #[column(skip)]
//!     pub cached: Option<String>,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, DeriveInput, Field, Ident, LitStr, ext::IdentExt, parse_macro_input};

/// Main entry point for the FromRow derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into()
    }
}

/// Parsed row field.
struct RowField {
    /// Field identifier.
    ident:  Ident,
    /// Source column, `None` for skipped fields.
    column: Option<String>
}

impl RowField {
    fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("FromRow fields must be named").with_span(field)
        })?;
        let mut column = Some(ident.unraw().to_string());

        for attr in field.attrs.iter().filter(|a| a.path().is_ident("column")) {
            parse_column(attr, &mut column)?;
        }

        Ok(Self {
            ident,
            column
        })
    }
}

fn parse_column(attr: &Attribute, column: &mut Option<String>) -> darling::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("name") {
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(meta.error("column name must not be empty"));
            }
            *column = Some(name.value());
            Ok(())
        } else if meta.path.is_ident("skip") {
            *column = None;
            Ok(())
        } else {
            Err(meta.error("unknown column option, expected `name` or `skip`"))
        }
    })?;
    Ok(())
}

fn generate(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let type_name = ident.to_string();

    let syn::Data::Struct(data) = &input.data else {
        return Err(
            darling::Error::custom("FromRow can only be derived for structs").with_span(ident)
        );
    };
    let syn::Fields::Named(named) = &data.fields else {
        return Err(darling::Error::custom("FromRow requires named fields").with_span(ident));
    };

    let mut errors = darling::Error::accumulator();
    let fields: Vec<RowField> = named
        .named
        .iter()
        .filter_map(|field| errors.handle(RowField::from_field(field)))
        .collect();
    errors.finish()?;

    let inits = fields.iter().map(|field| {
        let member = &field.ident;
        match &field.column {
            Some(column) => quote! {
                #member: row.decode(#column).map_err(|source| {
                    ::procedure_core::MarshalError::column(#type_name, #column, source)
                })?
            },
            None => quote! { #member: ::core::default::Default::default() }
        }
    });

    Ok(quote! {
        impl #impl_generics ::procedure_core::FromRow for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn from_row(
                row: &::procedure_core::Row
            ) -> ::core::result::Result<Self, ::procedure_core::MarshalError> {
                ::core::result::Result::Ok(Self {
                    #(#inits),*
                })
            }
        }
    })
}
