// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `ProcedureOutput` implementation generation.
//!
//! Output types are built with `Default::default()`; every `#[param]` field,
//! whatever its direction, and every `#[result_set]` field gets a
//! `write_field` arm.
//!
//! | Marker | Conversion |
//! |--------|------------|
//! | `#[param]` | `FromValue::from_value` |
//! | `#[result_set]` | `FromRows::from_rows` |

use proc_macro2::TokenStream;
use quote::quote;

use super::{layout, parse::ProcedureDef};

/// Generate `impl ProcedureOutput`.
pub fn generate(def: &ProcedureDef) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();
    let type_name = def.type_name();
    let layout = layout::generate(def);

    let param_arms = def.params().map(|field| {
        let name = field.name();
        let member = &field.ident;
        quote! {
            #name => {
                self.#member = ::procedure_core::FromValue::from_value(value).map_err(|source| {
                    ::procedure_core::MarshalError::write(#type_name, field, source)
                })?;
                ::core::result::Result::Ok(())
            }
        }
    });
    let result_set_arms = def.result_sets().map(|(field, _)| {
        let name = field.name();
        let member = &field.ident;
        quote! {
            #name => {
                self.#member = ::procedure_core::FromRows::from_rows(value).map_err(|source| {
                    ::procedure_core::MarshalError::write(#type_name, field, source)
                })?;
                ::core::result::Result::Ok(())
            }
        }
    });

    quote! {
        impl #impl_generics ::procedure_core::ProcedureOutput for #ident #ty_generics #where_clause {
            fn layout() -> ::procedure_core::TypeLayout {
                #layout
            }

            fn construct() -> ::core::result::Result<Self, ::procedure_core::ConfigurationError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }

            #[allow(unused_variables)]
            fn write_field(
                &mut self,
                field: &str,
                value: ::procedure_core::Value
            ) -> ::core::result::Result<(), ::procedure_core::MarshalError> {
                match field {
                    #(#param_arms)*
                    #(#result_set_arms)*
                    _ => ::core::result::Result::Err(
                        ::procedure_core::MarshalError::unknown_field(#type_name, field)
                    )
                }
            }
        }
    }
}
