// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `ProcedureInput` implementation generation.
//!
//! `read_field` has one arm per `in` or `inout` parameter; `out` parameters
//! stay in the layout but are never read, so their types need no `ToValue`.

use proc_macro2::TokenStream;
use quote::quote;

use super::{layout, parse::ProcedureDef};

/// Generate `impl ProcedureInput`.
pub fn generate(def: &ProcedureDef) -> TokenStream {
    let ident = &def.ident;
    let (impl_generics, ty_generics, where_clause) = def.generics.split_for_impl();
    let type_name = def.type_name();
    let layout = layout::generate(def);

    let arms = def.fields.iter().filter(|f| f.is_input_param()).map(|field| {
        let name = field.name();
        let member = &field.ident;
        quote! {
            #name => ::core::result::Result::Ok(::procedure_core::ToValue::to_value(&self.#member)),
        }
    });

    quote! {
        impl #impl_generics ::procedure_core::ProcedureInput for #ident #ty_generics #where_clause {
            fn layout() -> ::procedure_core::TypeLayout {
                #layout
            }

            fn read_field(
                &self,
                field: &str
            ) -> ::core::result::Result<::procedure_core::Value, ::procedure_core::MarshalError> {
                match field {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::procedure_core::MarshalError::unknown_field(#type_name, field)
                    )
                }
            }
        }
    }
}
