// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `TypeLayout` builder expression shared by both derives.
//!
//! ```text
//! ::procedure_core::TypeLayout::named("GetUser")
//!     .procedure(ProcedureDescriptor::new("get_user").with_schema("hr"))
//!     .parameter(ParameterDescriptor::new("user_id", Direction::In, 4).named("userId"))
//!     .result_set(ResultSetDescriptor::new("orders", "orders", RowType::of::<OrderRow>()))
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{FieldDef, ProcedureDef};

/// Generate the body of `layout()`.
pub fn generate(def: &ProcedureDef) -> TokenStream {
    let type_name = def.type_name();
    let procedure = def.procedure.as_ref().map(|procedure| {
        let name = &procedure.name;
        let schema = procedure
            .schema
            .as_ref()
            .map(|schema| quote! { .with_schema(#schema) });
        quote! {
            .procedure(::procedure_core::ProcedureDescriptor::new(#name) #schema)
        }
    });
    let parameters = def.params().map(|field| parameter(def, field));
    let result_sets = def.result_sets().map(|(field, config)| {
        let field_name = field.name();
        let name = &config.name;
        let row = &config.row;
        quote! {
            .result_set(::procedure_core::ResultSetDescriptor::new(
                #field_name,
                #name,
                ::procedure_core::RowType::of::<#row>()
            ))
        }
    });

    quote! {
        ::procedure_core::TypeLayout::named(#type_name)
            #procedure
            #(#parameters)*
            #(#result_sets)*
    }
}

fn parameter(def: &ProcedureDef, field: &FieldDef) -> TokenStream {
    let Some(param) = field.param() else {
        return TokenStream::new();
    };
    let field_name = field.name();
    let direction = param.direction.tokens();
    let sql_type = &param.sql_type;
    let named = field
        .bound_name(def.rename_all)
        .map(|name| quote! { .named(#name) });

    quote! {
        .parameter(
            ::procedure_core::ParameterDescriptor::new(#field_name, #direction, #sql_type)
                #named
        )
    }
}
