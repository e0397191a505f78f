// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Derive macros for stored procedure input and output types.
//!
//! This is the proc-macro half of `procedure-derive`. Depend on
//! `procedure-derive` instead; generated code refers to `::procedure_core`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Attribute Quick Reference
//!
//! ## Input types
//!
//! ```rust,ignore
//! #[derive(ProcedureInput)]
//! #[procedure(
//!     name = "get_user",        // Required: procedure name, not empty
//!     schema = "hr",            // Optional: schema qualifier
//!     rename_all = "camelCase"  // Optional: casing of derived bound names
//! )]
//! pub struct GetUser {
//!     #[param(direction = "in", sql_type = SqlType::INTEGER)]
//!     pub user_id: i32,
//!
//!     #[param(direction = "inout", sql_type = 12, name = "p_note")]
//!     pub note: String,
//!
//!     pub ignored: u8,                // No marker: not part of the call
//! }
//! ```
//!
//! ## Output types
//!
//! ```rust,ignore
//! #[derive(ProcedureOutput, Default)]
//! #[output(rename_all = "camelCase")] // Optional
//! pub struct UserResult {
//!     #[param(direction = "out", sql_type = SqlType::VARCHAR)]
//!     pub user_name: Option<String>,
//!
//!     #[result_set(name = "orders")]  // Row type inferred from Vec<T>
//!     pub orders: Vec<OrderRow>,
//! }
//!
//! #[derive(FromRow, Clone)]
//! pub struct OrderRow {
//!     pub id: i64,
//!     #[column(name = "order_total")]
//!     pub total: f64,
//! }
//! ```

mod procedure;
mod row;

use proc_macro::TokenStream;

/// Derive macro for stored procedure input types.
///
/// # Attributes
///
/// | Attribute | Required | Description |
/// |-----------|----------|-------------|
/// | `#[procedure(name = "...")]` | **Yes** | Procedure name |
/// | `#[procedure(schema = "...")]` | No | Schema qualifier |
/// | `#[procedure(rename_all = "...")]` | No | Casing of derived bound names |
/// | `#[param(direction, sql_type, name?)]` | No | Parameter field |
///
/// `direction` is `"in"`, `"out"` or `"inout"`, case-insensitive. `sql_type`
/// is any expression convertible into `SqlType`.
///
/// # Generated Code
///
/// `impl ProcedureInput`, reading `in` and `inout` fields through
/// `ToValue`. The type must be `'static`.
#[proc_macro_derive(ProcedureInput, attributes(procedure, param))]
pub fn derive_procedure_input(input: TokenStream) -> TokenStream {
    procedure::derive_input(input)
}

/// Derive macro for stored procedure output types.
///
/// # Attributes
///
/// | Attribute | Required | Description |
/// |-----------|----------|-------------|
/// | `#[output(rename_all = "...")]` | No | Casing of derived bound names |
/// | `#[param(direction, sql_type, name?)]` | No | Parameter field |
/// | `#[result_set(name, row?)]` | No | Result-set field |
///
/// # Generated Code
///
/// `impl ProcedureOutput`, created with `Default` and written through
/// `FromValue` (parameters) and `FromRows` (result sets).
#[proc_macro_derive(ProcedureOutput, attributes(output, param, result_set))]
pub fn derive_procedure_output(input: TokenStream) -> TokenStream {
    procedure::derive_output(input)
}

/// Derive macro for result-set row types.
///
/// # Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[column(name = "...")]` | Source column, defaults to the field name |
/// | `#[column(skip)]` | Not read; takes `Default::default()` |
///
/// Missing columns read as NULL, so `Option` fields become `None` and
/// scalars their zero value.
#[proc_macro_derive(FromRow, attributes(column))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    row::derive(input)
}
