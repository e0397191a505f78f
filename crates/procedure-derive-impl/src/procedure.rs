// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! ProcedureInput and ProcedureOutput derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! procedure.rs (orchestrator)
//! │
//! ├── parse/     → Attribute parsing (ProcedureDef, FieldDef)
//! │
//! ├── layout.rs  → TypeLayout builder expression
//! ├── input.rs   → impl ProcedureInput (layout, read_field)
//! └── output.rs  → impl ProcedureOutput (layout, construct, write_field)
//! ```
//!
//! # Generated Code
//!
//! | Derive | Implements | Reads / writes |
//! |--------|------------|----------------|
//! | `ProcedureInput` | `procedure_core::ProcedureInput` | `in`, `inout` params |
//! | `ProcedureOutput` | `procedure_core::ProcedureOutput` | all params, result sets |

mod input;
mod layout;
mod output;
pub mod parse;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::ProcedureDef;

/// Entry point for `#[derive(ProcedureInput)]`.
pub fn derive_input(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ProcedureDef::from_input(&input) {
        Ok(def) => input::generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}

/// Entry point for `#[derive(ProcedureOutput)]`.
pub fn derive_output(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match ProcedureDef::from_output(&input) {
        Ok(def) => output::generate(&def).into(),
        Err(err) => err.write_errors().into()
    }
}
