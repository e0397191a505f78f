// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! `#[procedure(...)]` on input types:
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `name` | Yes | — | Procedure name, must not be empty |
//! | `schema` | No | none | Schema qualifier |
//! | `rename_all` | No | none | Casing of derived bound names |
//!
//! `#[output(...)]` on output types:
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `rename_all` | No | none | Casing of derived bound names |

use darling::FromDeriveInput;
use syn::{Generics, Ident};

use super::RenameRule;

/// Attributes parsed from `#[procedure(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(procedure), supports(struct_named))]
pub struct InputAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Procedure name.
    pub name: String,

    /// Schema qualifier.
    #[darling(default)]
    pub schema: Option<String>,

    /// Casing of derived bound names.
    #[darling(default)]
    pub rename_all: Option<RenameRule>
}

/// Attributes parsed from `#[output(...)]`.
///
/// The attribute itself is optional.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(output), supports(struct_named))]
pub struct OutputAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Casing of derived bound names.
    #[darling(default)]
    pub rename_all: Option<RenameRule>
}
