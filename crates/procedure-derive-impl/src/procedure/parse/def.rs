// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! ProcedureDef struct definition and constructors.

use darling::FromDeriveInput;
use syn::{DeriveInput, Generics, Ident};

use super::{
    RenameRule,
    attrs::{InputAttrs, OutputAttrs},
    field::{FieldDef, ResultSetConfig}
};

/// Procedure identity declared with `#[procedure(...)]`.
#[derive(Debug)]
pub struct ProcedureName {
    /// Procedure name, never empty.
    pub name: String,

    /// Schema qualifier.
    pub schema: Option<String>
}

/// Parsed input or output type.
///
/// Input definitions always carry a [`ProcedureName`]; output definitions
/// never do.
#[derive(Debug)]
pub struct ProcedureDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics.
    pub generics: Generics,

    /// Procedure identity.
    pub procedure: Option<ProcedureName>,

    /// Casing of derived bound names.
    pub rename_all: Option<RenameRule>,

    /// All named fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl ProcedureDef {
    /// Parse a `#[derive(ProcedureInput)]` type.
    ///
    /// # Errors
    ///
    /// - Missing `#[procedure(name = ...)]` or an empty name
    /// - Applied to anything but a struct with named fields
    /// - Invalid field markers
    pub fn from_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = InputAttrs::from_derive_input(input)?;
        if attrs.name.trim().is_empty() {
            return Err(
                darling::Error::custom("procedure name must not be empty").with_span(&attrs.ident)
            );
        }

        Ok(Self {
            fields:     parse_fields(input, "ProcedureInput")?,
            ident:      attrs.ident,
            generics:   attrs.generics,
            procedure:  Some(ProcedureName {
                name:   attrs.name,
                schema: attrs.schema
            }),
            rename_all: attrs.rename_all
        })
    }

    /// Parse a `#[derive(ProcedureOutput)]` type.
    ///
    /// A type deriving both sides shares the `rename_all` of its
    /// `#[procedure]` attribute, so `InOut` parameters bind to one name.
    ///
    /// # Errors
    ///
    /// - Applied to anything but a struct with named fields
    /// - `#[output(rename_all)]` differing from `#[procedure(rename_all)]`
    /// - Invalid field markers
    pub fn from_output(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = OutputAttrs::from_derive_input(input)?;
        let rename_all = match (attrs.rename_all, procedure_rename(input)) {
            (Some(own), Some(shared)) if own != shared => {
                return Err(darling::Error::custom(
                    "`#[output(rename_all)]` conflicts with `#[procedure(rename_all)]`"
                )
                .with_span(&attrs.ident));
            }
            (own, shared) => own.or(shared)
        };

        Ok(Self {
            fields:    parse_fields(input, "ProcedureOutput")?,
            ident:     attrs.ident,
            generics:  attrs.generics,
            procedure: None,
            rename_all
        })
    }

    /// Type name used in layouts and error messages.
    pub fn type_name(&self) -> String {
        self.ident.to_string()
    }

    /// Fields carrying `#[param]`.
    pub fn params(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.param().is_some())
    }

    /// Fields carrying `#[result_set]`, with their options.
    pub fn result_sets(&self) -> impl Iterator<Item = (&FieldDef, &ResultSetConfig)> {
        self.fields
            .iter()
            .filter_map(|f| f.result_set().map(|config| (f, config)))
    }
}

/// `rename_all` of a `#[procedure]` attribute, if the type has one.
///
/// Errors in that attribute belong to the `ProcedureInput` derive.
fn procedure_rename(input: &DeriveInput) -> Option<RenameRule> {
    if !input.attrs.iter().any(|attr| attr.path().is_ident("procedure")) {
        return None;
    }
    InputAttrs::from_derive_input(input).ok()?.rename_all
}

/// Parse every named field, reporting all field errors at once.
fn parse_fields(input: &DeriveInput, derive: &str) -> darling::Result<Vec<FieldDef>> {
    let syn::Data::Struct(data) = &input.data else {
        return Err(
            darling::Error::custom(format!("{derive} can only be derived for structs"))
                .with_span(&input.ident)
        );
    };
    let syn::Fields::Named(named) = &data.fields else {
        return Err(
            darling::Error::custom(format!("{derive} requires named fields"))
                .with_span(&input.ident)
        );
    };

    let mut errors = darling::Error::accumulator();
    let fields: Vec<FieldDef> = named
        .named
        .iter()
        .filter_map(|field| errors.handle(FieldDef::from_field(field)))
        .collect();
    errors.finish_with(fields)
}
