// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! A field carries at most one marker:
//!
//! ```text
//! #[param(direction = "inout", sql_type = SqlType::VARCHAR, name = "p_note")]
//! #[result_set(name = "orders", row = OrderRow)]
//! (none)  → ignored by the procedure bridge
//! ```
//!
//! `#[param]` goes through darling's `FromMeta`; `#[result_set]` is parsed by
//! hand because `row` takes a type, not a literal.

use darling::FromMeta;
use syn::{Attribute, Field, GenericArgument, Ident, LitStr, PathArguments, Type, ext::IdentExt};

use super::{ParamDirection, RenameRule};

/// Options of `#[param(...)]`.
#[derive(Debug, FromMeta)]
pub struct ParamConfig {
    /// Parameter direction. Required.
    pub direction: ParamDirection,

    /// Expression convertible into `procedure_core::SqlType`. Required.
    pub sql_type: syn::Expr,

    /// Explicit bound name.
    #[darling(default)]
    pub name: Option<String>
}

/// Options of `#[result_set(...)]`.
#[derive(Debug)]
pub struct ResultSetConfig {
    /// Result set name as returned by the call.
    pub name: String,

    /// Row type, inferred from `Vec<T>` when omitted.
    pub row: Type
}

impl ResultSetConfig {
    /// Parse from `#[result_set(...)]` on a field of type `ty`.
    ///
    /// # Errors
    ///
    /// - Missing or empty `name`
    /// - Unknown option
    /// - No `row` and a field type other than `Vec<T>`
    pub fn from_attr(attr: &Attribute, ty: &Type) -> darling::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut row: Option<Type> = None;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("row") {
                row = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unknown result_set option, expected `name` or `row`"))
            }
        })?;

        let name = name.ok_or_else(|| darling::Error::missing_field("name").with_span(attr))?;
        if name.value().is_empty() {
            return Err(darling::Error::custom("result set name must not be empty").with_span(&name));
        }
        let row = match row {
            Some(row) => row,
            None => vec_element(ty).cloned().ok_or_else(|| {
                darling::Error::custom(
                    "cannot infer the row type; use a `Vec<T>` field or `row = Type`"
                )
                .with_span(ty)
            })?
        };

        Ok(Self {
            name: name.value(),
            row
        })
    }
}

/// Role of a field in the procedure call.
#[derive(Debug)]
pub enum FieldRole {
    /// `#[param(...)]`
    Param(ParamConfig),

    /// `#[result_set(...)]`
    ResultSet(ResultSetConfig),

    /// No marker.
    Plain
}

/// Field definition with its parsed marker.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Parsed marker.
    pub role: FieldRole
}

impl FieldDef {
    /// Parse field definition from syn's `Field`.
    ///
    /// # Errors
    ///
    /// - Unnamed field
    /// - Invalid `#[param]` or `#[result_set]` options
    /// - Both markers, or one marker twice, on the same field
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("procedure fields must be named").with_span(field)
        })?;
        let mut role = FieldRole::Plain;
        for attr in &field.attrs {
            let parsed = if attr.path().is_ident("param") {
                FieldRole::Param(ParamConfig::from_meta(&attr.meta).map_err(|e| e.with_span(attr))?)
            } else if attr.path().is_ident("result_set") {
                FieldRole::ResultSet(ResultSetConfig::from_attr(attr, &field.ty)?)
            } else {
                continue;
            };
            if !matches!(role, FieldRole::Plain) {
                return Err(darling::Error::custom(
                    "a field takes one `#[param]` or `#[result_set]` marker"
                )
                .with_span(attr));
            }
            role = parsed;
        }

        Ok(Self {
            ident,
            role
        })
    }

    /// Field name as a string, without the `r#` prefix.
    pub fn name(&self) -> String {
        self.ident.unraw().to_string()
    }

    /// Parameter options, if the field is a parameter.
    pub fn param(&self) -> Option<&ParamConfig> {
        match &self.role {
            FieldRole::Param(config) => Some(config),
            _ => None
        }
    }

    /// Result-set options, if the field is a result set.
    pub fn result_set(&self) -> Option<&ResultSetConfig> {
        match &self.role {
            FieldRole::ResultSet(config) => Some(config),
            _ => None
        }
    }

    /// Bound name to record on the descriptor, if it differs from the field.
    ///
    /// An explicit `name` wins over `rename_all`.
    pub fn bound_name(&self, rename: Option<RenameRule>) -> Option<String> {
        let param = self.param()?;
        match (&param.name, rename) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(rule)) => Some(rule.apply(&self.name())),
            (None, None) => None
        }
    }

    /// Check if the field is read from input instances.
    pub fn is_input_param(&self) -> bool {
        self.param().is_some_and(|p| p.direction.is_input())
    }
}

/// Element type `T` of a `Vec<T>` field type.
pub fn vec_element(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Vec" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(element) if args.args.len() == 1 => Some(element),
        _ => None
    }
}
