// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bound name casing.
//!
//! [`RenameRule`] derives the bound name of a `#[param]` field that carries no
//! explicit `name`, so Rust field names can follow Rust conventions while the
//! procedure keeps its own.

use convert_case::{Case, Casing};
use darling::FromMeta;

/// Casing applied to field identifiers.
///
/// | Value | `user_name` becomes |
/// |-------|---------------------|
/// | `"camelCase"` | `userName` |
/// | `"PascalCase"` | `UserName` |
/// | `"snake_case"` | `user_name` |
/// | `"SCREAMING_SNAKE_CASE"` | `USER_NAME` |
/// | `"kebab-case"` | `user-name` |
/// | `"lowercase"` | `username` |
/// | `"UPPERCASE"` | `USERNAME` |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    /// `userName`
    Camel,

    /// `UserName`
    Pascal,

    /// `user_name`
    Snake,

    /// `USER_NAME`
    ScreamingSnake,

    /// `user-name`
    Kebab,

    /// `username`
    Lower,

    /// `USERNAME`
    Upper
}

impl RenameRule {
    /// Apply the rule to a field identifier.
    pub fn apply(&self, field: &str) -> String {
        let field = field.trim_start_matches("r#");
        match self {
            Self::Camel => field.to_case(Case::Camel),
            Self::Pascal => field.to_case(Case::Pascal),
            Self::Snake => field.to_case(Case::Snake),
            Self::ScreamingSnake => field.to_case(Case::Snake).to_uppercase(),
            Self::Kebab => field.to_case(Case::Kebab),
            Self::Lower => field.to_case(Case::Snake).replace('_', ""),
            Self::Upper => field.to_case(Case::Snake).replace('_', "").to_uppercase()
        }
    }
}

impl FromMeta for RenameRule {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "camelCase" => Ok(Self::Camel),
            "PascalCase" => Ok(Self::Pascal),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
