// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter direction.
//!
//! This module defines [`ParamDirection`], the compile-time counterpart of
//! `procedure_core::Direction`. There is no default variant: a `#[param]`
//! without a recognised `direction` is rejected at expansion.

use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::quote;

/// Direction of a `#[param]` field.
///
/// # Variants
///
/// | Value | Read from input | Declared from output |
/// |-------|-----------------|----------------------|
/// | `"in"` | Yes | No |
/// | `"out"` | No | Yes |
/// | `"inout"` | Yes | Yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDirection {
    /// Flows into the procedure.
    In,

    /// Flows out of the procedure.
    Out,

    /// Flows both ways.
    InOut
}

impl ParamDirection {
    /// Check if the field is read from an input instance.
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Path of the matching `procedure_core::Direction` variant.
    pub fn tokens(&self) -> TokenStream {
        match self {
            Self::In => quote! { ::procedure_core::Direction::In },
            Self::Out => quote! { ::procedure_core::Direction::Out },
            Self::InOut => quote! { ::procedure_core::Direction::InOut }
        }
    }
}

impl FromMeta for ParamDirection {
    /// Parse direction from string attribute value.
    ///
    /// Case-insensitive; `in_out` and `in-out` are accepted for `inout`.
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::InOut),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
