// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for procedure execution.
//!
//! # Overview
//!
//! - [`ConfigurationError`] — Metadata is missing or unusable
//! - [`MarshalError`] — A field could not be read or written
//! - [`ValueError`] — A [`Value`](crate::Value) could not be converted
//! - [`ExecuteError`] — Everything [`execute`] can return, wrapping the call
//!   primitive's own error unchanged
//!
//! [`execute`]: crate::ProcedureExecutor::execute

use thiserror::Error;

/// Declarative metadata is missing or cannot be used.
///
/// Always fatal for the current call and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The input type carries no procedure descriptor.
    #[error("type `{type_name}` has no stored procedure descriptor")]
    MissingProcedure {
        /// Offending input type.
        type_name: &'static str
    },

    /// The procedure descriptor has an empty name.
    #[error("stored procedure descriptor on `{type_name}` has an empty name")]
    EmptyProcedureName {
        /// Offending input type.
        type_name: &'static str
    },

    /// The output type cannot be constructed without arguments.
    #[error("output type `{type_name}` has no zero-argument constructor")]
    MissingConstructor {
        /// Offending output type.
        type_name: &'static str
    },

    /// The input type was already planned against another output type.
    #[error(
        "input type `{input}` is bound to output type `{cached}`, \
         cannot reuse its call plan for `{requested}`"
    )]
    OutputTypeMismatch {
        /// Input type the plan is keyed by.
        input:     &'static str,
        /// Output type the cached plan was built for.
        cached:    &'static str,
        /// Output type of the rejected request.
        requested: &'static str
    },

    /// A parameter direction spelling was not recognized.
    #[error("unknown parameter direction `{0}`, expected `in`, `out` or `inout`")]
    UnknownDirection(String)
}

/// A [`Value`](crate::Value) could not be converted into a Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value variant does not match the target type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Target type name.
        expected: &'static str,
        /// Variant name of the value.
        found:    &'static str
    },

    /// A numeric value does not fit the target type.
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        /// The offending value, rendered.
        value:  String,
        /// Target type name.
        target: &'static str
    },

    /// A result-set row was built for another row type.
    #[error("result set row is not a `{expected}`")]
    RowType {
        /// Row type the field expects.
        expected: &'static str
    }
}

/// A field could not be read from an input or written to an output.
///
/// Fatal for the current call. Wraps the underlying [`ValueError`] where one
/// exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    /// The accessor table of the type has no such field.
    #[error("type `{type_name}` has no accessible field `{field}`")]
    UnknownField {
        /// Type being marshalled.
        type_name: &'static str,
        /// Requested field.
        field:     String
    },

    /// Writing an output field failed.
    #[error("failed to write `{type_name}.{field}`: {source}")]
    Write {
        /// Output type.
        type_name: &'static str,
        /// Field identifier.
        field:     String,
        /// Underlying conversion failure.
        #[source]
        source:    ValueError
    },

    /// Building a result-set row from a column failed.
    #[error("failed to map column `{column}` into `{row_type}`: {source}")]
    Column {
        /// Row type being constructed.
        row_type: &'static str,
        /// Column name.
        column:   String,
        /// Underlying conversion failure.
        #[source]
        source:   ValueError
    }
}

impl MarshalError {
    /// Wrap a conversion failure for an output field write.
    pub fn write(type_name: &'static str, field: impl Into<String>, source: ValueError) -> Self {
        Self::Write {
            type_name,
            field: field.into(),
            source
        }
    }

    /// Wrap a conversion failure for a row column.
    pub fn column(row_type: &'static str, column: impl Into<String>, source: ValueError) -> Self {
        Self::Column {
            row_type,
            column: column.into(),
            source
        }
    }

    /// Report a field missing from an accessor table.
    pub fn unknown_field(type_name: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name,
            field: field.into()
        }
    }
}

/// Error returned by [`ProcedureExecutor::execute`](crate::ProcedureExecutor::execute).
///
/// # Type Parameters
///
/// - `E` — Error type of the [`CallPrimitive`](crate::CallPrimitive)
#[derive(Debug, Error)]
pub enum ExecuteError<E> {
    /// Metadata could not be resolved; the procedure was never invoked.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Inputs or outputs could not be marshalled.
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// The procedure invocation itself failed.
    #[error("stored procedure call failed: {0}")]
    Execution(#[source] E)
}

impl<E> ExecuteError<E> {
    /// Check if this is a configuration error.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is a marshalling error.
    pub const fn is_marshal(&self) -> bool {
        matches!(self, Self::Marshal(_))
    }

    /// Check if the procedure invocation failed.
    pub const fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Get the call primitive's error, if that is what failed.
    pub fn into_execution(self) -> Option<E> {
        match self {
            Self::Execution(e) => Some(e),
            _ => None
        }
    }
}

/// Error from [`populate_output`](crate::marshal::populate_output), which can
/// fail on construction as well as on field writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PopulateError {
    /// The output type could not be constructed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A field write failed.
    #[error(transparent)]
    Marshal(#[from] MarshalError)
}

impl<E> From<PopulateError> for ExecuteError<E> {
    fn from(err: PopulateError) -> Self {
        match err {
            PopulateError::Configuration(e) => Self::Configuration(e),
            PopulateError::Marshal(e) => Self::Marshal(e)
        }
    }
}
