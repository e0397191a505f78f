// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and types for procedure-derive.
//!
//! This crate maps annotated Rust types onto stored procedure calls. Input
//! types name the procedure and supply IN values; output types receive OUT
//! values and result sets. The database itself is reached through a
//! [`CallPrimitive`] supplied by the caller.
//!
//! # Overview
//!
//! - [`ProcedureInput`] / [`ProcedureOutput`] — Field access generated by the
//!   derive macros
//! - [`TypeLayout`] — Procedure, parameter and result-set metadata of a type
//! - [`CallPlan`] — Immutable call description built once per input type
//! - [`PlanCache`] — Thread-safe plan registry
//! - [`marshal`] — Input extraction and output population
//! - [`ProcedureExecutor`] — Public entry point
//! - [`prelude`] — Convenient re-exports
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  resolve::<I, O>  ┌───────────┐  build  ┌──────────┐
//! │  Executor    │ ────────────────► │ PlanCache │ ──────► │ CallPlan │
//! └──────┬───────┘                   └───────────┘         └──────────┘
//!        │ extract_inputs / populate_output
//!        ▼
//! ┌──────────────┐   ProcedureCall   ┌───────────────┐
//! │   marshal    │ ────────────────► │ CallPrimitive │ ──► database
//! └──────────────┘ ◄──── ParamMap ── └───────────────┘
//! ```
//!
//! # Usage
//!
//! Most users should use `procedure-derive` directly, which re-exports this
//! crate. For manual implementations:
//!
//! ```rust
//! use procedure_core::prelude::*;
//!
//! struct Ping;
//!
//! impl ProcedureInput for Ping {
//!     fn layout() -> TypeLayout {
//!         TypeLayout::of::<Self>().procedure(ProcedureDescriptor::new("ping"))
//!     }
//!
//!     fn read_field(&self, field: &str) -> Result<Value, MarshalError> {
//!         Err(MarshalError::unknown_field("Ping", field))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Pong {
//!     alive: bool
//! }
//!
//! impl ProcedureOutput for Pong {
//!     fn layout() -> TypeLayout {
//!         TypeLayout::of::<Self>().parameter(ParameterDescriptor::new(
//!             "alive",
//!             Direction::Out,
//!             SqlType::BOOLEAN
//!         ))
//!     }
//!
//!     fn construct() -> Result<Self, ConfigurationError> {
//!         Ok(Self::default())
//!     }
//!
//!     fn write_field(&mut self, field: &str, value: Value) -> Result<(), MarshalError> {
//!         match field {
//!             "alive" => {
//!                 self.alive =
//!                     bool::from_value(value).map_err(|e| MarshalError::write("Pong", field, e))?;
//!                 Ok(())
//!             }
//!             _ => Err(MarshalError::unknown_field("Pong", field))
//!         }
//!     }
//! }
//!
//! struct AlwaysUp;
//!
//! impl CallPrimitive for AlwaysUp {
//!     type Error = std::convert::Infallible;
//!
//!     fn invoke(&self, _: ProcedureCall<'_>) -> Result<ParamMap, Self::Error> {
//!         Ok([("alive".to_owned(), Value::Bool(true))].into())
//!     }
//! }
//!
//! let executor = ProcedureExecutor::new(AlwaysUp);
//! let pong: Pong = executor.execute(&Ping).unwrap();
//! assert!(pong.alive);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod marshal;
pub mod plan;
pub mod prelude;
pub mod value;

pub use cache::PlanCache;
pub use descriptor::{
    Direction, FromRow, ParameterDescriptor, ProcedureDescriptor, ResultSetDescriptor,
    RowConstructor, RowType, SqlType, TypeLayout
};
pub use error::{ConfigurationError, ExecuteError, MarshalError, PopulateError, ValueError};
pub use executor::{CallPrimitive, ProcedureCall, ProcedureExecutor};
pub use plan::{CallPlan, ParameterDeclaration};
pub use value::{FromRows, FromValue, MappedRow, ParamMap, Row, RowSet, ToValue, Value};

/// Type whose instances supply the arguments of a stored procedure call.
///
/// Generated by `#[derive(ProcedureInput)]`. The layout must carry a
/// [`ProcedureDescriptor`]; parameters marked `In` or `InOut` are read from
/// the instance on every call.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(ProcedureInput)]
/// #[procedure(name = "get_user", schema = "hr")]
/// pub struct GetUser {
///     #[param(direction = "in", sql_type = SqlType::INTEGER)]
///     pub user_id: i32
/// }
/// ```
pub trait ProcedureInput: 'static {
    /// Procedure and parameter metadata.
    ///
    /// Called once per plan build, never on the hot path.
    fn layout() -> TypeLayout;

    /// Read the current value of a parameter field.
    ///
    /// # Errors
    ///
    /// [`MarshalError::UnknownField`] for a field the type does not have.
    fn read_field(&self, field: &str) -> Result<Value, MarshalError>;
}

/// Type that receives the results of a stored procedure call.
///
/// Generated by `#[derive(ProcedureOutput)]`. A fresh instance is created
/// for every call with [`construct`](Self::construct), then every declared
/// parameter and result-set field is written.
pub trait ProcedureOutput: Sized + 'static {
    /// Parameter and result-set metadata.
    fn layout() -> TypeLayout;

    /// Create an instance with every field at its zero value.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingConstructor`] when the type cannot be
    /// created without arguments.
    fn construct() -> Result<Self, ConfigurationError>;

    /// Assign a field from a returned value.
    ///
    /// # Errors
    ///
    /// [`MarshalError::Write`] when the value does not fit the field type,
    /// [`MarshalError::UnknownField`] for a field the type does not have.
    fn write_field(&mut self, field: &str, value: Value) -> Result<(), MarshalError>;
}
