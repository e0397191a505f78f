// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use procedure_core::prelude::*;
//! ```

pub use crate::{
    CallPlan, CallPrimitive, ConfigurationError, Direction, ExecuteError, FromRow, FromRows,
    FromValue, MarshalError, ParamMap, ParameterDescriptor, PlanCache, ProcedureCall,
    ProcedureDescriptor, ProcedureExecutor, ProcedureInput, ProcedureOutput, ResultSetDescriptor,
    Row, RowType, SqlType, ToValue, TypeLayout, Value
};
