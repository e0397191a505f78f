// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter marshalling between typed objects and [`ParamMap`]s.
//!
//! Both directions are driven by a [`TypeLayout`] resolved once by the plan
//! builder; the types themselves are only asked to read or write a named
//! field.
//!
//! # Duplicate Bound Names
//!
//! Fields are visited in declaration order. When two input fields share a
//! bound name, the later one wins.

use tracing::trace;

use crate::{
    ProcedureInput, ProcedureOutput,
    descriptor::TypeLayout,
    error::{MarshalError, PopulateError},
    value::{ParamMap, Value}
};

/// Collect the call arguments of `input`.
///
/// Reads every `In` and `InOut` parameter field; `Out` fields are never read.
///
/// # Errors
///
/// The first field that fails to read.
pub fn extract_inputs<I>(input: &I, layout: &TypeLayout) -> Result<ParamMap, MarshalError>
where
    I: ProcedureInput
{
    let mut params = ParamMap::new();
    for parameter in layout.parameters().iter().filter(|p| p.direction().is_input()) {
        let value = input.read_field(parameter.field())?;
        params.insert(parameter.bound_name().to_owned(), value);
    }
    trace!(
        input = layout.type_name(),
        count = params.len(),
        "extracted call inputs"
    );
    Ok(params)
}

/// Build a fresh `O` from the values a call returned.
///
/// Every parameter field receives `result[bound_name]` and every result-set
/// field `result[name]`. Missing keys are written as [`Value::Null`]. The
/// instance is only returned once every field has been written.
///
/// # Errors
///
/// - [`PopulateError::Configuration`] when `O` cannot be constructed
/// - [`PopulateError::Marshal`] for the first failed field write
pub fn populate_output<O>(result: &ParamMap, layout: &TypeLayout) -> Result<O, PopulateError>
where
    O: ProcedureOutput
{
    let mut output = O::construct()?;

    for parameter in layout.parameters() {
        let value = lookup(result, parameter.bound_name());
        output.write_field(parameter.field(), value)?;
    }
    for result_set in layout.result_sets() {
        let value = lookup(result, result_set.name());
        output.write_field(result_set.field(), value)?;
    }

    trace!(output = layout.type_name(), "populated call output");
    Ok(output)
}

fn lookup(result: &ParamMap, name: &str) -> Value {
    result.get(name).cloned().unwrap_or_default()
}
