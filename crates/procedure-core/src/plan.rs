// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Call plan construction.
//!
//! A [`CallPlan`] is the immutable description of how to invoke one stored
//! procedure for one input type: the procedure identity, the ordered
//! parameter declarations and the result-set bindings. It also keeps the
//! layouts of both types so marshalling never has to ask the types again.
//!
//! # Declaration Order
//!
//! ```text
//! input fields  (declaration order) ── In / InOut ──┐
//!                                                   ├──► parameters
//! output fields (declaration order) ── Out / InOut ─┘
//! output fields (declaration order) ── result_set ─────► result_sets
//! ```
//!
//! No deduplication happens between the two halves: a field `x` declared
//! `In` on the input and `Out` on the output yields two declarations.

use std::any::{TypeId, type_name};

use tracing::debug;

use crate::{
    ProcedureInput, ProcedureOutput,
    descriptor::{
        Direction, ParameterDescriptor, ProcedureDescriptor, ResultSetDescriptor, SqlType,
        TypeLayout
    },
    error::ConfigurationError
};

/// One parameter as declared to the call primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDeclaration {
    name:      String,
    direction: Direction,
    sql_type:  SqlType
}

impl ParameterDeclaration {
    fn from_descriptor(descriptor: &ParameterDescriptor) -> Self {
        Self {
            name:      descriptor.bound_name().to_owned(),
            direction: descriptor.direction(),
            sql_type:  descriptor.sql_type()
        }
    }

    /// Bound name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// SQL type tag.
    pub const fn sql_type(&self) -> SqlType {
        self.sql_type
    }
}

/// Immutable, reusable description of one stored procedure call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPlan {
    procedure:   ProcedureDescriptor,
    parameters:  Vec<ParameterDeclaration>,
    result_sets: Vec<ResultSetDescriptor>,
    input:       TypeLayout,
    output:      TypeLayout,
    output_type: TypeId
}

impl CallPlan {
    /// Build the plan for calling `I`'s procedure and reading into `O`.
    ///
    /// This is the only place type layouts are requested.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingProcedure`] or
    /// [`ConfigurationError::EmptyProcedureName`] for an unusable input type.
    pub fn build<I, O>() -> Result<Self, ConfigurationError>
    where
        I: ProcedureInput,
        O: ProcedureOutput
    {
        let input = I::layout();
        let procedure = input.require_procedure()?.clone();
        let output = O::layout();

        let parameters: Vec<ParameterDeclaration> = input
            .parameters()
            .iter()
            .filter(|p| p.direction().is_input())
            .chain(output.parameters().iter().filter(|p| p.direction().is_output()))
            .map(ParameterDeclaration::from_descriptor)
            .collect();
        let result_sets = output.result_sets().to_vec();

        debug!(
            procedure = %procedure.qualified_name(),
            input = input.type_name(),
            output = output.type_name(),
            parameters = parameters.len(),
            result_sets = result_sets.len(),
            "built call plan"
        );

        Ok(Self {
            procedure,
            parameters,
            result_sets,
            input,
            output,
            output_type: TypeId::of::<O>()
        })
    }

    /// Procedure identity.
    pub const fn procedure(&self) -> &ProcedureDescriptor {
        &self.procedure
    }

    /// Ordered parameter declarations.
    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }

    /// Result-set bindings.
    pub fn result_sets(&self) -> &[ResultSetDescriptor] {
        &self.result_sets
    }

    /// Layout of the input type.
    pub const fn input_layout(&self) -> &TypeLayout {
        &self.input
    }

    /// Layout of the output type.
    pub const fn output_layout(&self) -> &TypeLayout {
        &self.output
    }

    /// Check if the plan was built for output type `O`.
    pub fn is_output<O: 'static>(&self) -> bool {
        self.output_type == TypeId::of::<O>()
    }

    /// Fail unless the plan was built for output type `O`.
    pub(crate) fn expect_output<O: 'static>(&self) -> Result<(), ConfigurationError> {
        if self.is_output::<O>() {
            Ok(())
        } else {
            Err(ConfigurationError::OutputTypeMismatch {
                input:     self.input.type_name(),
                cached:    self.output.type_name(),
                requested: type_name::<O>()
            })
        }
    }

    /// JDBC escape syntax for the call, one placeholder per declaration.
    ///
    /// ```rust
    /// # use procedure_core::{CallPlan, ProcedureInput, ProcedureOutput, TypeLayout,
    /// #     ProcedureDescriptor, ParameterDescriptor, Direction, Value, MarshalError,
    /// #     ConfigurationError};
    /// # struct In;
    /// # impl ProcedureInput for In {
    /// #     fn layout() -> TypeLayout {
    /// #         TypeLayout::named("In")
    /// #             .procedure(ProcedureDescriptor::new("get_user").with_schema("hr"))
    /// #             .parameter(ParameterDescriptor::new("id", Direction::In, 4))
    /// #     }
    /// #     fn read_field(&self, field: &str) -> Result<Value, MarshalError> {
    /// #         Err(MarshalError::unknown_field("In", field))
    /// #     }
    /// # }
    /// # #[derive(Default)]
    /// # struct Out;
    /// # impl ProcedureOutput for Out {
    /// #     fn layout() -> TypeLayout {
    /// #         TypeLayout::named("Out").parameter(ParameterDescriptor::new("name", Direction::Out, 12))
    /// #     }
    /// #     fn construct() -> Result<Self, ConfigurationError> { Ok(Self) }
    /// #     fn write_field(&mut self, _: &str, _: Value) -> Result<(), MarshalError> { Ok(()) }
    /// # }
    /// let plan = CallPlan::build::<In, Out>().unwrap();
    /// assert_eq!(plan.call_string(), "{call hr.get_user(?, ?)}");
    /// ```
    pub fn call_string(&self) -> String {
        let placeholders = vec!["?"; self.parameters.len()].join(", ");
        format!("{{call {}({placeholders})}}", self.procedure.qualified_name())
    }
}
