// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Metadata descriptor model.
//!
//! These are the explicit shapes the derive macros expand struct and field
//! attributes into. Manual implementations of
//! [`ProcedureInput`](crate::ProcedureInput) and
//! [`ProcedureOutput`](crate::ProcedureOutput) build them directly.
//!
//! # Data Structures
//!
//! ```text
//! TypeLayout
//! ├── type_name: &'static str
//! ├── procedure: Option<ProcedureDescriptor>   (input types only)
//! │   ├── name: String
//! │   └── schema: Option<String>
//! ├── parameters: Vec<ParameterDescriptor>      (declaration order)
//! │   ├── field: &'static str
//! │   ├── direction: Direction                  (In | Out | InOut)
//! │   ├── sql_type: SqlType                     (opaque tag)
//! │   └── name: Option<String>                  (explicit bound name)
//! └── result_sets: Vec<ResultSetDescriptor>     (output types only)
//!     ├── field: &'static str
//!     ├── name: String
//!     └── row: RowType
//! ```

use std::{
    any::{Any, TypeId, type_name},
    fmt,
    str::FromStr,
    sync::Arc
};

use crate::{
    error::{ConfigurationError, MarshalError},
    value::{MappedRow, Row, RowSet, Value}
};

/// Stored procedure identity attached to an input type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDescriptor {
    name:   String,
    schema: Option<String>
}

impl ProcedureDescriptor {
    /// Create a descriptor for an unqualified procedure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            schema: None
        }
    }

    /// Set the schema. An empty schema means none.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        let schema = schema.into();
        self.schema = (!schema.is_empty()).then_some(schema);
        self
    }

    /// Procedure name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema, if one was declared.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// `schema.name`, or just `name` without a schema.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone()
        }
    }
}

/// Parameter direction.
///
/// Exactly three variants; there is no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Flows into the procedure.
    In,

    /// Flows out of the procedure.
    Out,

    /// Flows both ways.
    InOut
}

impl Direction {
    /// Check if the parameter is sent to the procedure.
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::In | Self::InOut)
    }

    /// Check if the parameter is returned by the procedure.
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Out | Self::InOut)
    }

    /// Lowercase keyword, as accepted by [`FromStr`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inout"
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            "inout" => Ok(Self::InOut),
            _ => Err(ConfigurationError::UnknownDirection(s.to_owned()))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque SQL type tag, passed to the call primitive verbatim.
///
/// The associated constants are the JDBC `java.sql.Types` codes most drivers
/// understand. They are a convenience; any integer is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlType(pub i32);

impl SqlType {
    /// `BIT`
    pub const BIT: Self = Self(-7);
    /// `SMALLINT`
    pub const SMALLINT: Self = Self(5);
    /// `INTEGER`
    pub const INTEGER: Self = Self(4);
    /// `BIGINT`
    pub const BIGINT: Self = Self(-5);
    /// `DOUBLE`
    pub const DOUBLE: Self = Self(8);
    /// `NUMERIC`
    pub const NUMERIC: Self = Self(2);
    /// `DECIMAL`
    pub const DECIMAL: Self = Self(3);
    /// `CHAR`
    pub const CHAR: Self = Self(1);
    /// `VARCHAR`
    pub const VARCHAR: Self = Self(12);
    /// `DATE`
    pub const DATE: Self = Self(91);
    /// `TIMESTAMP`
    pub const TIMESTAMP: Self = Self(93);
    /// `VARBINARY`
    pub const VARBINARY: Self = Self(-3);
    /// `BOOLEAN`
    pub const BOOLEAN: Self = Self(16);
    /// `REF_CURSOR`
    pub const REF_CURSOR: Self = Self(2012);
    /// `OTHER`
    pub const OTHER: Self = Self(1111);

    /// Raw tag.
    pub const fn code(&self) -> i32 {
        self.0
    }
}

impl From<i32> for SqlType {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

/// A field marked as a procedure parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    field:     &'static str,
    direction: Direction,
    sql_type:  SqlType,
    name:      Option<String>
}

impl ParameterDescriptor {
    /// Describe the parameter carried by `field`.
    pub fn new(field: &'static str, direction: Direction, sql_type: impl Into<SqlType>) -> Self {
        Self {
            field,
            direction,
            sql_type: sql_type.into(),
            name: None
        }
    }

    /// Set an explicit bound name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Field identifier on the owning type.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Parameter direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// SQL type tag.
    pub const fn sql_type(&self) -> SqlType {
        self.sql_type
    }

    /// Name correlating the field with the procedure parameter.
    ///
    /// The explicit name when present and non-empty, otherwise the field
    /// identifier.
    pub fn bound_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.field
        }
    }
}

/// Constructor turning one raw row into a type-erased row object.
pub type RowConstructor = fn(&Row) -> Result<MappedRow, MarshalError>;

/// Builds one row object from a row of columns.
///
/// Derive with `#[derive(FromRow)]` or implement by hand.
pub trait FromRow: Sized {
    /// Construct the row object.
    ///
    /// # Errors
    ///
    /// [`MarshalError::Column`] when a column does not convert.
    fn from_row(row: &Row) -> Result<Self, MarshalError>;
}

/// The row type of a result set and how to construct it.
#[derive(Clone, Copy)]
pub struct RowType {
    type_name: &'static str,
    type_id:   TypeId,
    construct: RowConstructor
}

impl RowType {
    /// Row type for `T`.
    pub fn of<T>() -> Self
    where
        T: FromRow + Send + Sync + 'static
    {
        Self {
            type_name: type_name::<T>(),
            type_id:   TypeId::of::<T>(),
            construct: construct_row::<T>
        }
    }

    /// Row type name.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Build one row object.
    ///
    /// # Errors
    ///
    /// Whatever the row type's [`FromRow`] implementation reports.
    pub fn construct(&self, row: &Row) -> Result<MappedRow, MarshalError> {
        (self.construct)(row)
    }
}

fn construct_row<T>(row: &Row) -> Result<MappedRow, MarshalError>
where
    T: FromRow + Send + Sync + 'static
{
    T::from_row(row).map(|value| Arc::new(value) as Arc<dyn Any + Send + Sync>)
}

impl fmt::Debug for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RowType").field(&self.type_name).finish()
    }
}

impl PartialEq for RowType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for RowType {}

/// A field receiving a named result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSetDescriptor {
    field: &'static str,
    name:  String,
    row:   RowType
}

impl ResultSetDescriptor {
    /// Bind result set `name` to `field`, one `row` object per returned row.
    pub fn new(field: &'static str, name: impl Into<String>, row: RowType) -> Self {
        Self {
            field,
            name: name.into(),
            row
        }
    }

    /// Field identifier on the output type.
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Result set name as returned by the call.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row type of the result set.
    pub const fn row(&self) -> &RowType {
        &self.row
    }

    /// Map raw rows into the [`Value::Rows`] the output field expects.
    ///
    /// Call primitives use this to build result-set entries of their result
    /// map.
    ///
    /// # Errors
    ///
    /// The first row that fails to construct.
    pub fn map_rows<I>(&self, rows: I) -> Result<Value, MarshalError>
    where
        I: IntoIterator<Item = Row>
    {
        rows.into_iter()
            .map(|row| self.row.construct(&row))
            .collect::<Result<Vec<_>, _>>()
            .map(|rows| Value::Rows(RowSet::new(rows)))
    }
}

/// Descriptor table of one type: every marked field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLayout {
    type_name:   &'static str,
    procedure:   Option<ProcedureDescriptor>,
    parameters:  Vec<ParameterDescriptor>,
    result_sets: Vec<ResultSetDescriptor>
}

impl TypeLayout {
    /// Empty layout for `T`.
    pub fn of<T: ?Sized>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Empty layout with an explicit type name.
    pub const fn named(type_name: &'static str) -> Self {
        Self {
            type_name,
            procedure: None,
            parameters: Vec::new(),
            result_sets: Vec::new()
        }
    }

    /// Attach the procedure descriptor.
    #[must_use]
    pub fn procedure(mut self, procedure: ProcedureDescriptor) -> Self {
        self.procedure = Some(procedure);
        self
    }

    /// Append a parameter field.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Append a result-set field.
    #[must_use]
    pub fn result_set(mut self, result_set: ResultSetDescriptor) -> Self {
        self.result_sets.push(result_set);
        self
    }

    /// Type name.
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Procedure descriptor, if attached.
    pub const fn procedure_descriptor(&self) -> Option<&ProcedureDescriptor> {
        self.procedure.as_ref()
    }

    /// Parameter fields in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Result-set fields in declaration order.
    pub fn result_sets(&self) -> &[ResultSetDescriptor] {
        &self.result_sets
    }

    /// Resolve the procedure descriptor.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingProcedure`] without a descriptor,
    /// [`ConfigurationError::EmptyProcedureName`] when its name is empty.
    pub fn require_procedure(&self) -> Result<&ProcedureDescriptor, ConfigurationError> {
        let procedure = self
            .procedure
            .as_ref()
            .ok_or(ConfigurationError::MissingProcedure {
                type_name: self.type_name
            })?;
        if procedure.name().is_empty() {
            return Err(ConfigurationError::EmptyProcedureName {
                type_name: self.type_name
            });
        }
        Ok(procedure)
    }
}
