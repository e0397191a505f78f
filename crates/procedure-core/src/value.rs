// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Loosely typed values exchanged with the call primitive.
//!
//! Parameters travel as a [`ParamMap`] of bound name to [`Value`]. Typed
//! fields convert through [`ToValue`] on the way in and [`FromValue`] on the
//! way out. Result sets travel as [`Value::Rows`] holding rows already built
//! by the row mapper; [`FromRows`] turns them back into `Vec<T>`.
//!
//! # Null Handling
//!
//! [`Value::Null`] reads as the zero value of scalar types (`0`, `false`,
//! empty string) and as `None` for `Option<T>`. The database may legitimately
//! leave OUT parameters unset.

use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    fmt,
    sync::Arc
};

use crate::error::ValueError;

/// Bound name to value mapping used for call inputs and call results.
pub type ParamMap = BTreeMap<String, Value>;

/// One row object produced by a [`RowType`](crate::RowType) constructor.
pub type MappedRow = Arc<dyn Any + Send + Sync>;

/// A parameter, column or result value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// SQL `NULL`, or a value the call did not return.
    #[default]
    Null,

    /// Boolean.
    Bool(bool),

    /// Any integer type.
    Int(i64),

    /// Any floating point type.
    Float(f64),

    /// Character data.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// UUID.
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),

    /// Timestamp in UTC.
    #[cfg(feature = "chrono")]
    Timestamp(chrono::DateTime<chrono::Utc>),

    /// Rows of a named result set.
    Rows(RowSet)
}

impl Value {
    /// Variant name used in conversion errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            #[cfg(feature = "uuid")]
            Self::Uuid(_) => "uuid",
            #[cfg(feature = "chrono")]
            Self::Timestamp(_) => "timestamp",
            Self::Rows(_) => "rows"
        }
    }

    /// Check if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn mismatch<T>(&self) -> ValueError {
        ValueError::TypeMismatch {
            expected: type_name::<T>(),
            found:    self.kind()
        }
    }
}

/// Ordered rows of one result set.
///
/// Rows are type-erased so a single [`ParamMap`] can carry scalars and result
/// sets side by side. Equality is identity of the contained rows.
#[derive(Clone, Default)]
pub struct RowSet(Vec<MappedRow>);

impl RowSet {
    /// Wrap already mapped rows.
    pub fn new(rows: Vec<MappedRow>) -> Self {
        Self(rows)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Downcast every row into `T`.
    ///
    /// # Errors
    ///
    /// [`ValueError::RowType`] if any row was built for another type.
    pub fn downcast<T>(&self) -> Result<Vec<T>, ValueError>
    where
        T: Clone + Send + Sync + 'static
    {
        self.0
            .iter()
            .map(|row| {
                Arc::clone(row)
                    .downcast::<T>()
                    .map(Arc::unwrap_or_clone)
                    .map_err(|_| ValueError::RowType {
                        expected: type_name::<T>()
                    })
            })
            .collect()
    }
}

impl fmt::Debug for RowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowSet({} rows)", self.0.len())
    }
}

impl PartialEq for RowSet {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(&other.0)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

/// One raw result-set row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: BTreeMap<String, Value>
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Set a column value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Look up a column.
    ///
    /// Exact name first, then an ASCII case-insensitive match.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column).or_else(|| {
            self.columns
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })
    }

    /// Read a column into `T`, missing columns reading as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// The conversion failure of [`FromValue::from_value`].
    pub fn decode<T: FromValue>(&self, column: &str) -> Result<T, ValueError> {
        T::from_value(self.get(column).cloned().unwrap_or_default())
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect()
        }
    }
}

/// Convert a field into a [`Value`] for the call inputs.
pub trait ToValue {
    /// Produce the value sent for this field.
    fn to_value(&self) -> Value;
}

/// Convert a [`Value`] back into a field type.
pub trait FromValue: Sized {
    /// Build the field from a returned value.
    ///
    /// # Errors
    ///
    /// [`ValueError`] when the variant does not fit the type.
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// Convert [`Value::Rows`] into a result-set field.
pub trait FromRows: Sized {
    /// Build the field from a returned result set.
    ///
    /// # Errors
    ///
    /// [`ValueError`] when the value is not a row set of the right row type.
    fn from_rows(value: Value) -> Result<Self, ValueError>;
}

impl<T> FromRows for Vec<T>
where
    T: Clone + Send + Sync + 'static
{
    fn from_rows(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Rows(rows) => rows.downcast(),
            Value::Null => Ok(Vec::new()),
            other => Err(other.mismatch::<Self>())
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(b),
            Value::Int(i) => Ok(i != 0),
            other => Err(other.mismatch::<Self>())
        }
    }
}

macro_rules! int_value {
    ($($ty:ty),*) => {$(
        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Null => Ok(0),
                    Value::Int(i) => <$ty>::try_from(i).map_err(|_| ValueError::OutOfRange {
                        value:  i.to_string(),
                        target: stringify!($ty)
                    }),
                    other => Err(other.mismatch::<Self>())
                }
            }
        }
    )*};
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FromValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(0.0),
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(other.mismatch::<Self>())
        }
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        let f = f64::from_value(value)?;
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            return Err(ValueError::OutOfRange {
                value:  f.to_string(),
                target: "f32"
            });
        }
        Ok(f as f32)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(String::new()),
            Value::Text(s) => Ok(s),
            other => Err(other.mismatch::<Self>())
        }
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::Bytes(b) => Ok(b),
            other => Err(other.mismatch::<Self>())
        }
    }
}

#[cfg(feature = "uuid")]
impl ToValue for uuid::Uuid {
    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }
}

#[cfg(feature = "uuid")]
impl FromValue for uuid::Uuid {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(uuid::Uuid::nil()),
            Value::Uuid(u) => Ok(u),
            other => Err(other.mismatch::<Self>())
        }
    }
}

#[cfg(feature = "chrono")]
impl ToValue for chrono::DateTime<chrono::Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

#[cfg(feature = "chrono")]
impl FromValue for chrono::DateTime<chrono::Utc> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Timestamp(t) => Ok(t),
            other => Err(other.mismatch::<Self>())
        }
    }
}

macro_rules! value_from {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                value.to_value()
            }
        }
    )*};
}

value_from!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str, Vec<u8>);

#[cfg(feature = "uuid")]
value_from!(uuid::Uuid);

#[cfg(feature = "chrono")]
value_from!(chrono::DateTime<chrono::Utc>);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
