//! Values the kernel engine transforms: scalars, arrays, and tables.
//!
//! These are small stand-ins. The binding layer needs an input's element
//! type and shape, and a way to slice it or coerce a plain value to match.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Logical element type of a scalar or array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// All values are null.
    #[serde(rename = "null")]
    Null,
    /// `true` / `false`.
    #[serde(rename = "bool")]
    Boolean,
    /// Signed 8-bit integer.
    #[serde(rename = "int8")]
    Int8,
    /// Signed 16-bit integer.
    #[serde(rename = "int16")]
    Int16,
    /// Signed 32-bit integer.
    #[serde(rename = "int32")]
    Int32,
    /// Signed 64-bit integer.
    #[serde(rename = "int64")]
    Int64,
    /// Unsigned 64-bit integer.
    #[serde(rename = "uint64")]
    UInt64,
    /// 64-bit float.
    #[serde(rename = "double")]
    Float64,
    /// UTF-8 string.
    #[serde(rename = "string")]
    Utf8,
}

impl DataType {
    /// The canonical type name, e.g. `"int64"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float64 => "double",
            Self::Utf8 => "string",
        }
    }

    /// Whether this is a signed or unsigned integer type.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64 | Self::UInt64
        )
    }

    /// Whether this is an integer or floating point type.
    pub fn is_numeric(self) -> bool {
        self.is_integer() || self == Self::Float64
    }

    fn signed_range(self) -> Option<(i64, i64)> {
        match self {
            Self::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            Self::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::Int64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain, untyped value, as a caller would write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean.
    Boolean(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer too large for `Int`.
    UInt(u64),
    /// Float.
    Float(f64),
    /// String.
    Utf8(String),
}

impl Value {
    /// The type a value of this shape maps to when no target type is given.
    pub fn natural_type(&self) -> DataType {
        match self {
            Self::Boolean(_) => DataType::Boolean,
            Self::Int(_) => DataType::Int64,
            Self::UInt(_) => DataType::UInt64,
            Self::Float(_) => DataType::Float64,
            Self::Utf8(_) => DataType::Utf8,
        }
    }

    /// Convert this value so it fits `data_type`, checking integer ranges.
    pub fn coerce(&self, data_type: DataType) -> Result<Value, DataError> {
        let fail = || DataError::Conversion {
            value: self.to_string(),
            data_type,
        };
        if let Some((min, max)) = data_type.signed_range() {
            let i = self.integral().ok_or_else(fail)?;
            return if i < min || i > max {
                Err(fail())
            } else {
                Ok(Self::Int(i))
            };
        }
        match (data_type, self) {
            (DataType::Boolean, Self::Boolean(b)) => Ok(Self::Boolean(*b)),
            (DataType::UInt64, Self::UInt(u)) => Ok(Self::UInt(*u)),
            (DataType::UInt64, _) => match self.integral() {
                Some(i) if i >= 0 => Ok(Self::UInt(i.unsigned_abs())),
                _ => Err(fail()),
            },
            (DataType::Float64, Self::Int(i)) => Ok(Self::Float(*i as f64)),
            (DataType::Float64, Self::UInt(u)) => Ok(Self::Float(*u as f64)),
            (DataType::Float64, Self::Float(v)) => Ok(Self::Float(*v)),
            (DataType::Utf8, Self::Utf8(s)) => Ok(Self::Utf8(s.clone())),
            _ => Err(fail()),
        }
    }

    /// Integer view, accepting integral floats.
    fn integral(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                // i64::MAX as f64 rounds up to 2^63, which is out of range.
                if *v >= i64::MIN as f64 && *v < i64::MAX as f64 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Integer content, if any.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Numeric content widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// String content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// JSON rendering, used when data is forwarded as an option argument.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Boolean(b) => serde_json::Value::Bool(*b),
            Self::Int(i) => (*i).into(),
            Self::UInt(u) => (*u).into(),
            Self::Float(v) => serde_json::Number::from_f64(*v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Utf8(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Boolean(a), Self::Boolean(b)) => a.partial_cmp(b),
            (Self::Utf8(a), Self::Utf8(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Int(b)) => a.partial_cmp(b),
            (Self::UInt(a), Self::UInt(b)) => a.partial_cmp(b),
            (a, b) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Utf8(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Utf8(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Utf8(v)
    }
}

/// A single typed, nullable value.
///
/// Serializes as `{"type": ..., "value": ...}`. Deserializes from that form
/// or from a bare JSON value, which takes its natural type (`null` becomes a
/// null scalar of type `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScalarRepr")]
pub struct Scalar {
    /// Element type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// The value, `None` for null.
    pub value: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarRepr {
    Typed {
        #[serde(rename = "type")]
        data_type: DataType,
        value: Option<Value>,
    },
    Plain(Option<Value>),
}

impl TryFrom<ScalarRepr> for Scalar {
    type Error = DataError;

    fn try_from(repr: ScalarRepr) -> Result<Self, Self::Error> {
        match repr {
            ScalarRepr::Typed {
                data_type,
                value: Some(v),
            } => Self::new(data_type, v),
            ScalarRepr::Typed {
                data_type,
                value: None,
            } => Ok(Self::null(data_type)),
            ScalarRepr::Plain(Some(v)) => Ok(Self::from_value(v)),
            ScalarRepr::Plain(None) => Ok(Self::null(DataType::Null)),
        }
    }
}

impl Scalar {
    /// Build a scalar of `data_type`, coercing `value` into it.
    pub fn new(data_type: DataType, value: impl Into<Value>) -> Result<Self, DataError> {
        let value = value.into().coerce(data_type)?;
        Ok(Self {
            data_type,
            value: Some(value),
        })
    }

    /// A null scalar of the given type.
    pub fn null(data_type: DataType) -> Self {
        Self {
            data_type,
            value: None,
        }
    }

    /// A scalar whose type follows from the value's shape.
    pub fn from_value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            data_type: value.natural_type(),
            value: Some(value),
        }
    }

    /// An `int64` scalar.
    pub fn int64(v: i64) -> Self {
        Self {
            data_type: DataType::Int64,
            value: Some(Value::Int(v)),
        }
    }

    /// A `string` scalar.
    pub fn utf8(v: impl Into<String>) -> Self {
        Self {
            data_type: DataType::Utf8,
            value: Some(Value::Utf8(v.into())),
        }
    }

    /// Whether the scalar holds a value.
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    /// Integer content, if any.
    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_ref().and_then(Value::as_i64)
    }

    /// Re-type the scalar, keeping its value.
    pub fn cast_to(&self, data_type: DataType) -> Result<Self, DataError> {
        match &self.value {
            None => Ok(Self::null(data_type)),
            Some(v) => Ok(Self {
                data_type,
                value: Some(v.coerce(data_type)?),
            }),
        }
    }
}

/// A typed sequence of nullable values.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    data_type: DataType,
    values: Vec<Option<Value>>,
}

impl Array {
    /// Build an array of `data_type`, coercing every element.
    pub fn new(data_type: DataType, values: Vec<Option<Value>>) -> Result<Self, DataError> {
        let values = values
            .into_iter()
            .map(|v| v.map(|v| v.coerce(data_type)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { data_type, values })
    }

    /// Build an array typed after its first non-null element.
    pub fn from_values(values: Vec<Option<Value>>) -> Result<Self, DataError> {
        let data_type = values
            .iter()
            .flatten()
            .next()
            .map_or(DataType::Null, Value::natural_type);
        Self::new(data_type, values)
    }

    /// An `int64` array.
    pub fn int64(values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self {
            data_type: DataType::Int64,
            values: values.into_iter().map(|v| v.map(Value::Int)).collect(),
        }
    }

    /// An `int8` array.
    pub fn int8(values: impl IntoIterator<Item = Option<i8>>) -> Self {
        Self {
            data_type: DataType::Int8,
            values: values
                .into_iter()
                .map(|v| v.map(|v| Value::Int(v.into())))
                .collect(),
        }
    }

    /// A `double` array.
    pub fn float64(values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self {
            data_type: DataType::Float64,
            values: values.into_iter().map(|v| v.map(Value::Float)).collect(),
        }
    }

    /// A `bool` array.
    pub fn boolean(values: impl IntoIterator<Item = Option<bool>>) -> Self {
        Self {
            data_type: DataType::Boolean,
            values: values.into_iter().map(|v| v.map(Value::Boolean)).collect(),
        }
    }

    /// A `string` array.
    pub fn utf8<S: Into<String>>(values: impl IntoIterator<Item = Option<S>>) -> Self {
        Self {
            data_type: DataType::Utf8,
            values: values
                .into_iter()
                .map(|v| v.map(|s| Value::Utf8(s.into())))
                .collect(),
        }
    }

    /// Element type.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of null elements.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Borrow the elements.
    pub fn values(&self) -> &[Option<Value>] {
        &self.values
    }

    /// The element at `index` as a scalar.
    pub fn get(&self, index: usize) -> Option<Scalar> {
        self.values.get(index).map(|v| Scalar {
            data_type: self.data_type,
            value: v.clone(),
        })
    }

    /// Zero-based window of `len` elements starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, DataError> {
        let end = offset.saturating_add(len);
        if end > self.values.len() {
            return Err(DataError::SliceOutOfBounds {
                offset,
                end,
                len: self.values.len(),
            });
        }
        Ok(Self {
            data_type: self.data_type,
            values: self.values[offset..end].to_vec(),
        })
    }

    /// Re-type every element.
    pub fn cast_to(&self, data_type: DataType) -> Result<Self, DataError> {
        Self::new(data_type, self.values.clone())
    }

    /// JSON list rendering, nulls included.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.values
                .iter()
                .map(|v| v.as_ref().map_or(serde_json::Value::Null, Value::to_json))
                .collect(),
        )
    }
}

/// Named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<(String, Array)>,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Array)>,
    ) -> Result<Self, DataError> {
        let columns: Vec<(String, Array)> =
            columns.into_iter().map(|(n, a)| (n.into(), a)).collect();
        if let Some((_, first)) = columns.first() {
            let expected = first.len();
            for (name, array) in &columns {
                if array.len() != expected {
                    return Err(DataError::LengthMismatch {
                        column: name.clone(),
                        expected,
                        actual: array.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, a)| a.len())
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Array> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, a)| a)
    }

    /// Borrow the columns.
    pub fn columns(&self) -> &[(String, Array)] {
        &self.columns
    }

    /// Row window of every column.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, DataError> {
        let columns = self
            .columns
            .iter()
            .map(|(n, a)| Ok((n.clone(), a.slice(offset, len)?)))
            .collect::<Result<Vec<_>, DataError>>()?;
        Ok(Self { columns })
    }
}

/// Anything a compute function accepts or returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// A single value.
    Scalar(Scalar),
    /// A flat sequence of values.
    Array(Array),
    /// Named columns.
    Table(Table),
}

impl Datum {
    /// Short kind name for messages: `"scalar"`, `"array"` or `"table"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Array(_) => "array",
            Self::Table(_) => "table",
        }
    }

    /// Element type for scalars and arrays.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Scalar(s) => Some(s.data_type),
            Self::Array(a) => Some(a.data_type()),
            Self::Table(_) => None,
        }
    }

    /// Whether this is a flat array (as opposed to a table or scalar).
    pub fn is_array_like(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Number of elements (arrays) or rows (tables).
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => None,
            Self::Array(a) => Some(a.len()),
            Self::Table(t) => Some(t.num_rows()),
        }
    }

    /// Slice an array or table; scalars cannot be sliced.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, DataError> {
        match self {
            Self::Scalar(_) => Err(DataError::Unsupported {
                operation: "slice",
                kind: "scalar",
            }),
            Self::Array(a) => Ok(Self::Array(a.slice(offset, len)?)),
            Self::Table(t) => Ok(Self::Table(t.slice(offset, len)?)),
        }
    }

    /// Borrow as an array.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Borrow as a scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as a table.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// JSON rendering, used when positional data is forwarded to an
    /// options constructor.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Scalar(s) => s
                .value
                .as_ref()
                .map_or(serde_json::Value::Null, Value::to_json),
            Self::Array(a) => a.to_json(),
            Self::Table(t) => serde_json::Value::Object(
                t.columns()
                    .iter()
                    .map(|(n, a)| (n.clone(), a.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for Datum {
    fn from(s: Scalar) -> Self {
        Self::Scalar(s)
    }
}

impl From<Array> for Datum {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Table> for Datum {
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

/// Either a typed datum or a plain value still awaiting a type.
///
/// Adapters use the distinction to decide when a value must be coerced to
/// the element type of the data it is compared against.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Already typed.
    Datum(Datum),
    /// Plain caller value.
    Plain(Value),
}

impl From<Datum> for Operand {
    fn from(d: Datum) -> Self {
        Self::Datum(d)
    }
}

impl From<Scalar> for Operand {
    fn from(s: Scalar) -> Self {
        Self::Datum(Datum::Scalar(s))
    }
}

impl From<Array> for Operand {
    fn from(a: Array) -> Self {
        Self::Datum(Datum::Array(a))
    }
}

impl From<Table> for Operand {
    fn from(t: Table) -> Self {
        Self::Datum(Datum::Table(t))
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Self::Plain(v)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Self::Plain(v.into())
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Self::Plain(v.into())
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Self::Plain(v.into())
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Self::Plain(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_checks_integer_range() {
        assert_eq!(Value::Int(5).coerce(DataType::Int8), Ok(Value::Int(5)));
        assert!(Value::Int(300).coerce(DataType::Int8).is_err());
        assert_eq!(Value::Float(3.0).coerce(DataType::Int32), Ok(Value::Int(3)));
        assert!(Value::Float(3.5).coerce(DataType::Int32).is_err());
        assert!(Value::Int(-1).coerce(DataType::UInt64).is_err());
    }

    #[test]
    fn coerce_rejects_cross_kind() {
        let err = Value::from("x").coerce(DataType::Int64).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert \"x\" to int64");
        assert!(Value::Int(1).coerce(DataType::Utf8).is_err());
    }

    #[test]
    fn from_values_infers_first_non_null_type() {
        let a = Array::from_values(vec![None, Some(1.into()), Some(2.into())]).unwrap();
        assert_eq!(a.data_type(), DataType::Int64);
        assert_eq!(a.null_count(), 1);

        let empty = Array::from_values(vec![None]).unwrap();
        assert_eq!(empty.data_type(), DataType::Null);
    }

    #[test]
    fn slice_bounds() {
        let a = Array::utf8([Some("a"), Some("b"), Some("c")]);
        assert_eq!(a.slice(1, 2).unwrap(), Array::utf8([Some("b"), Some("c")]));
        assert!(a.slice(2, 2).is_err());
        assert!(Datum::from(Scalar::int64(1)).slice(0, 0).is_err());
    }

    #[test]
    fn table_rejects_ragged_columns() {
        let err = Table::new([
            ("a", Array::int64([Some(1), Some(2)])),
            ("b", Array::int64([Some(1)])),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::LengthMismatch { actual: 1, .. }));
    }

    #[test]
    fn scalar_serde_uses_type_names() {
        let s = Scalar::utf8("c");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json, serde_json::json!({"type": "string", "value": "c"}));
        let back: Scalar = serde_json::from_value(json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn scalar_deserializes_from_a_bare_value() {
        let s: Scalar = serde_json::from_value(serde_json::json!("c")).unwrap();
        assert_eq!(s, Scalar::utf8("c"));
        let s: Scalar = serde_json::from_value(serde_json::json!(7)).unwrap();
        assert_eq!(s, Scalar::int64(7));
        let s: Scalar = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert_eq!(s, Scalar::null(DataType::Null));
    }

    #[test]
    fn typed_scalar_form_is_range_checked() {
        let s: Scalar =
            serde_json::from_value(serde_json::json!({"type": "int8", "value": 5})).unwrap();
        assert_eq!(s, Scalar::new(DataType::Int8, 5).unwrap());
        let null: Scalar =
            serde_json::from_value(serde_json::json!({"type": "int8", "value": null})).unwrap();
        assert_eq!(null, Scalar::null(DataType::Int8));
        let out_of_range = serde_json::json!({"type": "int8", "value": 300});
        assert!(serde_json::from_value::<Scalar>(out_of_range).is_err());
    }

    #[test]
    fn mixed_numeric_ordering() {
        assert!(Value::Int(2) > Value::Float(1.5));
        assert_eq!(Value::from("a").partial_cmp(&Value::Int(1)), None);
    }
}
