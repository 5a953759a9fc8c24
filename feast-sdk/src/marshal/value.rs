//! # Value Codec
//!
//! Maps native [`Scalar`]s to the wire [`Value`] tagged union and back.
//!
//! | Native          | Wire         |
//! |-----------------|--------------|
//! | `Int64`         | `int64_val`  |
//! | `Int32`         | `int32_val`  |
//! | `Float64`       | `double_val` |
//! | `String`        | `string_val` |
//! | missing         | `null_val`   |
//!
//! Only these four native types can be encoded. `bytes_val` is understood when decoding a
//! response but there is no entity key type that encodes to it.
use super::MarshalError;
use super::table::{Cell, Dtype, Scalar};
use crate::proto::{NullValue, Val, Value};

/// The kind of a wire [`Value`], i.e. which variant of the union is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int32,
    Int64,
    Float64,
    String,
    Bytes,
    Null,
}

impl ValueKind {
    /// Returns `None` when the value is unset, which is not the same as `Null`.
    pub fn of(value: &Value) -> Option<Self> {
        let kind = match value.val.as_ref()? {
            Val::Int32Val(_) => ValueKind::Int32,
            Val::Int64Val(_) => ValueKind::Int64,
            Val::DoubleVal(_) => ValueKind::Float64,
            Val::StringVal(_) => ValueKind::String,
            Val::BytesVal(_) => ValueKind::Bytes,
            Val::NullVal(_) => ValueKind::Null,
        };
        Some(kind)
    }

    /// The native type a value of this kind decodes to. `Null` has none.
    pub fn dtype(self) -> Option<Dtype> {
        match self {
            ValueKind::Int32 => Some(Dtype::Int32),
            ValueKind::Int64 => Some(Dtype::Int64),
            ValueKind::Float64 => Some(Dtype::Float64),
            ValueKind::String => Some(Dtype::String),
            ValueKind::Bytes => Some(Dtype::Bytes),
            ValueKind::Null => None,
        }
    }
}

/// A `Value` with the null variant explicitly set.
pub fn null() -> Value {
    Value {
        val: Some(Val::NullVal(NullValue::Null as i32)),
    }
}

/// Encodes a cell of a column typed `dtype`.
///
/// Cells without a value always encode to [`null`], whatever the column type. Otherwise the
/// column type must be one of the encodable types, and the value must be of that type: the
/// wire kind is chosen by `dtype`, never by the value alone.
pub fn encode(cell: &Cell, dtype: Dtype) -> Result<Value, MarshalError> {
    let scalar = match cell {
        Cell::Present(scalar) => scalar,
        Cell::Missing | Cell::NotApplicable => return Ok(null()),
    };

    if !matches!(
        dtype,
        Dtype::Int32 | Dtype::Int64 | Dtype::Float64 | Dtype::String
    ) {
        return Err(MarshalError::UnsupportedValueType(dtype));
    }

    if scalar.dtype() != dtype {
        return Err(MarshalError::ValueDtypeMismatch {
            expected: dtype,
            found: scalar.dtype(),
        });
    }

    let val = match scalar {
        Scalar::Int64(v) => Val::Int64Val(*v),
        Scalar::Int32(v) => Val::Int32Val(*v),
        Scalar::Float64(v) => Val::DoubleVal(*v),
        Scalar::String(v) => Val::StringVal(v.clone()),
        other => return Err(MarshalError::UnsupportedValueType(other.dtype())),
    };

    Ok(Value { val: Some(val) })
}

/// Decodes a wire value. Unset and `null` values both decode to [`Cell::Missing`].
pub fn decode(value: &Value) -> Cell {
    match &value.val {
        Some(Val::Int32Val(v)) => Cell::Present(Scalar::Int32(*v)),
        Some(Val::Int64Val(v)) => Cell::Present(Scalar::Int64(*v)),
        Some(Val::DoubleVal(v)) => Cell::Present(Scalar::Float64(*v)),
        Some(Val::StringVal(v)) => Cell::Present(Scalar::String(v.clone())),
        Some(Val::BytesVal(v)) => Cell::Present(Scalar::Bytes(v.clone())),
        Some(Val::NullVal(_)) | None => Cell::Missing,
    }
}
