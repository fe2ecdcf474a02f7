//! Typed output of decoding one column or record field.

use std::sync::Arc;

use bytes::Bytes;

use crate::error::ValueTypeError;

/// Value produced by the field decoder.
/// Integers keep the width they were read with; no lossy conversions.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit null, e.g. a length-coded integer carrying the null marker.
    Null,
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Formatted text, e.g. a `date` rendered as `YYYY-MM-DD`.
    String(Arc<str>),
    /// Verbatim payload bytes.
    Bytes(Bytes),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    /// Wrap an unsigned integer read with the given byte width in the
    /// narrowest variant that holds it.
    pub fn from_uint(width: usize, v: u64) -> Self {
        match width {
            1 => Value::U8(v as u8),
            2 => Value::U16(v as u16),
            3 | 4 => Value::U32(v as u32),
            _ => Value::U64(v),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Any unsigned variant, widened to `u64`.
    pub fn try_u64(&self) -> Result<Option<u64>, ValueTypeError> {
        match self {
            Value::U8(v) => Ok(Some(u64::from(*v))),
            Value::U16(v) => Ok(Some(u64::from(*v))),
            Value::U32(v) => Ok(Some(u64::from(*v))),
            Value::U64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("unsigned integer")),
        }
    }

    pub fn try_i64(&self) -> Result<Option<i64>, ValueTypeError> {
        match self {
            Value::I64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("I64")),
        }
    }

    pub fn try_f32(&self) -> Result<Option<f32>, ValueTypeError> {
        match self {
            Value::F32(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("F32")),
        }
    }

    pub fn try_f64(&self) -> Result<Option<f64>, ValueTypeError> {
        match self {
            Value::F64(v) => Ok(Some(*v)),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("F64")),
        }
    }

    pub fn try_str(&self) -> Result<Option<&str>, ValueTypeError> {
        match self {
            Value::String(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("String")),
        }
    }

    pub fn try_bytes(&self) -> Result<Option<&[u8]>, ValueTypeError> {
        match self {
            Value::Bytes(v) => Ok(Some(v.as_ref())),
            Value::Null => Ok(None),
            _ => Err(self.type_mismatch("Bytes")),
        }
    }

    pub fn type_mismatch(&self, expected: impl Into<String>) -> ValueTypeError {
        ValueTypeError::new(expected, self.variant_name())
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::I64(_) => "I64",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
        }
    }
}

/// Field values of one structured record, in descriptor order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(Arc<str>, Value)>,
}

impl Record {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, name: Arc<str>, value: Value) {
        self.entries.push((name, value));
    }

    /// Value of the first field with this name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_ref(), v))
    }
}
