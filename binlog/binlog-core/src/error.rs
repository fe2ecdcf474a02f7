//! Error types for the field decoder.

use crate::column_type::ColumnType;

/// Error returned by every decode operation.
///
/// A decode either yields a complete value or fails with one of these; the
/// stream position after a failure is unspecified.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The stream ran out before a required read completed.
    #[error("unexpected end of stream: needed {requested} bytes, {available} available")]
    UnexpectedEndOfStream { requested: usize, available: usize },

    /// The reserved variable-length integer marker was encountered.
    #[error("invalid length-coded integer marker 0x{marker:02x}")]
    InvalidVarint { marker: u8 },

    /// A recognised column type with no decoder.
    #[error("unsupported column type '{column_type}'")]
    UnsupportedType { column_type: ColumnType },

    /// A fixed-width read was requested with a width the format does not define.
    #[error("invalid integer width {width}")]
    InvalidWidth { width: usize },

    /// A variable-shaped type was decoded without metadata of the right family.
    #[error("column type '{column_type}' requires {expected} metadata, found {found}")]
    MissingMetadata {
        column_type: ColumnType,
        expected: &'static str,
        found: &'static str,
    },

    /// A field descriptor whose format cannot occupy its declared length.
    #[error("invalid field descriptor '{name}': {detail}")]
    InvalidDescriptor { name: String, detail: String },

    /// A pad-terminated fixed string was not valid UTF-8.
    #[error("invalid UTF-8 in fixed-length string: {source}")]
    InvalidUtf8 {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The underlying reader failed for a reason other than end of input.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error returned by the typed accessors on [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value type mismatch: expected {expected}, found {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}
