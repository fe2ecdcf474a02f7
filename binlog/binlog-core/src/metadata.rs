//! Schema-level column parameters needed to decode variable-shaped values.

use crate::column_type::ColumnType;

/// Type-specific metadata produced once per column definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnMetadata {
    /// Fixed-shape type; nothing was read.
    #[default]
    None,
    /// `float`, `double`, `bit`; also the pack width of `enum`/`set`.
    Size { size: u8 },
    /// `varchar`
    MaxLength { max_length: u16 },
    /// `decimal`, `newdecimal`
    Decimal { precision: u8, decimals: u8 },
    /// Blob variants and `geometry`: width of the value's length prefix.
    LengthSize { length_size: u8 },
    /// `string`, `var_string`
    String { real_type: u8, max_length: u8 },
}

impl ColumnMetadata {
    pub fn size(&self) -> Option<u8> {
        match self {
            Self::Size { size } => Some(*size),
            _ => None,
        }
    }

    pub fn max_length(&self) -> Option<u16> {
        match self {
            Self::MaxLength { max_length } => Some(*max_length),
            Self::String { max_length, .. } => Some(u16::from(*max_length)),
            _ => None,
        }
    }

    pub fn length_size(&self) -> Option<u8> {
        match self {
            Self::LengthSize { length_size } => Some(*length_size),
            _ => None,
        }
    }

    /// The real column type carried by `string`/`var_string` metadata.
    pub fn real_type(&self) -> Option<ColumnType> {
        match self {
            Self::String { real_type, .. } => ColumnType::from_code(*real_type),
            _ => None,
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Size { .. } => "size",
            Self::MaxLength { .. } => "max_length",
            Self::Decimal { .. } => "decimal",
            Self::LengthSize { .. } => "length_size",
            Self::String { .. } => "string",
        }
    }
}
