//! Per-column metadata and value decoding over the closed type table.

use binlog_core::{ColumnMetadata, ColumnType, DecodeError, Value};
use tracing::{trace, warn};

use crate::{
    decoder::FieldDecoder,
    stream::ByteStream,
    temporal::{format_date, format_datetime, format_time},
};

const YEAR_OFFSET: u16 = 1900;
const VARCHAR_PREFIX_WIDTH: usize = 2;

impl<S: ByteStream> FieldDecoder<S> {
    /// Read the schema-level metadata of a column definition.
    pub fn decode_metadata(&mut self, column_type: ColumnType) -> Result<ColumnMetadata, DecodeError> {
        use ColumnType as T;

        Ok(match column_type {
            T::Float | T::Double | T::Bit => ColumnMetadata::Size {
                size: self.decode_u8()?,
            },
            T::VarChar => ColumnMetadata::MaxLength {
                max_length: self.decode_u16()?,
            },
            T::Decimal | T::NewDecimal => ColumnMetadata::Decimal {
                precision: self.decode_u8()?,
                decimals: self.decode_u8()?,
            },
            T::TinyBlob | T::MediumBlob | T::LongBlob | T::Blob | T::Geometry => {
                ColumnMetadata::LengthSize {
                    length_size: self.decode_u8()?,
                }
            }
            T::String | T::VarString => ColumnMetadata::String {
                real_type: self.decode_u8()?,
                max_length: self.decode_u8()?,
            },
            T::Tiny
            | T::Short
            | T::Long
            | T::Null
            | T::Timestamp
            | T::LongLong
            | T::Int24
            | T::Date
            | T::Time
            | T::DateTime
            | T::Year
            | T::NewDate
            | T::Enum
            | T::Set => ColumnMetadata::None,
        })
    }

    /// Decode exactly one value of `column_type`.
    pub fn decode_value(
        &mut self,
        column_type: ColumnType,
        metadata: &ColumnMetadata,
    ) -> Result<Value, DecodeError> {
        use ColumnType as T;

        trace!(%column_type, ?metadata, position = self.position(), "decoding column value");

        Ok(match column_type {
            T::Tiny => Value::U8(self.decode_u8()?),
            T::Short => Value::U16(self.decode_u16()?),
            T::Int24 => Value::U32(self.decode_u24()?),
            T::Long => Value::U32(self.decode_u32()?),
            T::LongLong => Value::U64(self.decode_u64()?),
            T::Float => Value::F32(self.decode_f32()?),
            T::Double => Value::F64(self.decode_f64()?),
            T::Null => Value::Null,
            T::String | T::VarString => self
                .decode_varint_prefixed_string()?
                .map_or(Value::Null, Value::Bytes),
            T::VarChar => Value::Bytes(self.decode_length_prefixed_string(VARCHAR_PREFIX_WIDTH)?),
            T::TinyBlob | T::MediumBlob | T::LongBlob | T::Blob | T::Geometry => {
                let length_size = metadata.length_size().ok_or(DecodeError::MissingMetadata {
                    column_type,
                    expected: "length_size",
                    found: metadata.family(),
                })?;
                Value::Bytes(self.decode_length_prefixed_string(usize::from(length_size))?)
            }
            T::Timestamp => Value::U32(self.decode_u32()?),
            T::Year => Value::U16(u16::from(self.decode_u8()?) + YEAR_OFFSET),
            T::Enum | T::Set => {
                let size = metadata.size().ok_or(DecodeError::MissingMetadata {
                    column_type,
                    expected: "size",
                    found: metadata.family(),
                })?;
                let width = usize::from(size);
                Value::from_uint(width, self.decode_uint(width)?)
            }
            T::Date => Value::string(format_date(self.decode_u24()?)),
            T::Time => Value::string(format_time(u64::from(self.decode_u24()?))),
            T::DateTime => Value::string(format_datetime(self.decode_u64()?)),
            T::Bit | T::NewDecimal | T::Decimal | T::NewDate => {
                warn!(%column_type, "column type has no value decoder");
                return Err(DecodeError::UnsupportedType { column_type });
            }
        })
    }
}
