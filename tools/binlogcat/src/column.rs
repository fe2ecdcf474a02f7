use std::str::FromStr;

use anyhow::{Context, Result, bail};
use binlog_decode::{ColumnMetadata, ColumnType};

/// A column given on the command line as `type[:param[:param]]`.
///
/// Parameters fill the type's metadata: `varchar:255`, `blob:2`, `enum:1`,
/// `float:4`, `newdecimal:10:2`, `string:254:30`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub column_type: ColumnType,
    pub metadata: ColumnMetadata,
}

impl FromStr for ColumnSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default();
        let column_type: ColumnType = name.parse()?;
        let params = parts
            .map(|p| {
                p.parse::<u16>()
                    .with_context(|| format!("invalid parameter '{p}' in column '{s}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        let metadata = metadata_from_params(column_type, &params)
            .with_context(|| format!("invalid column '{s}'"))?;
        Ok(Self {
            column_type,
            metadata,
        })
    }
}

impl ColumnSpec {
    /// Metadata to decode with when the stream carried `from_stream`.
    ///
    /// `enum`/`set` have no metadata in the stream; their pack width comes
    /// from the command line.
    pub fn resolve_metadata(&self, from_stream: ColumnMetadata) -> ColumnMetadata {
        if from_stream == ColumnMetadata::None && self.column_type.needs_metadata() {
            self.metadata
        } else {
            from_stream
        }
    }
}

fn metadata_from_params(column_type: ColumnType, params: &[u16]) -> Result<ColumnMetadata> {
    use ColumnType as T;

    let byte = |i: usize| -> Result<u8> {
        let v = params.get(i).copied().unwrap_or_default();
        u8::try_from(v).with_context(|| format!("parameter {v} does not fit in one byte"))
    };
    let expected = match column_type {
        T::Float
        | T::Double
        | T::Bit
        | T::Enum
        | T::Set
        | T::VarChar
        | T::TinyBlob
        | T::MediumBlob
        | T::LongBlob
        | T::Blob
        | T::Geometry => 1,
        T::Decimal | T::NewDecimal | T::String | T::VarString => 2,
        _ => 0,
    };
    if params.len() > expected {
        bail!("{column_type} takes at most {expected} parameter(s)");
    }

    Ok(match column_type {
        T::Float | T::Double | T::Bit | T::Enum | T::Set => ColumnMetadata::Size { size: byte(0)? },
        T::VarChar => ColumnMetadata::MaxLength {
            max_length: params.first().copied().unwrap_or_default(),
        },
        T::Decimal | T::NewDecimal => ColumnMetadata::Decimal {
            precision: byte(0)?,
            decimals: byte(1)?,
        },
        T::TinyBlob | T::MediumBlob | T::LongBlob | T::Blob | T::Geometry => {
            ColumnMetadata::LengthSize {
                length_size: byte(0)?,
            }
        }
        T::String | T::VarString => ColumnMetadata::String {
            real_type: match params.first() {
                Some(_) => byte(0)?,
                None => column_type.code(),
            },
            max_length: byte(1)?,
        },
        _ => ColumnMetadata::None,
    })
}
