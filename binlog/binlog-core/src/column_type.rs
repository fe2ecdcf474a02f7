use std::{fmt, str::FromStr};

/// Column storage types of the binary change log, keyed by their one-byte
/// type code.
///
/// The table has gaps: codes 17..=245 are unassigned and resolve to `None`
/// through [`ColumnType::from_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    /// `decimal` (0)
    Decimal = 0,
    /// `tiny` (1)
    Tiny = 1,
    /// `short` (2)
    Short = 2,
    /// `long` (3)
    Long = 3,
    /// `float` (4)
    Float = 4,
    /// `double` (5)
    Double = 5,
    /// `null` (6)
    Null = 6,
    /// `timestamp` (7)
    Timestamp = 7,
    /// `longlong` (8)
    LongLong = 8,
    /// `int24` (9)
    Int24 = 9,
    /// `date` (10)
    Date = 10,
    /// `time` (11)
    Time = 11,
    /// `datetime` (12)
    DateTime = 12,
    /// `year` (13)
    Year = 13,
    /// `newdate` (14)
    NewDate = 14,
    /// `varchar` (15)
    VarChar = 15,
    /// `bit` (16)
    Bit = 16,
    /// `newdecimal` (246)
    NewDecimal = 246,
    /// `enum` (247)
    Enum = 247,
    /// `set` (248)
    Set = 248,
    /// `tiny_blob` (249)
    TinyBlob = 249,
    /// `medium_blob` (250)
    MediumBlob = 250,
    /// `long_blob` (251)
    LongBlob = 251,
    /// `blob` (252)
    Blob = 252,
    /// `var_string` (253)
    VarString = 253,
    /// `string` (254)
    String = 254,
    /// `geometry` (255)
    Geometry = 255,
}

impl ColumnType {
    /// Every assigned type, in type-code order.
    pub const ALL: [ColumnType; 27] = [
        Self::Decimal,
        Self::Tiny,
        Self::Short,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Null,
        Self::Timestamp,
        Self::LongLong,
        Self::Int24,
        Self::Date,
        Self::Time,
        Self::DateTime,
        Self::Year,
        Self::NewDate,
        Self::VarChar,
        Self::Bit,
        Self::NewDecimal,
        Self::Enum,
        Self::Set,
        Self::TinyBlob,
        Self::MediumBlob,
        Self::LongBlob,
        Self::Blob,
        Self::VarString,
        Self::String,
        Self::Geometry,
    ];

    /// Resolve a type code; unassigned codes have no symbol.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Decimal,
            1 => Self::Tiny,
            2 => Self::Short,
            3 => Self::Long,
            4 => Self::Float,
            5 => Self::Double,
            6 => Self::Null,
            7 => Self::Timestamp,
            8 => Self::LongLong,
            9 => Self::Int24,
            10 => Self::Date,
            11 => Self::Time,
            12 => Self::DateTime,
            13 => Self::Year,
            14 => Self::NewDate,
            15 => Self::VarChar,
            16 => Self::Bit,
            246 => Self::NewDecimal,
            247 => Self::Enum,
            248 => Self::Set,
            249 => Self::TinyBlob,
            250 => Self::MediumBlob,
            251 => Self::LongBlob,
            252 => Self::Blob,
            253 => Self::VarString,
            254 => Self::String,
            255 => Self::Geometry,
            _ => return None,
        })
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Tiny => "tiny",
            Self::Short => "short",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Null => "null",
            Self::Timestamp => "timestamp",
            Self::LongLong => "longlong",
            Self::Int24 => "int24",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Year => "year",
            Self::NewDate => "newdate",
            Self::VarChar => "varchar",
            Self::Bit => "bit",
            Self::NewDecimal => "newdecimal",
            Self::Enum => "enum",
            Self::Set => "set",
            Self::TinyBlob => "tiny_blob",
            Self::MediumBlob => "medium_blob",
            Self::LongBlob => "long_blob",
            Self::Blob => "blob",
            Self::VarString => "var_string",
            Self::String => "string",
            Self::Geometry => "geometry",
        }
    }

    /// Whether values of this type can only be decoded with schema metadata.
    pub fn needs_metadata(self) -> bool {
        matches!(
            self,
            Self::VarChar
                | Self::Enum
                | Self::Set
                | Self::TinyBlob
                | Self::MediumBlob
                | Self::LongBlob
                | Self::Blob
                | Self::Geometry
        )
    }
}

/// `type_code_to_symbol` over the fixed table.
pub fn type_code_to_symbol(code: u8) -> Option<ColumnType> {
    ColumnType::from_code(code)
}

/// `symbol_to_type_code` over the fixed table.
pub fn symbol_to_type_code(symbol: ColumnType) -> u8 {
    symbol.code()
}

impl From<ColumnType> for u8 {
    fn from(value: ColumnType) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

/// Error returned when parsing an unknown column type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column type '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
