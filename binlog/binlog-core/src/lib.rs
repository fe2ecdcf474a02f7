//! Stream-independent core types for the binary change-log field decoder.
//!
//! This crate provides the closed column type table ([`ColumnType`]), the
//! schema-level [`ColumnMetadata`], the decoded [`Value`] and the
//! [`DecodeError`] taxonomy shared by every decode operation.

mod column_type;
mod error;
mod metadata;
mod value;

pub use column_type::{ColumnType, UnknownColumnType, symbol_to_type_code, type_code_to_symbol};
pub use error::{DecodeError, ValueTypeError};
pub use metadata::ColumnMetadata;
pub use value::{Record, Value};
