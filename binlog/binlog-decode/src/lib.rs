//! Sequential decoder for the fields of the binary change-log wire format.
//!
//! Key components:
//! - [`stream`] — the forward-only [`ByteStream`] source and its in-memory and
//!   [`std::io::Read`] implementations
//! - [`FieldDecoder`] — fixed-width integers and floats, length-coded integers,
//!   strings, bitmaps, and per-column type dispatch
//! - [`record`] — single-read decoding of fixed-layout records with cached
//!   [`LayoutPlan`]s
//! - [`temporal`] — packed `date`/`time`/`datetime` conversions

mod bits;
mod decoder;
mod dispatch;
pub mod record;
pub mod stream;
pub mod temporal;
mod varlen;

pub use binlog_core::{
    ColumnMetadata, ColumnType, DecodeError, Record, Value, symbol_to_type_code,
    type_code_to_symbol,
};
pub use decoder::{DEFAULT_PAD_BYTES, FieldDecoder, FieldDecoderBuilder};
pub use record::{FieldDescriptor, FieldFormat, LayoutCache, LayoutPlan, RecordShape};
pub use stream::{ByteStream, IoStream};
pub use temporal::extract_bits;
