//! The field decoder and its fixed-width primitive readers.

use std::sync::Arc;

use binlog_core::DecodeError;
use bytes::{Buf, Bytes};

use crate::{record::LayoutCache, stream::ByteStream};

/// Trailing bytes stripped from pad-terminated fixed strings by default.
pub const DEFAULT_PAD_BYTES: &[u8] = &[0x00, b' '];

/// Decodes typed values from one sequential [`ByteStream`].
///
/// Every operation advances the shared cursor by exactly the bytes it decodes;
/// nothing is ever read back. A decoder owns its stream exclusively.
pub struct FieldDecoder<S> {
    stream: S,
    position: u64,
    layouts: Arc<LayoutCache>,
    pad_bytes: Vec<u8>,
}

/// Builder for configuring [`FieldDecoder`].
pub struct FieldDecoderBuilder {
    layouts: Arc<LayoutCache>,
    pad_bytes: Vec<u8>,
}

impl FieldDecoderBuilder {
    /// Use this layout cache instead of the process-wide one.
    pub fn layout_cache(mut self, cache: Arc<LayoutCache>) -> Self {
        self.layouts = cache;
        self
    }

    /// Bytes stripped from the end of pad-terminated fixed strings.
    pub fn pad_bytes(mut self, pad: &[u8]) -> Self {
        self.pad_bytes = pad.to_vec();
        self
    }

    pub fn build<S: ByteStream>(self, stream: S) -> FieldDecoder<S> {
        FieldDecoder {
            stream,
            position: 0,
            layouts: self.layouts,
            pad_bytes: self.pad_bytes,
        }
    }
}

impl<S: ByteStream> FieldDecoder<S> {
    /// Create a builder for [`FieldDecoder`].
    pub fn builder() -> FieldDecoderBuilder {
        FieldDecoderBuilder {
            layouts: LayoutCache::global(),
            pad_bytes: DEFAULT_PAD_BYTES.to_vec(),
        }
    }

    /// Decoder with the process-wide layout cache and default padding.
    pub fn new(stream: S) -> Self {
        Self::builder().build(stream)
    }

    /// Bytes consumed through this decoder so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn layout_cache(&self) -> &Arc<LayoutCache> {
        &self.layouts
    }

    pub(crate) fn pad_bytes(&self) -> &[u8] {
        &self.pad_bytes
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    pub(crate) fn read_bytes(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        let bytes = self.stream.read(n)?;
        self.position += n as u64;
        Ok(bytes)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let b = self.stream.read_u8()?;
        self.position += 1;
        Ok(b)
    }

    /// Consume and discard `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn decode_u8(&mut self) -> Result<u8, DecodeError> {
        self.read_u8()
    }

    pub fn decode_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(self.read_bytes(2)?.get_u16_le())
    }

    pub fn decode_u24(&mut self) -> Result<u32, DecodeError> {
        Ok(unpack_uint(&mut self.read_bytes(3)?, 3) as u32)
    }

    pub fn decode_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(self.read_bytes(4)?.get_u32_le())
    }

    pub fn decode_u48(&mut self) -> Result<u64, DecodeError> {
        Ok(unpack_uint(&mut self.read_bytes(6)?, 6))
    }

    pub fn decode_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(self.read_bytes(8)?.get_u64_le())
    }

    /// Little-endian unsigned integer of 1, 2, 3, 4, 6 or 8 bytes.
    pub fn decode_uint(&mut self, width: usize) -> Result<u64, DecodeError> {
        check_uint_width(width)?;
        Ok(unpack_uint(&mut self.read_bytes(width)?, width))
    }

    /// Little-endian two's-complement integer of 1, 2, 3, 4, 6 or 8 bytes.
    pub fn decode_int(&mut self, width: usize) -> Result<i64, DecodeError> {
        let raw = self.decode_uint(width)?;
        Ok(sign_extend(raw, width))
    }

    /// Big-endian unsigned integer of 1..=8 bytes.
    pub fn decode_uint_be(&mut self, width: usize) -> Result<u64, DecodeError> {
        if !(1..=8).contains(&width) {
            return Err(DecodeError::InvalidWidth { width });
        }
        Ok(self.read_bytes(width)?.get_uint(width))
    }

    pub fn decode_f32(&mut self) -> Result<f32, DecodeError> {
        Ok(self.read_bytes(4)?.get_f32_le())
    }

    pub fn decode_f64(&mut self) -> Result<f64, DecodeError> {
        Ok(self.read_bytes(8)?.get_f64_le())
    }
}

pub(crate) fn check_uint_width(width: usize) -> Result<(), DecodeError> {
    match width {
        1 | 2 | 3 | 4 | 6 | 8 => Ok(()),
        _ => Err(DecodeError::InvalidWidth { width }),
    }
}

/// Assemble a little-endian integer from `buf`. The caller guarantees
/// `width` is a valid integer width and `buf` holds at least that many bytes.
///
/// 24-bit values are three single bytes, 48-bit values three 16-bit chunks.
pub(crate) fn unpack_uint(buf: &mut Bytes, width: usize) -> u64 {
    match width {
        1 => u64::from(buf.get_u8()),
        2 => u64::from(buf.get_u16_le()),
        3 => {
            let b0 = u64::from(buf.get_u8());
            let b1 = u64::from(buf.get_u8());
            let b2 = u64::from(buf.get_u8());
            b0 + (b1 << 8) + (b2 << 16)
        }
        4 => u64::from(buf.get_u32_le()),
        6 => {
            let c0 = u64::from(buf.get_u16_le());
            let c1 = u64::from(buf.get_u16_le());
            let c2 = u64::from(buf.get_u16_le());
            c0 + (c1 << 16) + (c2 << 32)
        }
        8 => buf.get_u64_le(),
        _ => unreachable!("unchecked integer width {width}"),
    }
}

pub(crate) fn sign_extend(raw: u64, width: usize) -> i64 {
    let shift = 64 - 8 * width as u32;
    ((raw << shift) as i64) >> shift
}
