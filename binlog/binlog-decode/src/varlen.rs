//! Length-coded integers and the string encodings built on them.

use binlog_core::DecodeError;
use bytes::Bytes;

use crate::{decoder::FieldDecoder, stream::ByteStream};

/// Largest value stored directly in the marker byte.
const VARINT_MAX_INLINE: u8 = 250;
const VARINT_NULL: u8 = 251;
const VARINT_U16: u8 = 252;
const VARINT_U24: u8 = 253;
const VARINT_U64: u8 = 254;

impl<S: ByteStream> FieldDecoder<S> {
    /// Length-coded binary integer. `None` is the null marker, not zero.
    pub fn decode_varint(&mut self) -> Result<Option<u64>, DecodeError> {
        let marker = self.read_u8()?;
        match marker {
            0..=VARINT_MAX_INLINE => Ok(Some(u64::from(marker))),
            VARINT_NULL => Ok(None),
            VARINT_U16 => self.decode_uint(2).map(Some),
            VARINT_U24 => self.decode_uint(3).map(Some),
            VARINT_U64 => self.decode_uint(8).map(Some),
            _ => Err(DecodeError::InvalidVarint { marker }),
        }
    }

    /// Exactly `n` bytes, verbatim.
    pub fn decode_fixed_string(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        self.read_bytes(n)
    }

    /// Exactly `n` bytes with trailing NUL/pad bytes stripped.
    ///
    /// The padding is part of the declared width; no extra byte is consumed.
    pub fn decode_padded_string(&mut self, n: usize) -> Result<String, DecodeError> {
        let raw = self.read_bytes(n)?;
        let pad = self.pad_bytes();
        let end = raw
            .iter()
            .rposition(|b| !pad.contains(b))
            .map_or(0, |i| i + 1);
        String::from_utf8(raw[..end].to_vec())
            .map_err(|source| DecodeError::InvalidUtf8 { source })
    }

    /// Payload preceded by a 1..=4 byte little-endian length.
    pub fn decode_length_prefixed_string(
        &mut self,
        prefix_width: usize,
    ) -> Result<Bytes, DecodeError> {
        if !(1..=4).contains(&prefix_width) {
            return Err(DecodeError::InvalidWidth {
                width: prefix_width,
            });
        }
        let len = self.decode_uint(prefix_width)? as usize;
        self.read_bytes(len)
    }

    /// Length-prefixed payload followed by one uncounted terminator byte.
    pub fn decode_length_prefixed_string_nul(
        &mut self,
        prefix_width: usize,
    ) -> Result<Bytes, DecodeError> {
        let payload = self.decode_length_prefixed_string(prefix_width)?;
        self.read_u8()?;
        Ok(payload)
    }

    /// Payload preceded by a length-coded integer. A null length is a null
    /// string.
    pub fn decode_varint_prefixed_string(&mut self) -> Result<Option<Bytes>, DecodeError> {
        match self.decode_varint()? {
            Some(len) => {
                // A length beyond the address space can never be satisfied;
                // the stream reports how much it actually holds.
                let len = usize::try_from(len).unwrap_or(usize::MAX);
                self.read_bytes(len).map(Some)
            }
            None => Ok(None),
        }
    }
}
