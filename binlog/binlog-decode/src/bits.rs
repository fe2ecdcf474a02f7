use binlog_core::DecodeError;

use crate::{decoder::FieldDecoder, stream::ByteStream};

impl<S: ByteStream> FieldDecoder<S> {
    pub fn decode_byte_array(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        Ok(self.read_bytes(n)?.to_vec())
    }

    /// `n` booleans from `ceil(n / 8)` bytes, most significant bit first.
    /// Padding bits of the last byte are dropped.
    pub fn decode_bitmap(&mut self, n: usize) -> Result<Vec<bool>, DecodeError> {
        let raw = self.read_bytes(n.div_ceil(8))?;
        Ok(raw
            .iter()
            .flat_map(|byte| (0..8).rev().map(move |bit| byte & (1 << bit) != 0))
            .take(n)
            .collect())
    }

    /// Labels whose mask is set in a little-endian `u32`, in table order.
    pub fn decode_named_bitmask<L: Copy>(
        &mut self,
        labels: &[(L, u32)],
    ) -> Result<Vec<L>, DecodeError> {
        let flags = self.decode_u32()?;
        Ok(labels
            .iter()
            .filter(|(_, mask)| flags & mask != 0)
            .map(|(label, _)| *label)
            .collect())
    }
}
