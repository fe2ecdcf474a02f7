use std::io::{self, Cursor, Read};

use binlog_decode::{ByteStream, DecodeError, FieldDecoder, IoStream, Value};
use bytes::Bytes;

/// Reader that hands out at most `chunk` bytes per call.
struct Trickle {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl Read for Trickle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

struct Broken;

impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
    }
}

#[test]
fn bytes_source_splits_without_copy() {
    let mut src = Bytes::from_static(b"abcdef");
    assert_eq!(src.read(2).expect("read"), &b"ab"[..]);
    assert_eq!(src.read_u8().expect("read"), b'c');
    assert_eq!(src.len(), 3);
    assert!(matches!(
        src.read(4),
        Err(DecodeError::UnexpectedEndOfStream { requested: 4, available: 3 })
    ));
}

#[test]
fn io_source_assembles_partial_reads() {
    let trickle = Trickle {
        data: (0..=20).collect(),
        pos: 0,
        chunk: 3,
    };
    let mut d = FieldDecoder::new(IoStream::new(trickle));
    assert_eq!(d.decode_uint(8).expect("u64"), u64::from_le_bytes([0, 1, 2, 3, 4, 5, 6, 7]));
    assert_eq!(d.decode_byte_array(5).expect("bytes"), vec![8, 9, 10, 11, 12]);
    assert_eq!(d.position(), 13);
}

#[test]
fn io_source_reports_available_bytes_on_eof() {
    let mut d = FieldDecoder::new(IoStream::new(Cursor::new(vec![1, 2, 3])));
    assert!(matches!(
        d.decode_u32(),
        Err(DecodeError::UnexpectedEndOfStream { requested: 4, available: 3 })
    ));
}

#[test]
fn io_source_propagates_other_errors() {
    let mut d = FieldDecoder::new(IoStream::new(Broken));
    assert!(matches!(d.decode_u8(), Err(DecodeError::Io(e)) if e.kind() == io::ErrorKind::ConnectionReset));
}

#[test]
fn decoder_over_borrowed_stream_leaves_rest() {
    let mut src = Bytes::from_static(&[251, 9, 9]);
    {
        let mut d = FieldDecoder::new(&mut src);
        assert_eq!(
            d.decode_value(binlog_decode::ColumnType::String, &Default::default())
                .expect("decode"),
            Value::Null
        );
    }
    assert_eq!(src, &[9, 9][..]);
}

#[test]
fn io_source_huge_varint_length_reports_end_of_stream() {
    let mut bytes = vec![254];
    bytes.extend_from_slice(&[0xFF; 8]);
    bytes.extend_from_slice(b"abc");
    let mut d = FieldDecoder::new(IoStream::new(Cursor::new(bytes)));
    assert!(matches!(
        d.decode_varint_prefixed_string(),
        Err(DecodeError::UnexpectedEndOfStream { available: 3, .. })
    ));
}

#[test]
fn io_source_large_length_prefix_reports_end_of_stream() {
    let mut bytes = vec![254];
    bytes.extend_from_slice(&(1u64 << 40).to_le_bytes());
    bytes.extend_from_slice(b"xy");
    let mut d = FieldDecoder::new(IoStream::new(Cursor::new(bytes)));
    assert!(matches!(
        d.decode_varint_prefixed_string(),
        Err(DecodeError::UnexpectedEndOfStream { available: 2, .. })
    ));

    let mut bytes = vec![0xFF; 4];
    bytes.extend_from_slice(b"abc");
    let mut d = FieldDecoder::new(IoStream::new(Cursor::new(bytes)));
    let err = d
        .decode_value(
            binlog_decode::ColumnType::Blob,
            &binlog_decode::ColumnMetadata::LengthSize { length_size: 4 },
        )
        .expect_err("declared length exceeds the stream");
    assert!(matches!(
        err,
        DecodeError::UnexpectedEndOfStream { requested: 0xFFFF_FFFF, available: 3 }
    ));
}

#[test]
fn bytes_source_huge_varint_length_reports_end_of_stream() {
    let mut bytes = vec![254];
    bytes.extend_from_slice(&[0xFF; 8]);
    bytes.push(b'z');
    let mut d = FieldDecoder::new(Bytes::from(bytes));
    assert!(matches!(
        d.decode_varint_prefixed_string(),
        Err(DecodeError::UnexpectedEndOfStream { available: 1, .. })
    ));
}
