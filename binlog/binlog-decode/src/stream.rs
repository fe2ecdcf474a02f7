//! Sequential, non-seekable byte sources consumed by the decoder.

use std::io::{ErrorKind, Read};

use binlog_core::DecodeError;
use bytes::{Buf, Bytes};

/// Forward-only byte source.
///
/// Implementations hand out exactly the requested number of bytes or fail with
/// [`DecodeError::UnexpectedEndOfStream`]; they never return a short read.
pub trait ByteStream {
    /// Read exactly `n` bytes.
    fn read(&mut self, n: usize) -> Result<Bytes, DecodeError>;

    /// Read a single byte.
    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read(1)?[0])
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn read(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        (**self).read(n)
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        (**self).read_u8()
    }
}

/// In-memory source; reads split off the front without copying.
impl ByteStream for Bytes {
    fn read(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::UnexpectedEndOfStream {
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(self.split_to(n))
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        self.try_get_u8()
            .map_err(|_| DecodeError::UnexpectedEndOfStream {
                requested: 1,
                available: 0,
            })
    }
}

/// Adapter over any [`std::io::Read`] (file, socket, pipe).
///
/// Wrap the reader in a `BufReader` when it is unbuffered; every decode issues
/// its own read.
#[derive(Debug)]
pub struct IoStream<R> {
    inner: R,
}

impl<R: Read> IoStream<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteStream for IoStream<R> {
    fn read(&mut self, n: usize) -> Result<Bytes, DecodeError> {
        // The buffer grows with the data actually read, never with the
        // declared length.
        let mut buf = Vec::new();
        match (&mut self.inner).take(n as u64).read_to_end(&mut buf) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {}
            Err(e) => return Err(e.into()),
        }
        if buf.len() < n {
            return Err(DecodeError::UnexpectedEndOfStream {
                requested: n,
                available: buf.len(),
            });
        }
        Ok(Bytes::from(buf))
    }
}
