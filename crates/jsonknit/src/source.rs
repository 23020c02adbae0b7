//! Byte sources feeding the decoder.
//!
//! The decoder needs exactly two primitives from its input: read one byte,
//! and push the last byte back so a structural character can be re-inspected
//! by the next state.

use std::io::{self, Read};

use crate::error::Result;

/// A byte stream with one-byte pushback.
pub trait ByteSource {
    /// Reads the next byte, or `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying stream.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Pushes `byte` back so the next [`read_byte`](ByteSource::read_byte)
    /// returns it again. At most one byte may be pending at a time.
    fn unread_byte(&mut self, byte: u8);
}

/// In-memory byte source over a borrowed slice.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Wraps `data` as a source positioned at its start.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Resets the read position to the start of the slice.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Ok(None);
        };
        self.pos += 1;
        Ok(Some(byte))
    }

    fn unread_byte(&mut self, _byte: u8) {
        debug_assert!(self.pos > 0, "unread before any read");
        self.pos -= 1;
    }
}

/// Adapter that lets any [`io::Read`] act as a [`ByteSource`].
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    pushback: Option<u8>,
}

impl<R: Read> ReadSource<R> {
    /// Wraps `inner` with a one-byte pushback slot.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pushback: None,
        }
    }

    /// Consumes the adapter, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }

        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn unread_byte(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "pushback slot already occupied");
        self.pushback = Some(byte);
    }
}
