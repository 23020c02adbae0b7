//! Growable byte accumulator with typed append helpers.
//!
//! One `ByteBuffer` backs one encode/decode frame at a time: acquired from
//! the [`Pool`](crate::Pool), written during the frame, handed to the sink or
//! inspected by the caller, then cleared and returned. Length only grows via
//! appends or resets to zero; none of the append operations can fail.

use core::fmt;

use bstr::{BStr, ByteSlice};

/// A growable byte buffer used for staging encoded output and decoded
/// key/value bytes.
#[derive(Default)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Returns an empty buffer with a small initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(32),
        }
    }

    /// Appends a single byte.
    #[inline]
    pub fn push_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Appends raw bytes verbatim.
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Appends a string verbatim, without any escaping.
    #[inline]
    pub fn push_str(&mut self, text: &str) {
        self.data.extend_from_slice(text.as_bytes());
    }

    /// Appends a string, backslash-escaping each embedded double quote.
    ///
    /// Only `"` is escaped; the wire format interprets no other escape
    /// sequences.
    pub fn push_escaped_str(&mut self, text: &str) {
        for &byte in text.as_bytes() {
            if byte == b'"' {
                self.data.push(b'\\');
            }
            self.data.push(byte);
        }
    }

    /// Appends a float in its shortest round-trip decimal form.
    pub fn push_f64(&mut self, value: f64) {
        // `fmt::Write` for a Vec-backed buffer cannot fail.
        let _ = fmt::Write::write_fmt(self, format_args!("{value}"));
    }

    /// Appends `true` or `false`.
    pub fn push_bool(&mut self, value: bool) {
        self.push_str(if value { "true" } else { "false" });
    }

    /// Returns the current contents as a byte view.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the current contents as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails when the buffered bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, bstr::Utf8Error> {
        self.data.to_str()
    }

    /// Number of buffered bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when nothing has been buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Resets the buffer to empty, retaining capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl fmt::Write for ByteBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteBuffer")
            .field(&BStr::new(&self.data))
            .finish()
    }
}
