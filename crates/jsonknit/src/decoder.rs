//! Byte-oriented state-machine JSON decoder.
//!
//! Object frames walk `Start -> Key -> PreSeparator -> Value -> PostValue ->
//! End`; array frames walk the keyless `Start -> Value -> PostValue -> End`
//! analogue. The states are not reified as an enum on the decoder: each frame
//! is one loop whose sections read bytes for exactly one state, so the
//! "current state" is the program counter of that loop and per-frame counters
//! live on the call stack rather than as fields that need manual restore.
//!
//! Value dispatch stages scalars into the decoder's reusable value buffer and
//! only *tags* nested objects/arrays: control returns to the caller's
//! unmarshal callback, which recurses through [`Value::object`] /
//! [`Value::array`] on the same decoder state, or skips the aggregate
//! implicitly by calling neither.
//!
//! Any grammar violation is immediately fatal to the current
//! [`Decoder::decode`] call; input exhaustion before a terminal state is
//! reported as [`Error::UnexpectedEnd`] so callers can tell truncated input
//! from malformed input.

use std::mem;
use std::sync::Arc;

use crate::buffer::ByteBuffer;
use crate::error::{Error, Result};
use crate::pool::Pool;
use crate::source::ByteSource;
use crate::value::{Tag, Value};
use crate::{ArrayDecodable, Decodable, DecodeRoot};

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Parses JSON incrementally from a [`ByteSource`], dispatching typed
/// [`Value`]s to caller-supplied unmarshal callbacks.
///
/// A decoder is reusable for sequential [`decode`](Decoder::decode) calls
/// (e.g. over a rewound source), but a single instance serves one logical
/// call stack at a time; independent decoders may share a [`Pool`].
pub struct Decoder<'r> {
    src: &'r mut dyn ByteSource,
    pool: Arc<Pool>,
    /// Value-staging buffer; holds the bytes of the most recent scalar and is
    /// only valid until the decoder advances past that value.
    val: ByteBuffer,
}

impl<'r> Decoder<'r> {
    /// Returns a decoder reading from `src`, backed by the shared pool.
    pub fn new(src: &'r mut dyn ByteSource) -> Self {
        Self::with_pool(src, Pool::shared())
    }

    /// Returns a decoder reading from `src`, drawing buffers from `pool`.
    pub fn with_pool(src: &'r mut dyn ByteSource, pool: Arc<Pool>) -> Self {
        let val = pool.acquire();
        Self { src, pool, val }
    }

    /// Decodes one top-level JSON object or array into `root`.
    ///
    /// The leading structural byte selects the contract: `{` requires
    /// [`DecodeRoot::as_object`], `[` requires [`DecodeRoot::as_array`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidValue`] when `root` lacks the required contract,
    /// [`Error::InvalidChar`] / [`Error::UnexpectedEnd`] on malformed or
    /// truncated input, and any error returned by an unmarshal callback.
    pub fn decode(&mut self, root: &mut dyn DecodeRoot) -> Result<()> {
        self.val.clear();
        match self.next_nonspace()? {
            b'{' => match root.as_object() {
                Some(target) => self.decode_object(target),
                None => Err(Error::InvalidValue),
            },
            b'[' => match root.as_array() {
                Some(target) => self.decode_array(target),
                None => Err(Error::InvalidValue),
            },
            byte => Err(Error::InvalidChar(char::from(byte))),
        }
    }

    /// Drives one object frame; the opening `{` has already been consumed.
    pub(crate) fn decode_object(&mut self, target: &mut dyn Decodable) -> Result<()> {
        let mut key = self.pool.acquire();
        let res = self.object_frame(&mut key, target);
        self.pool.release(key);
        res
    }

    fn object_frame(&mut self, key: &mut ByteBuffer, target: &mut dyn Decodable) -> Result<()> {
        let mut first = true;
        loop {
            // Start: expect a key, or the close of an empty object.
            let byte = self.next_nonspace()?;
            match byte {
                b'"' => {}
                b'}' if first => return Ok(()),
                _ => return Err(Error::InvalidChar(char::from(byte))),
            }
            first = false;

            // Key: accumulate until the unescaped closing quote.
            self.read_quoted(key)?;

            // PreSeparator.
            let byte = self.next_nonspace()?;
            if byte != b':' {
                return Err(Error::InvalidChar(char::from(byte)));
            }

            // Value.
            let tag = self.read_value()?;
            self.dispatch_field(key, tag, target)?;
            key.clear();
            self.val.clear();

            // PostValue.
            let byte = self.next_nonspace()?;
            match byte {
                b',' => {}
                b'}' => return Ok(()),
                _ => return Err(Error::InvalidChar(char::from(byte))),
            }
        }
    }

    /// Drives one array frame; the opening `[` has already been consumed.
    pub(crate) fn decode_array(&mut self, target: &mut dyn ArrayDecodable) -> Result<()> {
        let mut first = true;
        loop {
            // Start: expect a value, or the close of an empty array.
            let byte = self.next_nonspace()?;
            if byte == b']' && first {
                return Ok(());
            }
            self.src.unread_byte(byte);
            first = false;

            // Value.
            let tag = self.read_value()?;
            self.dispatch_element(tag, target)?;
            self.val.clear();

            // PostValue.
            let byte = self.next_nonspace()?;
            match byte {
                b',' => {}
                b']' => return Ok(()),
                _ => return Err(Error::InvalidChar(char::from(byte))),
            }
        }
    }

    fn dispatch_field(
        &mut self,
        key: &ByteBuffer,
        tag: Tag,
        target: &mut dyn Decodable,
    ) -> Result<()> {
        let name = key.to_str().map_err(|_| Error::InvalidUtf8)?;
        let mut value = Value::new(tag, self);
        let res = target.decode_field(name, &mut value);
        let consumed = value.consumed();
        res?;
        self.skip_unclaimed(tag, consumed)
    }

    fn dispatch_element(&mut self, tag: Tag, target: &mut dyn ArrayDecodable) -> Result<()> {
        let mut value = Value::new(tag, self);
        let res = target.decode_element(&mut value);
        let consumed = value.consumed();
        res?;
        self.skip_unclaimed(tag, consumed)
    }

    /// Reads one value: scalars are staged into the value buffer in full;
    /// `{` / `[` are consumed and only tagged, leaving the nested content for
    /// the callback (or [`Self::skip_unclaimed`]).
    fn read_value(&mut self) -> Result<Tag> {
        self.val.clear();
        let byte = self.next_nonspace()?;
        match byte {
            b'"' => {
                let mut staged = mem::take(&mut self.val);
                let res = self.read_quoted(&mut staged);
                self.val = staged;
                res?;
                Ok(Tag::String)
            }
            b't' => {
                self.read_literal(b"rue")?;
                self.val.push_str("true");
                Ok(Tag::Bool)
            }
            b'f' => {
                self.read_literal(b"alse")?;
                self.val.push_str("false");
                Ok(Tag::Bool)
            }
            b'n' => {
                self.read_literal(b"ull")?;
                Ok(Tag::Null)
            }
            b'{' => Ok(Tag::Object),
            b'[' => Ok(Tag::Array),
            b'-' | b'0'..=b'9' => {
                let mut staged = mem::take(&mut self.val);
                staged.push_byte(byte);
                let res = self.read_number_tail(&mut staged);
                self.val = staged;
                res?;
                Ok(Tag::Number)
            }
            _ => Err(Error::InvalidChar(char::from(byte))),
        }
    }

    /// Accumulates string bytes into `buf` until the unescaped closing quote.
    /// A backslash stages the byte that follows it verbatim, which is how
    /// `\"` round-trips; no other escape sequences are interpreted.
    fn read_quoted(&mut self, buf: &mut ByteBuffer) -> Result<()> {
        loop {
            match self.next_byte()? {
                b'"' => return Ok(()),
                b'\\' => {
                    let escaped = self.next_byte()?;
                    buf.push_byte(escaped);
                }
                byte => buf.push_byte(byte),
            }
        }
    }

    fn read_literal(&mut self, rest: &[u8]) -> Result<()> {
        for &expected in rest {
            let byte = self.next_byte()?;
            if byte != expected {
                return Err(Error::InvalidChar(char::from(byte)));
            }
        }
        Ok(())
    }

    /// Accumulates a numeral; the terminating structural byte is pushed back
    /// for the enclosing frame's PostValue state. End of input terminates the
    /// numeral too, leaving truncation detection to the enclosing frame.
    fn read_number_tail(&mut self, buf: &mut ByteBuffer) -> Result<()> {
        loop {
            match self.src.read_byte()? {
                None => return Ok(()),
                Some(byte) if matches!(byte, b'0'..=b'9' | b'.' | b'e' | b'E' | b'+' | b'-') => {
                    buf.push_byte(byte);
                }
                Some(byte) => {
                    self.src.unread_byte(byte);
                    return Ok(());
                }
            }
        }
    }

    /// Consumes a nested aggregate the callback left untouched.
    fn skip_unclaimed(&mut self, tag: Tag, consumed: bool) -> Result<()> {
        if consumed || !matches!(tag, Tag::Object | Tag::Array) {
            return Ok(());
        }

        // The opening byte is already consumed; balance the rest, staying
        // string-aware so structural bytes inside literals don't count.
        let mut depth = 1usize;
        let mut in_string = false;
        while depth > 0 {
            let byte = self.next_byte()?;
            if in_string {
                match byte {
                    b'\\' => {
                        self.next_byte()?;
                    }
                    b'"' => in_string = false,
                    _ => {}
                }
            } else {
                match byte {
                    b'"' => in_string = true,
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => depth -= 1,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub(crate) fn staged(&self) -> &ByteBuffer {
        &self.val
    }

    fn next_byte(&mut self) -> Result<u8> {
        self.src.read_byte()?.ok_or(Error::UnexpectedEnd)
    }

    fn next_nonspace(&mut self) -> Result<u8> {
        loop {
            let byte = self.next_byte()?;
            if !is_whitespace(byte) {
                return Ok(byte);
            }
        }
    }
}

impl Drop for Decoder<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.val));
    }
}
