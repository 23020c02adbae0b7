//! Streaming, depth-tracked JSON encoder.
//!
//! The encoder buffers one top-level call at a time: [`Encoder::encode`]
//! writes into a single pool-acquired [`ByteBuffer`] and flushes it to the
//! sink at every frame close. Buffering a full frame lets the
//! comma-before-value decision run on O(1) state (the `child` count of the
//! current frame) instead of look-ahead, and means a failed marshal callback
//! aborts before any partial bytes reach the sink from that frame.
//!
//! Frame bookkeeping discipline: on entering a nested frame the parent's
//! `child` count is parked in an ordinary local and `child` restarts at zero;
//! both `depth` and `child` are restored on every exit path, success or
//! error, by keeping the fallible frame body in its own helper.

use std::io::Write;
use std::mem;
use std::sync::Arc;

use crate::buffer::ByteBuffer;
use crate::error::Result;
use crate::pool::Pool;
use crate::{ArrayEncodable, Encodable};

/// Serializes [`Encodable`] values as JSON objects into an [`io::Write`]
/// sink.
///
/// A single encoder instance is not meant for concurrent use; it carries
/// mutable depth/child/buffer state for one logical call stack (which `&mut
/// self` enforces). Independent encoders may run on separate threads and
/// share a [`Pool`].
///
/// # Examples
///
/// ```
/// use jsonknit::{Encodable, Encoder, Result};
///
/// struct Probe {
///     id: f64,
/// }
///
/// impl Encodable for Probe {
///     fn encode(&self, enc: &mut Encoder<'_>) -> Result<()> {
///         enc.number("id", self.id);
///         Ok(())
///     }
/// }
///
/// let mut out = Vec::new();
/// Encoder::new(&mut out).encode(&Probe { id: 7.0 })?;
/// assert_eq!(out, br#"{"id":7}"#);
/// # Ok::<(), jsonknit::Error>(())
/// ```
///
/// [`io::Write`]: std::io::Write
pub struct Encoder<'w> {
    sink: &'w mut dyn Write,
    pool: Arc<Pool>,
    buf: ByteBuffer,
    depth: usize,
    child: usize,
}

impl<'w> Encoder<'w> {
    /// Returns an encoder writing to `sink`, backed by the shared pool.
    pub fn new(sink: &'w mut dyn Write) -> Self {
        Self::with_pool(sink, Pool::shared())
    }

    /// Returns an encoder writing to `sink`, drawing buffers from `pool`.
    pub fn with_pool(sink: &'w mut dyn Write, pool: Arc<Pool>) -> Self {
        let buf = pool.acquire();
        Self {
            sink,
            pool,
            buf,
            depth: 0,
            child: 0,
        }
    }

    /// Encodes `root` as a JSON object and flushes it to the sink.
    ///
    /// The encoder stays reusable after an error: the staging buffer is
    /// cleared before returning, and depth/child bookkeeping is rewound.
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by a marshal callback or by the
    /// sink.
    pub fn encode(&mut self, root: &dyn Encodable) -> Result<()> {
        let parent = mem::replace(&mut self.child, 0);
        self.depth += 1;
        let res = self.object_frame(root);
        self.depth -= 1;
        self.child = parent;
        if res.is_err() && self.depth == 0 {
            self.buf.clear();
        }
        res
    }

    /// Encodes `value` as a nested object under `key`.
    ///
    /// Callable only from within an active marshal callback.
    ///
    /// # Errors
    ///
    /// Propagates the first callback or sink error.
    pub fn object(&mut self, key: &str, value: &dyn Encodable) -> Result<()> {
        self.separator();
        self.write_key(key);
        let parent = mem::replace(&mut self.child, 0);
        self.depth += 1;
        let res = self.object_frame(value);
        self.depth -= 1;
        self.child = parent;
        if res.is_ok() {
            self.child += 1;
        }
        res
    }

    /// Encodes `value` as a nested array under `key`.
    ///
    /// Callable only from within an active marshal callback.
    ///
    /// # Errors
    ///
    /// Propagates the first callback or sink error.
    pub fn array(&mut self, key: &str, value: &dyn ArrayEncodable) -> Result<()> {
        self.separator();
        self.write_key(key);
        let parent = mem::replace(&mut self.child, 0);
        self.depth += 1;
        let res = self.array_frame(value);
        self.depth -= 1;
        self.child = parent;
        if res.is_ok() {
            self.child += 1;
        }
        res
    }

    /// Writes `"key":"value"`, escaping embedded double quotes in `value`.
    pub fn string(&mut self, key: &str, value: &str) {
        self.separator();
        self.write_key(key);
        self.buf.push_byte(b'"');
        self.buf.push_escaped_str(value);
        self.buf.push_byte(b'"');
        self.child += 1;
    }

    /// Writes `"key":"value"` with `value` emitted verbatim.
    ///
    /// A performance escape hatch, not a default: the caller must guarantee
    /// `value` contains no characters requiring escaping, notably no double
    /// quotes. The codec does not verify this.
    pub fn unsafe_string(&mut self, key: &str, value: &str) {
        self.separator();
        self.write_key(key);
        self.buf.push_byte(b'"');
        self.buf.push_str(value);
        self.buf.push_byte(b'"');
        self.child += 1;
    }

    /// Writes `"key":` followed by the shortest round-trip decimal form of
    /// `value`.
    pub fn number(&mut self, key: &str, value: f64) {
        self.separator();
        self.write_key(key);
        self.buf.push_f64(value);
        self.child += 1;
    }

    /// Writes `"key":true` or `"key":false`.
    pub fn boolean(&mut self, key: &str, value: bool) {
        self.separator();
        self.write_key(key);
        self.buf.push_bool(value);
        self.child += 1;
    }

    // Keyless object element, used by `ArrayEncoder`.
    fn element_object(&mut self, value: &dyn Encodable) -> Result<()> {
        self.separator();
        let parent = mem::replace(&mut self.child, 0);
        self.depth += 1;
        let res = self.object_frame(value);
        self.depth -= 1;
        self.child = parent;
        if res.is_ok() {
            self.child += 1;
        }
        res
    }

    // Keyless array element, used by `ArrayEncoder`.
    fn element_array(&mut self, value: &dyn ArrayEncodable) -> Result<()> {
        self.separator();
        let parent = mem::replace(&mut self.child, 0);
        self.depth += 1;
        let res = self.array_frame(value);
        self.depth -= 1;
        self.child = parent;
        if res.is_ok() {
            self.child += 1;
        }
        res
    }

    fn object_frame(&mut self, value: &dyn Encodable) -> Result<()> {
        self.buf.push_byte(b'{');
        value.encode(self)?;
        self.buf.push_byte(b'}');
        self.flush()
    }

    fn array_frame(&mut self, value: &dyn ArrayEncodable) -> Result<()> {
        self.buf.push_byte(b'[');
        value.encode_elements(&mut ArrayEncoder { enc: self })?;
        self.buf.push_byte(b']');
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.sink.write_all(self.buf.as_bytes())?;
        self.buf.clear();
        Ok(())
    }

    fn separator(&mut self) {
        if self.child > 0 {
            self.buf.push_byte(b',');
        }
    }

    fn write_key(&mut self, key: &str) {
        self.buf.push_byte(b'"');
        self.buf.push_str(key);
        self.buf.push_str("\":");
    }
}

impl Drop for Encoder<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.buf));
    }
}

/// Positional (non-keyed) writer handed to [`ArrayEncodable::encode_elements`].
///
/// Shares the parent [`Encoder`]'s buffer, sink, and depth/child discipline;
/// every primitive writes a leading comma when the current array frame
/// already has children, then the bare value.
pub struct ArrayEncoder<'a, 'w> {
    enc: &'a mut Encoder<'w>,
}

impl ArrayEncoder<'_, '_> {
    /// Encodes `value` as an object element.
    ///
    /// # Errors
    ///
    /// Propagates the first callback or sink error.
    pub fn object(&mut self, value: &dyn Encodable) -> Result<()> {
        self.enc.element_object(value)
    }

    /// Encodes `value` as a nested array element.
    ///
    /// # Errors
    ///
    /// Propagates the first callback or sink error.
    pub fn array(&mut self, value: &dyn ArrayEncodable) -> Result<()> {
        self.enc.element_array(value)
    }

    /// Writes a quoted string element, escaping embedded double quotes.
    pub fn string(&mut self, value: &str) {
        self.enc.separator();
        self.enc.buf.push_byte(b'"');
        self.enc.buf.push_escaped_str(value);
        self.enc.buf.push_byte(b'"');
        self.enc.child += 1;
    }

    /// Writes a quoted string element verbatim; same caller invariant as
    /// [`Encoder::unsafe_string`].
    pub fn unsafe_string(&mut self, value: &str) {
        self.enc.separator();
        self.enc.buf.push_byte(b'"');
        self.enc.buf.push_str(value);
        self.enc.buf.push_byte(b'"');
        self.enc.child += 1;
    }

    /// Writes a bare numeral element.
    pub fn number(&mut self, value: f64) {
        self.enc.separator();
        self.enc.buf.push_f64(value);
        self.enc.child += 1;
    }

    /// Writes a bare `true`/`false` element.
    pub fn boolean(&mut self, value: bool) {
        self.enc.separator();
        self.enc.buf.push_bool(value);
        self.enc.child += 1;
    }
}
