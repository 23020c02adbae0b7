//! Borrowed, short-lived views over just-parsed values.

use crate::decoder::Decoder;
use crate::error::{Error, Result};
use crate::{ArrayDecodable, Decodable};

/// The scalar/aggregate kind recorded on a [`Value`], gating which accessor
/// is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// The `null` literal, meaning "absent".
    Null,
    /// A nested object whose content has not been consumed yet.
    Object,
    /// A nested array whose content has not been consumed yet.
    Array,
    /// A string literal, staged unescaped.
    String,
    /// A numeric literal, staged as ASCII.
    Number,
    /// A `true`/`false` literal.
    Bool,
}

/// A tagged, read-only view over one decoded value.
///
/// The bytes a `Value` exposes live in the decoder's reusable staging buffer
/// and are only valid until the decoder advances past the value; the `&mut
/// Decoder` borrow inside makes retaining one past its callback a compile
/// error rather than a documentation footnote.
///
/// Each accessor checks the parsed tag first and returns the matching
/// `ValueNot*` error on mismatch, so callbacks can branch on expected versus
/// actual shape per key instead of getting garbage.
pub struct Value<'a, 'r> {
    tag: Tag,
    dec: &'a mut Decoder<'r>,
    consumed: bool,
}

impl<'a, 'r> Value<'a, 'r> {
    pub(crate) fn new(tag: Tag, dec: &'a mut Decoder<'r>) -> Self {
        Self {
            tag,
            dec,
            consumed: false,
        }
    }

    pub(crate) fn consumed(&self) -> bool {
        self.consumed
    }

    /// The parsed kind of this value.
    #[must_use]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns `true` when the value is the `null` literal.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.tag == Tag::Null
    }

    /// Recursively decodes a nested object against `target`.
    ///
    /// A `null` value is a no-op, supporting optional/absent fields.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotObject`] when the tag is neither object nor null;
    /// otherwise any error produced while decoding the nested object.
    pub fn object(&mut self, target: &mut dyn Decodable) -> Result<()> {
        match self.tag {
            Tag::Null => Ok(()),
            Tag::Object => {
                self.consumed = true;
                self.dec.decode_object(target)
            }
            _ => Err(Error::ValueNotObject),
        }
    }

    /// Recursively decodes a nested array against `target`.
    ///
    /// A `null` value is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotArray`] when the tag is neither array nor null;
    /// otherwise any error produced while decoding the nested array.
    pub fn array(&mut self, target: &mut dyn ArrayDecodable) -> Result<()> {
        match self.tag {
            Tag::Null => Ok(()),
            Tag::Array => {
                self.consumed = true;
                self.dec.decode_array(target)
            }
            _ => Err(Error::ValueNotArray),
        }
    }

    /// Returns the staged, already-unescaped string content.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotString`] on tag mismatch, [`Error::InvalidUtf8`] when
    /// the staged bytes are not UTF-8.
    pub fn string(&self) -> Result<&str> {
        if self.tag != Tag::String {
            return Err(Error::ValueNotString);
        }
        self.dec.staged().to_str().map_err(|_| Error::InvalidUtf8)
    }

    /// Returns the staged string content as raw bytes.
    ///
    /// The slice aliases the decoder's staging buffer and must not be
    /// retained past the current callback; the lifetime ties it to this
    /// `Value`.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotBytes`] on tag mismatch.
    pub fn bytes(&self) -> Result<&[u8]> {
        if self.tag != Tag::String {
            return Err(Error::ValueNotBytes);
        }
        Ok(self.dec.staged().as_bytes())
    }

    /// Parses the staged numeral into a 64-bit float.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotNumber`] on tag mismatch, [`Error::InvalidNumber`]
    /// when the staged bytes do not form a JSON number.
    pub fn number(&self) -> Result<f64> {
        if self.tag != Tag::Number {
            return Err(Error::ValueNotNumber);
        }
        let text = self.dec.staged().to_str().map_err(|_| Error::InvalidUtf8)?;
        text.parse().map_err(|_| Error::InvalidNumber)
    }

    /// Returns the boolean value.
    ///
    /// Only `true`/`false` are legal literals, so the value is inferred from
    /// the staged literal's length.
    ///
    /// # Errors
    ///
    /// [`Error::ValueNotBool`] on tag mismatch.
    pub fn boolean(&self) -> Result<bool> {
        if self.tag != Tag::Bool {
            return Err(Error::ValueNotBool);
        }
        Ok(self.dec.staged().len() == 4)
    }
}
