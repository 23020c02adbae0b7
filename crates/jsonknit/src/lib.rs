//! A reflection-free, streaming JSON codec.
//!
//! Application types implement explicit marshal/unmarshal contracts and the
//! codec drives byte-level encoding and decoding without inspecting type
//! metadata at runtime: the [`Encoder`] recursively serializes nested
//! objects/arrays through a pooled buffer, and the [`Decoder`] is a
//! byte-oriented state machine that parses incrementally from a
//! [`ByteSource`] and dispatches typed [`Value`]s to caller-supplied
//! callbacks.
//!
//! Only declared, typed structures are supported; there is no generic
//! `Any`-style JSON tree. Strings interpret exactly one escape sequence
//! (`\"`), numbers are IEEE doubles emitted in shortest round-trip form, and
//! `null` on input is a tag meaning "absent".
//!
//! # Examples
//!
//! ```
//! use jsonknit::{
//!     Decodable, DecodeRoot, Decoder, Encodable, Encoder, Result, SliceSource, Value,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     name: String,
//!     age: f64,
//! }
//!
//! impl Encodable for User {
//!     fn encode(&self, enc: &mut Encoder<'_>) -> Result<()> {
//!         enc.string("name", &self.name);
//!         enc.number("age", self.age);
//!         Ok(())
//!     }
//! }
//!
//! impl Decodable for User {
//!     fn decode_field(&mut self, key: &str, value: &mut Value<'_, '_>) -> Result<()> {
//!         match key {
//!             "name" => self.name = value.string()?.to_owned(),
//!             "age" => self.age = value.number()?,
//!             _ => {}
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl DecodeRoot for User {
//!     fn as_object(&mut self) -> Option<&mut dyn Decodable> {
//!         Some(self)
//!     }
//! }
//!
//! let user = User { name: "Test".into(), age: 32.0 };
//!
//! let mut wire = Vec::new();
//! Encoder::new(&mut wire).encode(&user)?;
//! assert_eq!(wire, br#"{"name":"Test","age":32}"#);
//!
//! let mut src = SliceSource::new(&wire);
//! let mut decoded = User::default();
//! Decoder::new(&mut src).decode(&mut decoded)?;
//! assert_eq!(decoded, user);
//! # Ok::<(), jsonknit::Error>(())
//! ```

mod buffer;
mod decoder;
mod encoder;
mod error;
mod pool;
mod source;
mod value;

pub use buffer::ByteBuffer;
pub use decoder::Decoder;
pub use encoder::{ArrayEncoder, Encoder};
pub use error::{Error, Result};
pub use pool::Pool;
pub use source::{ByteSource, ReadSource, SliceSource};
pub use value::{Tag, Value};

/// A type that can write itself as a JSON object through an [`Encoder`].
pub trait Encodable {
    /// Writes this value's fields via the encoder's primitives.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the whole top-level encode.
    fn encode(&self, enc: &mut Encoder<'_>) -> Result<()>;
}

/// A type that can write itself as a JSON array through an [`ArrayEncoder`].
pub trait ArrayEncodable {
    /// Writes this value's elements via the array encoder's primitives.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the whole top-level encode.
    fn encode_elements(&self, enc: &mut ArrayEncoder<'_, '_>) -> Result<()>;
}

/// A type that can be populated from a decoded JSON object.
///
/// The decoder invokes [`decode_field`](Decodable::decode_field) once per
/// parsed key; a key the implementation does not recognize is simply ignored
/// by doing nothing with the value (nested aggregates are then skipped by the
/// decoder).
pub trait Decodable {
    /// Receives one parsed key and its value.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the whole top-level decode.
    fn decode_field(&mut self, key: &str, value: &mut Value<'_, '_>) -> Result<()>;
}

/// A type that can be populated from a decoded JSON array.
pub trait ArrayDecodable {
    /// Receives one parsed element.
    ///
    /// # Errors
    ///
    /// Returning an error aborts the whole top-level decode.
    fn decode_element(&mut self, value: &mut Value<'_, '_>) -> Result<()>;
}

/// Root target for [`Decoder::decode`].
///
/// The leading structural byte of the input decides which contract is
/// required; a root that does not offer it fails with
/// [`Error::InvalidValue`]. Most implementations forward one of the hooks to
/// `self`:
///
/// ```
/// use jsonknit::{Decodable, DecodeRoot, Result, Value};
///
/// # struct Config;
/// # impl Decodable for Config {
/// #     fn decode_field(&mut self, _: &str, _: &mut Value<'_, '_>) -> Result<()> { Ok(()) }
/// # }
/// impl DecodeRoot for Config {
///     fn as_object(&mut self) -> Option<&mut dyn Decodable> {
///         Some(self)
///     }
/// }
/// ```
pub trait DecodeRoot {
    /// The keyed unmarshal contract, required when the input is an object.
    fn as_object(&mut self) -> Option<&mut dyn Decodable> {
        None
    }

    /// The element unmarshal contract, required when the input is an array.
    fn as_array(&mut self) -> Option<&mut dyn ArrayDecodable> {
        None
    }
}
