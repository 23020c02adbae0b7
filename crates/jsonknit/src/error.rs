use thiserror::Error;

/// Errors produced while encoding or decoding.
///
/// Every error is fatal to the top-level [`Encoder::encode`] or
/// [`Decoder::decode`] call that produced it; there is no recovery or resync.
///
/// [`Encoder::encode`]: crate::Encoder::encode
/// [`Decoder::decode`]: crate::Decoder::decode
#[derive(Debug, Error)]
pub enum Error {
    /// A byte inconsistent with the decoder's current state was read.
    #[error("invalid character {0:?}")]
    InvalidChar(char),

    /// Input ended before the decoder reached a terminal state.
    ///
    /// Distinct from [`Error::InvalidChar`] so callers can tell truncated
    /// input apart from malformed input.
    #[error("input ended before expected")]
    UnexpectedEnd,

    /// The top-level target does not implement the contract required by the
    /// detected leading structural byte.
    #[error("invalid value provided")]
    InvalidValue,

    /// A staged key or string literal is not valid UTF-8.
    #[error("string data is not valid UTF-8")]
    InvalidUtf8,

    /// A staged numeric literal does not parse as a JSON number.
    #[error("malformed numeric literal")]
    InvalidNumber,

    /// Value cannot be parsed as an object.
    #[error("value cannot be parsed as an object")]
    ValueNotObject,

    /// Value cannot be parsed as an array.
    #[error("value cannot be parsed as an array")]
    ValueNotArray,

    /// Value cannot be parsed as a string.
    #[error("value cannot be parsed as a string")]
    ValueNotString,

    /// Value cannot be parsed as bytes.
    #[error("value cannot be parsed as bytes")]
    ValueNotBytes,

    /// Value cannot be parsed as a number.
    #[error("value cannot be parsed as a number")]
    ValueNotNumber,

    /// Value cannot be parsed as a boolean.
    #[error("value cannot be parsed as a boolean")]
    ValueNotBool,

    /// The byte source or sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
