//! Error types for format compilation, bit reading and the codec itself.

use crate::value::Value;

/// Errors produced by the low-level bit reader and writer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BitError {
    /// Requested bit range is beyond the end of the data.
    #[error("bit range is beyond the end of the data")]
    OutOfBounds,
    /// A single read or write asked for more bits than it supports.
    #[error("too many bits requested in a single access")]
    TooManyBits,
}

/// Structural problems found while compiling a [crate::field::Field] list into a [crate::format::Format].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The format has no fields.
    #[error("format has no fields")]
    Empty,
    /// A field has an empty tag.
    #[error("field #{index} has an empty tag")]
    EmptyTag { index: usize },
    /// Two fields share the same tag.
    #[error("duplicate field tag `{0}`")]
    DuplicateTag(String),
    /// Integer width outside 1..=31, or a float width other than 32.
    #[error("field `{tag}` has invalid bit width {bit_width}")]
    InvalidBitWidth { tag: String, bit_width: usize },
    /// Type name in a format definition is not one of `int`, `uint`, `float`.
    #[error("field `{tag}` has unrecognized type `{ty}`")]
    UnknownType { tag: String, ty: String },
    /// An integer field definition did not give its width.
    #[error("field `{tag}` is missing its bit width")]
    MissingBitWidth { tag: String },
    /// The format definition could not be deserialized.
    #[error("malformed format definition: {0}")]
    Malformed(String),
}

/// Coarse classification of a [CodecError].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The field list is structurally invalid.
    InvalidFormat,
    /// The record lacks a tag the format requires.
    MissingField,
    /// A value does not fit its field's type and width.
    OutOfRange,
    /// The frame is shorter than the format.
    TruncatedFrame,
}

/// Errors returned by [crate::format::Format::encode] and [crate::format::Format::decode].
///
/// Every error aborts the whole call; no partial record or frame is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid format: {0}")]
    InvalidFormat(#[from] FormatError),

    /// The record has no value for a tag the format requires.
    #[error("record is missing field `{0}`")]
    MissingField(String),

    /// The value cannot be represented in the field's type and width.
    #[error("value {value} for field `{tag}` is outside [{min}, {max}]")]
    OutOfRange {
        tag: String,
        value: Value,
        min: Value,
        max: Value,
    },

    /// The frame holds fewer bits than the format declares.
    #[error("frame too short: format needs {needed_bits} bits, frame has {available_bits}")]
    TruncatedFrame {
        needed_bits: usize,
        available_bits: usize,
    },
}

impl CodecError {
    /// Classifies the error without its context.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::InvalidFormat(_) => ErrorKind::InvalidFormat,
            CodecError::MissingField(_) => ErrorKind::MissingField,
            CodecError::OutOfRange { .. } => ErrorKind::OutOfRange,
            CodecError::TruncatedFrame { .. } => ErrorKind::TruncatedFrame,
        }
    }
}
