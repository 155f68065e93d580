//! # bitframe
//!
//! Bit-level packing of telemetry records into dense binary frames.
//!
//! A format is an ordered list of named fields: signed or unsigned integers of
//! 1 to 31 bits, and 32-bit floats. Fields are laid out back to back, MSB-first,
//! with no padding between them; the first field occupies the most significant
//! bits of the frame and the last byte is zero-padded.
//!
//! ## Example
//!
//! ```
//! use bitframe::field::Field;
//! use bitframe::format::Format;
//! use bitframe::value::{Record, Value};
//!
//! let format = Format::compile(&[
//!     Field::int("PTemp", 12),
//!     Field::int("BattVolt", 12),
//!     Field::uint("WaterLevel", 8),
//! ])
//! .unwrap();
//!
//! let record = Record::from([
//!     ("PTemp".to_string(), Value::Int(268)),
//!     ("BattVolt".to_string(), Value::Int(-4)),
//!     ("WaterLevel".to_string(), Value::Int(115)),
//! ]);
//!
//! let frame = format.encode(&record).unwrap();
//! assert_eq!(frame, vec![0x10, 0xCF, 0xFC, 0x73]);
//! assert_eq!(format.decode(&frame).unwrap(), record);
//! ```

pub mod bits;
pub mod compiled;
pub mod errors;
pub mod field;
pub mod format;
#[cfg(feature = "serde")]
pub mod serde;
pub mod value;

use crate::{errors::CodecError, field::Field, format::Format, value::Record};

/// Unpacks `frame` according to `fields`.
///
/// Compiles the format on every call; compile once with [Format::compile]
/// when decoding many frames of the same format.
pub fn decode(frame: &[u8], fields: &[Field]) -> Result<Record, CodecError> {
    Format::compile(fields)?.decode(frame)
}

/// Packs `record` according to `fields`.
pub fn encode(record: &Record, fields: &[Field]) -> Result<Vec<u8>, CodecError> {
    Format::compile(fields)?.encode(record)
}
