//! Format: compiled, ordered set of fields used to pack records into frames and back.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    bits::BitWriter,
    compiled::CompiledField,
    errors::{CodecError, FormatError},
    field::Field,
    value::Record,
};

/// A compiled format: [CompiledField]s laid out back to back and the total bit length.
/// Use [Format::compile] to build from [Field]s, then [Format::encode] and [Format::decode].
///
/// A `Format` is immutable once compiled and can be shared between threads;
/// every call works on its own cursor and buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    total_bits: usize,
    fields: Vec<CompiledField>,
}

impl Format {
    /// Compiles a slice of [Field]s into a format. Fails if the list is empty,
    /// a tag is empty or repeated, or a width is out of bounds for its type.
    pub fn compile(fields: &[Field]) -> Result<Self, FormatError> {
        if fields.is_empty() {
            return Err(FormatError::Empty);
        }

        let mut compiled_fields: Vec<CompiledField> = Vec::with_capacity(fields.len());
        let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
        let mut total_bits = 0;

        for (index, field) in fields.iter().enumerate() {
            if field.tag.is_empty() {
                return Err(FormatError::EmptyTag { index });
            }
            if !seen.insert(field.tag.as_str()) {
                return Err(FormatError::DuplicateTag(field.tag.clone()));
            }

            let compiled_field = CompiledField::try_from(field)?;
            total_bits += compiled_field.bit_width();

            compiled_fields.push(compiled_field);
        }

        debug!(
            fields = compiled_fields.len(),
            total_bits, "compiled frame format"
        );

        Ok(Self {
            total_bits,
            fields: compiled_fields,
        })
    }

    /// Sum of all field widths.
    pub fn total_bits(&self) -> usize {
        self.total_bits
    }

    /// Length in bytes of every frame produced by [Format::encode].
    pub fn frame_len(&self) -> usize {
        self.total_bits.div_ceil(8)
    }

    /// Compiled fields in definition order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Unpacks `frame` into a record. Bits past the last field are ignored.
    ///
    /// Fails with [CodecError::TruncatedFrame] if `frame` holds fewer than
    /// [Format::total_bits] bits; no field is read in that case.
    pub fn decode(&self, frame: &[u8]) -> Result<Record, CodecError> {
        let available_bits = frame.len() * 8;
        let truncated = || CodecError::TruncatedFrame {
            needed_bits: self.total_bits,
            available_bits,
        };

        if available_bits < self.total_bits {
            debug!(
                needed_bits = self.total_bits,
                available_bits, "frame too short for format"
            );
            return Err(truncated());
        }

        let mut record = Record::new();
        let mut offset = 0;

        for field in &self.fields {
            let value = field.decode_at(frame, offset).map_err(|_| truncated())?;
            trace!(tag = field.tag(), offset, width = field.bit_width(), %value, "unpacked field");

            record.insert(field.tag().to_string(), value);
            offset += field.bit_width();
        }

        Ok(record)
    }

    /// Packs `record` into a new frame of [Format::frame_len] bytes.
    ///
    /// Record entries whose tag is not in the format are ignored. The last
    /// byte is zero-padded when the total width is not a multiple of 8.
    ///
    /// Float fields accept [crate::value::Value::Int] as well, rounded to
    /// single precision; such a field decodes back as a `Value::Float`, so the
    /// decoded record compares equal only when floats were given as floats.
    pub fn encode(&self, record: &Record) -> Result<Vec<u8>, CodecError> {
        let mut writer = BitWriter::with_capacity(self.frame_len());

        for field in &self.fields {
            let value = record.get(field.tag()).ok_or_else(|| {
                debug!(tag = field.tag(), "record is missing a field");
                CodecError::MissingField(field.tag().to_string())
            })?;

            let offset = writer.bit_len();
            field.encode_into(value, &mut writer).inspect_err(|err| {
                debug!(tag = field.tag(), offset, error = %err, "failed to pack field");
            })?;
            trace!(tag = field.tag(), offset, width = field.bit_width(), %value, "packed field");
        }

        Ok(writer.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn record(entries: &[(&str, Value)]) -> Record {
        entries
            .iter()
            .map(|(tag, value)| (tag.to_string(), *value))
            .collect()
    }

    #[test]
    fn test_compile_empty() {
        assert_eq!(Format::compile(&[]).unwrap_err(), FormatError::Empty);
    }

    #[test]
    fn test_compile_duplicate_tag() {
        let fields = vec![Field::uint("a", 4), Field::int("a", 4)];
        assert_eq!(
            Format::compile(&fields).unwrap_err(),
            FormatError::DuplicateTag("a".to_string())
        );
    }

    #[test]
    fn test_compile_empty_tag() {
        let fields = vec![Field::uint("a", 4), Field::uint("", 4)];
        assert_eq!(
            Format::compile(&fields).unwrap_err(),
            FormatError::EmptyTag { index: 1 }
        );
    }

    #[test]
    fn test_compile_widths() {
        let fields = vec![
            Field::int("PTemp", 12),
            Field::int("BattVolt", 12),
            Field::uint("WaterLevel", 8),
            Field::float32("Pressure"),
        ];
        let format = Format::compile(&fields).unwrap();

        let widths: Vec<usize> = format.fields().iter().map(|f| f.bit_width()).collect();
        assert_eq!(widths, vec![12, 12, 8, 32]);
        assert_eq!(format.total_bits(), 64);
        assert_eq!(format.frame_len(), 8);
    }

    #[test]
    fn test_decode_multiple_fields() {
        let fields = vec![Field::uint("test1", 8), Field::uint("test2", 16)];
        let format = Format::compile(&fields).unwrap();

        let data = vec![0x01, 0x00, 0x01, 0x04];
        assert_eq!(
            format.decode(&data),
            Ok(record(&[("test1", Value::Int(1)), ("test2", Value::Int(1))]))
        );
    }

    #[test]
    fn test_decode_truncated() {
        let fields = vec![Field::uint("a", 8), Field::float32("b")];
        let format = Format::compile(&fields).unwrap();

        assert_eq!(
            format.decode(&[0x01, 0x02, 0x03]),
            Err(CodecError::TruncatedFrame {
                needed_bits: 40,
                available_bits: 24
            })
        );
    }

    #[test]
    fn test_encode_missing_field() {
        let fields = vec![Field::uint("a", 8), Field::uint("b", 8)];
        let format = Format::compile(&fields).unwrap();

        assert_eq!(
            format.encode(&record(&[("a", Value::Int(1))])),
            Err(CodecError::MissingField("b".to_string()))
        );
    }

    #[test]
    fn test_encode_ignores_unknown_tags() {
        let fields = vec![Field::uint("a", 8)];
        let format = Format::compile(&fields).unwrap();

        let frame = format
            .encode(&record(&[("a", Value::Int(7)), ("zzz", Value::Int(1))]))
            .unwrap();
        assert_eq!(frame, vec![7]);
    }

    #[test]
    fn test_int_into_float_field_decodes_as_float() {
        let format = Format::compile(&[Field::float32("p")]).unwrap();

        let frame = format.encode(&record(&[("p", Value::Int(3))])).unwrap();
        assert_eq!(frame, 3.0f32.to_be_bytes().to_vec());
        assert_eq!(
            format.decode(&frame).unwrap(),
            record(&[("p", Value::Float(3.0))])
        );
    }

    #[test]
    fn test_encode_float_too_large() {
        let format = Format::compile(&[Field::uint("n", 4), Field::float32("p")]).unwrap();

        let err = format
            .encode(&record(&[("n", Value::Int(1)), ("p", Value::Float(1e300))]))
            .unwrap_err();
        assert!(matches!(err, CodecError::OutOfRange { ref tag, .. } if tag == "p"));
    }

    #[test]
    fn test_encode_decode_with_float() {
        let fields = vec![
            Field::int("PTemp", 12),
            Field::int("BattVolt.value", 12),
            Field::int("WaterLevel", 8),
            Field::float32("Pressure"),
        ];
        let format = Format::compile(&fields).unwrap();
        let data = record(&[
            ("PTemp", Value::Int(-3)),
            ("BattVolt.value", Value::Int(-5)),
            ("WaterLevel", Value::Int(115)),
            ("Pressure", Value::Float(52.4)),
        ]);

        let frame = format.encode(&data).unwrap();
        assert_eq!(frame.len(), 8);

        let decoded = format.decode(&frame).unwrap();
        assert_eq!(decoded["PTemp"], Value::Int(-3));
        assert_eq!(decoded["BattVolt.value"], Value::Int(-5));
        assert_eq!(decoded["WaterLevel"], Value::Int(115));
        assert_eq!(decoded["Pressure"], Value::Float(52.4f32 as f64));
    }
}
