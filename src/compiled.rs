use crate::{
    bits::{self, BitWriter, low_mask, sign_extend},
    errors::{BitError, CodecError, FormatError},
    field::{FLOAT32_BITS, Field, FieldType, MAX_INT_BITS},
    value::Value,
};

/// A validated [Field]. Only built through `TryFrom<&Field>`, so its width
/// always suits its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    tag: String,
    ty: FieldType,
    bit_width: usize,
}

impl TryFrom<&Field> for CompiledField {
    type Error = FormatError;

    fn try_from(value: &Field) -> Result<Self, Self::Error> {
        let valid_width = match value.ty {
            FieldType::Int | FieldType::Uint => (1..=MAX_INT_BITS).contains(&value.bit_width),
            FieldType::Float32 => value.bit_width == FLOAT32_BITS,
        };

        if !valid_width {
            return Err(FormatError::InvalidBitWidth {
                tag: value.tag.clone(),
                bit_width: value.bit_width,
            });
        }

        Ok(CompiledField {
            tag: value.tag.clone(),
            ty: value.ty,
            bit_width: value.bit_width,
        })
    }
}

impl CompiledField {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn ty(&self) -> FieldType {
        self.ty
    }

    pub fn bit_width(&self) -> usize {
        self.bit_width
    }

    /// Smallest and largest value the field can hold.
    ///
    /// Float fields hold any finite single precision value, plus NaN and the infinities.
    pub fn bounds(&self) -> (Value, Value) {
        match self.ty {
            FieldType::Int | FieldType::Uint => {
                let (min, max) = self.int_bounds();
                (Value::Int(min), Value::Int(max))
            }
            FieldType::Float32 => (
                Value::Float(f32::MIN as f64),
                Value::Float(f32::MAX as f64),
            ),
        }
    }

    fn int_bounds(&self) -> (i64, i64) {
        match self.ty {
            FieldType::Int => {
                let half = 1i64 << (self.bit_width - 1);
                (-half, half - 1)
            }
            FieldType::Uint | FieldType::Float32 => (0, low_mask(self.bit_width) as i64),
        }
    }

    /// Reads the field from `data` starting at `offset_bits`.
    pub fn decode_at(&self, data: &[u8], offset_bits: usize) -> Result<Value, BitError> {
        let raw = bits::read_bits_at(data, offset_bits, self.bit_width)?;

        Ok(match self.ty {
            FieldType::Uint => Value::Int(raw as i64),
            FieldType::Int => Value::Int(sign_extend(raw, self.bit_width)),
            FieldType::Float32 => Value::Float(f32::from_bits(raw as u32) as f64),
        })
    }

    /// Converts `value` into the field's raw bit pattern, checking its range.
    pub fn to_raw(&self, value: &Value) -> Result<u64, CodecError> {
        let (min, max) = self.bounds();
        let out_of_range = || CodecError::OutOfRange {
            tag: self.tag.clone(),
            value: *value,
            min,
            max,
        };

        if self.ty == FieldType::Float32 {
            let single = value.as_f32();
            // finite input must stay finite after rounding
            if single.is_infinite() && value.is_finite() {
                return Err(out_of_range());
            }
            return Ok(single.to_bits() as u64);
        }

        let (lo, hi) = self.int_bounds();
        let v = value.as_i64().ok_or_else(out_of_range)?;
        if v < lo || v > hi {
            return Err(out_of_range());
        }

        // two's complement of the field width
        Ok(v as u64 & low_mask(self.bit_width))
    }

    /// Appends `value` to `writer`.
    pub fn encode_into(&self, value: &Value, writer: &mut BitWriter) -> Result<(), CodecError> {
        let raw = self.to_raw(value)?;

        // Widths were capped at 32 bits by `TryFrom<&Field>`, so the writer
        // never rejects them; the mapping only keeps the error typed.
        writer
            .write_bits(raw, self.bit_width)
            .map_err(|_| FormatError::InvalidBitWidth {
                tag: self.tag.clone(),
                bit_width: self.bit_width,
            })?;

        Ok(())
    }
}
