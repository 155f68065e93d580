//! Definition of the fields used to build a [crate::format::Format].

/// Width of every [FieldType::Float32] field.
pub const FLOAT32_BITS: usize = 32;

/// Widest integer field, in bits.
pub const MAX_INT_BITS: usize = 31;

/// How the bits of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Two's-complement signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// IEEE-754 single precision float; always 32 bits wide.
    Float32,
}

impl FieldType {
    /// Name used for this type in JSON format definitions.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Int => "int",
            FieldType::Uint => "uint",
            FieldType::Float32 => "float",
        }
    }
}

/// A single named field in a format.
///
/// Fields are laid out back to back in definition order, the first field
/// occupying the most significant bits of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Key of the field in a [crate::value::Record].
    pub tag: String,
    pub ty: FieldType,
    /// Number of bits the field occupies in the frame.
    pub bit_width: usize,
}

impl Field {
    /// A signed integer field of `bit_width` bits.
    pub fn int(tag: impl Into<String>, bit_width: usize) -> Self {
        Field {
            tag: tag.into(),
            ty: FieldType::Int,
            bit_width,
        }
    }

    /// An unsigned integer field of `bit_width` bits.
    pub fn uint(tag: impl Into<String>, bit_width: usize) -> Self {
        Field {
            tag: tag.into(),
            ty: FieldType::Uint,
            bit_width,
        }
    }

    /// A 32-bit float field.
    pub fn float32(tag: impl Into<String>) -> Self {
        Field {
            tag: tag.into(),
            ty: FieldType::Float32,
            bit_width: FLOAT32_BITS,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<crate::serde::FieldDef> for Field {
    type Error = crate::errors::FormatError;

    fn try_from(value: crate::serde::FieldDef) -> Result<Self, Self::Error> {
        use crate::errors::FormatError;

        let ty = match value.ty.as_str() {
            "int" => FieldType::Int,
            "uint" => FieldType::Uint,
            "float" | "float32" => FieldType::Float32,
            _ => {
                return Err(FormatError::UnknownType {
                    tag: value.tag,
                    ty: value.ty,
                });
            }
        };

        match ty {
            // a width given for a float is ignored
            FieldType::Float32 => Ok(Field::float32(value.tag)),
            FieldType::Int | FieldType::Uint => {
                let bit_width = value
                    .len
                    .ok_or_else(|| FormatError::MissingBitWidth {
                        tag: value.tag.clone(),
                    })?;

                Ok(Field {
                    tag: value.tag,
                    ty,
                    bit_width,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            Field::int("PTemp", 12),
            Field {
                tag: "PTemp".to_string(),
                ty: FieldType::Int,
                bit_width: 12
            }
        );
        assert_eq!(Field::uint("WaterLevel", 8).ty, FieldType::Uint);
        assert_eq!(Field::float32("Pressure").bit_width, 32);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(FieldType::Int.name(), "int");
        assert_eq!(FieldType::Uint.name(), "uint");
        assert_eq!(FieldType::Float32.name(), "float");
    }
}
