//! JSON-deserializable format description.
//!
//! Telemetry formats are usually shipped as JSON next to the application, one
//! object per field:
//!
//! ```json
//! [
//!   { "tag": "PTemp", "type": "int", "len": 12 },
//!   { "tag": "WaterLevel", "type": "uint", "len": 8 },
//!   { "tag": "Pressure", "type": "float" }
//! ]
//! ```
//!
//! `len` is required for `int` and `uint` and ignored for `float`.

use serde::{Deserialize, Serialize};

use crate::{errors::FormatError, field::Field, format::Format};

/// Description of a single field.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Becomes the key in the record.
    pub tag: String,
    /// One of `int`, `uint` or `float`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Width in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub len: Option<usize>,
}

impl From<&Field> for FieldDef {
    fn from(value: &Field) -> Self {
        FieldDef {
            tag: value.tag.clone(),
            ty: value.ty.name().to_string(),
            len: match value.ty {
                crate::field::FieldType::Float32 => None,
                _ => Some(value.bit_width),
            },
        }
    }
}

/// Top-level format definition: the ordered list of fields.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct FormatDef {
    pub fields: Vec<FieldDef>,
}

impl TryFrom<FormatDef> for Format {
    type Error = FormatError;

    fn try_from(value: FormatDef) -> Result<Self, Self::Error> {
        let fields = value
            .fields
            .into_iter()
            .map(Field::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Format::compile(&fields)
    }
}

impl Format {
    /// Parses and compiles a JSON format definition.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        let def: FormatDef =
            serde_json::from_str(json).map_err(|e| FormatError::Malformed(e.to_string()))?;
        Format::try_from(def)
    }

    /// Describes this format as a [FormatDef], for writing it back out.
    pub fn to_def(&self) -> FormatDef {
        FormatDef {
            fields: self
                .fields()
                .iter()
                .map(|f| {
                    FieldDef::from(&Field {
                        tag: f.tag().to_string(),
                        ty: f.ty(),
                        bit_width: f.bit_width(),
                    })
                })
                .collect(),
        }
    }
}
