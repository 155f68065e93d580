//! Values carried by a [Record].

use std::collections::BTreeMap;
use std::fmt;

/// A decoded record: field tag to value.
pub type Record = BTreeMap<String, Value>;

/// A single field value.
///
/// Integer fields decode to [Value::Int]; float fields decode to [Value::Float]
/// holding the exact single-precision value widened to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Returns the value as an integer if it is one, or a finite float with no fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                if v >= i64::MIN as f64 && v < i64::MAX as f64 {
                    Some(v as i64)
                } else {
                    None
                }
            }
            Value::Float(_) => None,
        }
    }

    /// False only for NaN and the infinities.
    pub fn is_finite(&self) -> bool {
        match *self {
            Value::Int(_) => true,
            Value::Float(v) => v.is_finite(),
        }
    }

    /// Returns the value rounded to single precision.
    pub fn as_f32(&self) -> f32 {
        match *self {
            Value::Int(v) => v as f32,
            Value::Float(v) => v as f32,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}
